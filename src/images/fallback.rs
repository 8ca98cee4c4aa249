//! Static category images used when every search attempt fails

/// Image served when no category keyword matches
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1501785888041-af3ef285b470?w=800&auto=format&fit=crop";

/// Fallback category with its trigger keywords and image
#[derive(Debug, Clone, Copy)]
pub struct FallbackCategory {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
    pub image_url: &'static str,
}

/// Evaluated top to bottom; the first category with a matching keyword wins.
/// "Sea View Fort" is a beach, not a fort.
pub const FALLBACK_TABLE: &[FallbackCategory] = &[
    FallbackCategory {
        category: "temple",
        keywords: &["temple", "mandir", "monastery"],
        image_url: "https://images.unsplash.com/photo-1509516425643-320d8495c4ff?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "monument",
        keywords: &["monument", "memorial", "statue"],
        image_url: "https://images.unsplash.com/photo-1602430080148-66d65c069dd5?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "mountain",
        keywords: &["mountain", "peak", "point"],
        image_url: "https://images.unsplash.com/photo-1486082570281-d942af5c39b7?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "beach",
        keywords: &["beach", "sea", "ocean"],
        image_url: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "garden",
        keywords: &["garden", "botanical"],
        image_url: "https://images.unsplash.com/photo-1508252592163-5d3c3c559194?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "park",
        keywords: &["park", "national park"],
        image_url: "https://images.unsplash.com/photo-1500964757637-c85e8a162699?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "fort",
        keywords: &["fort", "fortress"],
        image_url: "https://images.unsplash.com/photo-1548013146-72479768bada?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "palace",
        keywords: &["palace", "mahal", "castle"],
        image_url: "https://images.unsplash.com/photo-1599522336242-0e1820d1380e?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "museum",
        keywords: &["museum", "gallery"],
        image_url: "https://images.unsplash.com/photo-1574271005251-2875e769f6a2?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "lighthouse",
        keywords: &["lighthouse", "beacon"],
        image_url: "https://images.unsplash.com/photo-1566236202825-62edfc640de3?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "market",
        keywords: &["market", "bazaar", "mall"],
        image_url: "https://images.unsplash.com/photo-1520006403909-838d6b92c22e?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "waterfall",
        keywords: &["waterfall", "falls"],
        image_url: "https://images.unsplash.com/photo-1467890947394-8171244e5410?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "lake",
        keywords: &["lake", "pond", "reservoir"],
        image_url: "https://images.unsplash.com/photo-1501785888041-af3ef285b470?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "hill",
        keywords: &["hill", "hills", "highland"],
        image_url: "https://images.unsplash.com/photo-1486082570281-d942af5c39b7?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "tower",
        keywords: &["tower", "spire"],
        image_url: "https://images.unsplash.com/photo-1549144511-f099e773c147?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "bridge",
        keywords: &["bridge", "crossing"],
        image_url: "https://images.unsplash.com/photo-1473221326025-9183b464bb7e?w=800&auto=format&fit=crop",
    },
    FallbackCategory {
        category: "cave",
        keywords: &["cave", "cavern", "grotto"],
        image_url: "https://images.unsplash.com/photo-1626688455375-b9162a2d3de5?w=800&auto=format&fit=crop",
    },
];

/// First category whose keyword appears in the name (case-insensitive substring match)
#[must_use]
pub fn match_category(name: &str) -> Option<&'static FallbackCategory> {
    let name = name.to_lowercase();
    FALLBACK_TABLE
        .iter()
        .find(|entry| entry.keywords.iter().any(|keyword| name.contains(keyword)))
}

/// Category image for a name, or the default image
#[must_use]
pub fn fallback_image_url(name: &str) -> &'static str {
    match_category(name).map_or(DEFAULT_IMAGE, |entry| entry.image_url)
}
