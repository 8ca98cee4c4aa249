//! Resolved image model

use serde::{Deserialize, Serialize};

/// A photo URL ready to hand to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImage {
    pub url: String,
}

impl ResolvedImage {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Where a resolved image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ImageOrigin {
    /// Served from the query cache without a network call
    Cache,
    /// Found by the search attempt with this 1-based number
    Search { attempt: usize },
    /// Static category image after every attempt failed
    Fallback,
}

/// Result of a resolution together with its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub image: ResolvedImage,
    pub origin: ImageOrigin,
}

impl Resolution {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == ImageOrigin::Fallback
    }
}
