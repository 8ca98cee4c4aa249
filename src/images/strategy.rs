//! Ordered search strategies, most specific first

use std::fmt;

/// Words that mark a name as lodging
const LODGING_KEYWORDS: &[&str] = &[
    "hotel",
    "resort",
    "inn",
    "lodge",
    "hostel",
    "motel",
    "suites",
    "guest house",
    "guesthouse",
    "homestay",
    "villa",
    "b&b",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStrategy {
    /// Name plus caller context (or the bare name when there is no context)
    Contextual,
    /// Bare name, only after a contextual attempt
    NameOnly,
    /// Name plus "hotel" or "landmark"
    Disambiguated,
}

impl fmt::Display for AttemptStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Contextual => "contextual",
            Self::NameOnly => "name-only",
            Self::Disambiguated => "disambiguated",
        };
        f.write_str(label)
    }
}

/// A single text-search query to try
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAttempt {
    pub strategy: AttemptStrategy,
    pub query: String,
}

/// True when the name reads like a place to stay. Matches whole words only,
/// so "Innsbruck" or "Lodgepole" do not count.
#[must_use]
pub fn implies_lodging(name: &str) -> bool {
    let lowered = name.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '&'))
        .filter(|w| !w.is_empty())
        .collect();

    LODGING_KEYWORDS.iter().any(|keyword| {
        if keyword.contains(' ') {
            lowered.contains(keyword)
        } else {
            words
                .iter()
                .any(|word| word == keyword || word.strip_suffix('s') == Some(*keyword))
        }
    })
}

/// Term appended by the last attempt
#[must_use]
pub fn disambiguator(name: &str) -> &'static str {
    if implies_lodging(name) { "hotel" } else { "landmark" }
}

/// Build the ordered attempt list for a name and optional context.
///
/// With context: `name context`, `name`, `name <disambiguator>`.
/// Without context: `name`, `name <disambiguator>`.
#[must_use]
pub fn plan_attempts(primary: &str, context: Option<&str>) -> Vec<SearchAttempt> {
    let primary = primary.trim();
    let context = context.map(str::trim).filter(|c| !c.is_empty());

    let mut attempts = Vec::with_capacity(3);
    match context {
        Some(context) => {
            attempts.push(SearchAttempt {
                strategy: AttemptStrategy::Contextual,
                query: format!("{primary} {context}"),
            });
            attempts.push(SearchAttempt {
                strategy: AttemptStrategy::NameOnly,
                query: primary.to_string(),
            });
        }
        None => attempts.push(SearchAttempt {
            strategy: AttemptStrategy::Contextual,
            query: primary.to_string(),
        }),
    }
    attempts.push(SearchAttempt {
        strategy: AttemptStrategy::Disambiguated,
        query: format!("{primary} {}", disambiguator(primary)),
    });
    attempts
}
