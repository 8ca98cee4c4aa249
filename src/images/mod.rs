//! Image resolution
//!
//! Turns entity names into photo URLs through a chain of progressively broader
//! text searches, with a static category image as the last resort.

pub mod fallback;
pub mod resolver;
pub mod strategy;

pub use fallback::{DEFAULT_IMAGE, FALLBACK_TABLE, FallbackCategory, fallback_image_url};
pub use resolver::ImageResolver;
pub use strategy::{AttemptStrategy, SearchAttempt, plan_attempts};
