//! `TripLens` - photo resolution and generative-response extraction for trip planning
//!
//! This library provides the resilient data layer behind an AI trip planner:
//! cached multi-attempt image lookups with category fallbacks, JSON recovery from
//! free-form model output, and day-ordered itinerary normalization.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod generative;
pub mod images;
pub mod itinerary;
pub mod models;
pub mod places;
pub mod telemetry;
pub mod transport;
pub mod trip;
pub mod web;

// Re-export core types for public API
pub use cache::{CacheKey, QueryCache};
pub use config::TripLensConfig;
pub use error::{ExtractionError, TripLensError};
pub use generative::{GeminiClient, TextGenerator};
pub use images::ImageResolver;
pub use models::{
    ExtractedPayload, ItineraryDay, PlaceVisit, ResolvedImage, TransportOption, TripData,
    TripRecord,
};
pub use places::{PlaceSearch, PlacesClient};
pub use transport::{TransportLookup, TransportService};
pub use trip::{TripOverview, TripPlanner, TripView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripLensError>;
