//! Data models for `TripLens`
//!
//! - Image: resolved photo URLs and where they came from
//! - Transport: flight/train/bus options recovered from generated text
//! - Trip: trip records, hotels and itinerary days

pub mod image;
pub mod lenient;
pub mod transport;
pub mod trip;

pub use image::{ImageOrigin, Resolution, ResolvedImage};
pub use transport::{ExtractedPayload, TransportMode, TransportOption};
pub use trip::{
    Budget, HotelOption, ItineraryDay, PlaceVisit, SelectedPlace, Traveler, TripData, TripRecord,
    TripRequest, UserSelection,
};
