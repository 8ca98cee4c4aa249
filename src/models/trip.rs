//! Trip records, hotels, itinerary days and planning options

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::lenient::{optional_coordinates, optional_text};

/// A single stop in a day plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceVisit {
    #[serde(
        default,
        alias = "placeName",
        alias = "place_name",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub place: Option<String>,
    #[serde(
        default,
        alias = "placeDetails",
        alias = "place_details",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub details: Option<String>,
    #[serde(
        default,
        alias = "timeTravel",
        alias = "time_travel",
        alias = "bestTimeToVisit",
        alias = "best_time_to_visit",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    #[serde(
        default,
        alias = "ticketPricing",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_pricing: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(
        default,
        alias = "geoCoordinates",
        deserialize_with = "optional_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub geo_coordinates: Option<String>,
    #[serde(
        default,
        alias = "placeImageUrl",
        alias = "place_image_url",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl PlaceVisit {
    #[must_use]
    pub fn named(place: impl Into<String>) -> Self {
        Self {
            place: Some(place.into()),
            ..Self::default()
        }
    }
}

/// One day of a normalized itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day_index: u64,
    pub label: String,
    pub plan: Vec<PlaceVisit>,
}

/// A hotel suggestion from a generated trip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelOption {
    #[serde(
        default,
        alias = "hotelName",
        alias = "hotel_name",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "hotelAddress",
        alias = "hotel_address",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(
        default,
        alias = "hotelImageUrl",
        alias = "hotel_image_url",
        alias = "imageUrl",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(
        default,
        alias = "geoCoordinates",
        deserialize_with = "optional_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub geo_coordinates: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(
        default,
        alias = "descriptions",
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

/// A place picked in the trip form: either an autocomplete object with a label or plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectedPlace {
    Labeled { label: String },
    Plain(String),
}

impl SelectedPlace {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Labeled { label } | Self::Plain(label) => label,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSelection {
    #[serde(default)]
    pub source: Option<SelectedPlace>,
    #[serde(default)]
    pub location: Option<SelectedPlace>,
    #[serde(default, deserialize_with = "optional_text")]
    pub no_of_days: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub traveler: Option<String>,
}

/// Generated trip content. `itinerary` stays raw until it is normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripData {
    #[serde(default, alias = "hotelOptions", alias = "hotels")]
    pub hotel_options: Vec<HotelOption>,
    #[serde(default)]
    pub itinerary: Value,
}

/// A stored trip as produced by the trip-creation collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    #[serde(default)]
    pub user_selection: UserSelection,
    #[serde(default)]
    pub trip_data: TripData,
}

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traveler {
    #[serde(alias = "Just Me")]
    Solo,
    Couple,
    Family,
    Friends,
}

impl Traveler {
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Solo => "A sole traveler in exploration",
            Self::Couple => "Romantic getaway",
            Self::Family => "Family-friendly options",
            Self::Friends => "Fun with friends",
        }
    }
}

impl fmt::Display for Traveler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Solo => "Just Me",
            Self::Couple => "Couple",
            Self::Family => "Family",
            Self::Friends => "Friends",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    #[serde(alias = "Cheap")]
    Budget,
    Moderate,
    Luxury,
}

impl Budget {
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Budget => "Looking for affordable options",
            Self::Moderate => "Willing to spend a bit more",
            Self::Luxury => "Want the best experience",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Budget => "Budget",
            Self::Moderate => "Moderate",
            Self::Luxury => "Luxury",
        };
        f.write_str(label)
    }
}

/// Parameters for generating a new trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub location: String,
    pub total_days: u32,
    pub traveler: Traveler,
    pub budget: Budget,
}
