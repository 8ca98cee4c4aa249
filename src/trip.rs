//! Trip generation and trip view assembly
//!
//! `TripPlanner` asks the generator for a plan and recovers the trip data from its reply.
//! `TripView` turns a stored trip into render-ready cards, resolving every hotel and place
//! image concurrently.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::ExtractionError;
use crate::extract;
use crate::generative::TextGenerator;
use crate::generative::prompts::trip_prompt;
use crate::images::{DEFAULT_IMAGE, ImageResolver, fallback_image_url};
use crate::itinerary;
use crate::models::{HotelOption, PlaceVisit, TripData, TripRecord, TripRequest, UserSelection};
use crate::{Result, TripLensError};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Longest trip the planner will ask for
pub const MAX_TRIP_DAYS: u32 = 30;

const TRIP_FIELDS: &[&str] = &["hotel_options", "hotelOptions", "hotels", "itinerary"];

/// Google Maps search link for free text
#[must_use]
pub fn maps_url(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| format!("{MAPS_SEARCH_URL}{}", urlencoding::encode(query)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Models sometimes wrap the plan in a single envelope key such as `travelPlan`.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(fields)
            if fields.len() == 1
                && !TRIP_FIELDS.iter().any(|f| fields.contains_key(*f))
                && fields.values().all(Value::is_object) =>
        {
            fields.into_iter().next().map_or(Value::Null, |(key, inner)| {
                debug!("Unwrapping trip plan from '{}'", key);
                inner
            })
        }
        other => other,
    }
}

pub struct TripPlanner {
    generator: Arc<dyn TextGenerator>,
}

impl TripPlanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate hotels and an itinerary for a request
    #[instrument(name = "plan_trip", skip(self), fields(location = %request.location))]
    pub async fn plan(&self, request: &TripRequest) -> Result<TripData> {
        if request.location.trim().is_empty() {
            return Err(TripLensError::validation("Trip location cannot be empty"));
        }
        if request.total_days == 0 || request.total_days > MAX_TRIP_DAYS {
            return Err(TripLensError::validation(format!(
                "Trip length must be between 1 and {MAX_TRIP_DAYS} days"
            )));
        }

        let text = self.generator.generate(&trip_prompt(request)).await?;
        let value = unwrap_envelope(extract::extract_json(&text)?);

        let trip: TripData =
            serde_json::from_value(value).map_err(|e| ExtractionError::MalformedJson {
                raw: text.clone(),
                message: e.to_string(),
            })?;

        if trip.hotel_options.is_empty() && itinerary::normalize_value(&trip.itinerary).is_empty() {
            return Err(ExtractionError::MalformedJson {
                raw: text,
                message: "response has neither hotels nor itinerary".to_string(),
            }
            .into());
        }

        info!("Planned trip with {} hotel options", trip.hotel_options.len());
        Ok(trip)
    }
}

/// Hotel with its resolved photo and map link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelCard {
    #[serde(flatten)]
    pub hotel: HotelOption,
    pub photo_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCard {
    #[serde(flatten)]
    pub visit: PlaceVisit,
    pub photo_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCard {
    pub day_index: u64,
    pub label: String,
    pub places: Vec<PlaceCard>,
}

/// Everything needed to render a stored trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOverview {
    pub selection: UserSelection,
    pub hotels: Vec<HotelCard>,
    pub days: Vec<DayCard>,
}

#[derive(Clone)]
pub struct TripView {
    resolver: ImageResolver,
}

impl TripView {
    pub fn new(resolver: ImageResolver) -> Self {
        Self { resolver }
    }

    /// Build cards for a stored trip. Image lookups never fail the view.
    #[instrument(name = "trip_view", skip_all)]
    pub async fn build(&self, record: &TripRecord) -> TripOverview {
        let days = itinerary::normalize_value(&record.trip_data.itinerary);

        let hotel_options = &record.trip_data.hotel_options;
        let hotels = join_all(hotel_options.iter().map(|h| self.hotel_card(h)));
        let days = join_all(days.into_iter().map(|day| async move {
            let places = join_all(day.plan.into_iter().map(|v| self.place_card(v))).await;
            DayCard {
                day_index: day.day_index,
                label: day.label,
                places,
            }
        }));
        let (hotels, days) = futures::join!(hotels, days);

        debug!("Built {} hotel cards and {} day cards", hotels.len(), days.len());
        TripOverview {
            selection: record.user_selection.clone(),
            hotels,
            days,
        }
    }

    async fn hotel_card(&self, hotel: &HotelOption) -> HotelCard {
        let own_image = non_blank(hotel.image_url.as_deref());
        let address = non_blank(hotel.address.as_deref());

        let photo_url = match non_blank(hotel.name.as_deref()) {
            Some(name) => match self.resolver.resolve_detailed(name, address).await {
                Ok(resolution) if !resolution.is_fallback() => resolution.image.url,
                Ok(resolution) => own_image.map_or(resolution.image.url, str::to_string),
                Err(e) => {
                    debug!("Hotel image lookup rejected: {}", e);
                    own_image.unwrap_or(DEFAULT_IMAGE).to_string()
                }
            },
            None => own_image.unwrap_or(DEFAULT_IMAGE).to_string(),
        };

        let query = [non_blank(hotel.name.as_deref()), address]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        HotelCard {
            hotel: hotel.clone(),
            photo_url,
            maps_url: maps_url(&query),
        }
    }

    async fn place_card(&self, visit: PlaceVisit) -> PlaceCard {
        let name = non_blank(visit.place.as_deref());
        let coordinates = non_blank(visit.geo_coordinates.as_deref());

        let photo_url = match name {
            Some(name) => {
                let context = coordinates.map(|c| format!("near {c}"));
                match self.resolver.resolve(name, context.as_deref()).await {
                    Ok(image) => image.url,
                    Err(e) => {
                        debug!("Place image lookup rejected: {}", e);
                        fallback_image_url(name).to_string()
                    }
                }
            }
            None => DEFAULT_IMAGE.to_string(),
        };

        let maps_url = coordinates.or(name).and_then(maps_url);

        PlaceCard {
            visit,
            photo_url,
            maps_url,
        }
    }
}
