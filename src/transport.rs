//! Transportation lookup between a trip's source and destination
//!
//! Prompts the generator, extracts the three transport lists and never fails on bad
//! upstream output: the caller gets an empty payload plus a retry message instead.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::extract;
use crate::generative::TextGenerator;
use crate::generative::prompts::transport_prompt;
use crate::models::{ExtractedPayload, SelectedPlace, TransportMode, TripRecord};
use crate::{Result, TripLensError};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch transportation options. Please try again.";
pub const PARSE_FAILED_MESSAGE: &str = "Failed to parse transportation data. Please try again.";
pub const MISSING_ENDPOINTS_MESSAGE: &str = "Source location not selected. Transportation options are only available when both source and destination are specified.";

const MAJOR_CITIES: &[&str] = &[
    "Mumbai",
    "Delhi",
    "Kolkata",
    "Chennai",
    "Bangalore",
    "Hyderabad",
    "Pune",
];

/// Destinations without an airport, with the one to fly into instead
const NEAREST_AIRPORTS: &[(&str, &str)] = &[
    ("Darjeeling", "Bagdogra"),
    ("Manali", "Kullu"),
    ("Ooty", "Coimbatore"),
    ("Munnar", "Cochin"),
    ("Shimla", "Chandigarh"),
];

/// Explanation shown for a mode with no options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeNotice {
    pub mode: TransportMode,
    pub message: String,
}

/// Result of a lookup. `error` is set when the payload is empty because something failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportLookup {
    pub source: String,
    pub destination: String,
    #[serde(flatten)]
    pub payload: ExtractedPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub notices: Vec<ModeNotice>,
}

fn same_place(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn is_major_city(name: &str) -> bool {
    MAJOR_CITIES.iter().any(|city| same_place(city, name))
}

fn nearest_airport(destination: &str) -> Option<&'static str> {
    NEAREST_AIRPORTS
        .iter()
        .find(|(place, _)| same_place(place, destination))
        .map(|(_, airport)| *airport)
}

/// Message for a mode that came back with no options
#[must_use]
pub fn empty_mode_message(mode: TransportMode, source: &str, destination: &str) -> String {
    match mode {
        TransportMode::Flights => {
            if is_major_city(source) && is_major_city(destination) {
                format!(
                    "Error loading flight options between {source} and {destination}. Please try again."
                )
            } else if let Some(airport) = nearest_airport(destination) {
                format!(
                    "No direct flights to {destination}. Consider flying to {airport} Airport and continuing by road."
                )
            } else {
                format!(
                    "No commercial flights operate between {source} and {destination}. Please consider alternative transportation."
                )
            }
        }
        TransportMode::Trains => format!(
            "No direct train routes found between {source} and {destination}. Consider checking for connecting trains or other modes of transportation."
        ),
        TransportMode::Buses => format!(
            "No direct bus services found between {source} and {destination}. Local or connecting bus services may be available."
        ),
    }
}

pub struct TransportService {
    generator: Arc<dyn TextGenerator>,
}

impl TransportService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Look up options between two places.
    ///
    /// Only blank endpoints are an error. Generation and extraction failures come back as an
    /// empty payload with `error` set.
    #[instrument(name = "transport_lookup", skip(self))]
    pub async fn lookup(&self, source: &str, destination: &str) -> Result<TransportLookup> {
        let (source, destination) = (source.trim(), destination.trim());
        if source.is_empty() || destination.is_empty() {
            return Err(TripLensError::validation(MISSING_ENDPOINTS_MESSAGE));
        }

        let prompt = transport_prompt(source, destination);
        let (payload, error) = match self.generator.generate(&prompt).await {
            Ok(text) => match extract::extract_or_default(&text) {
                (payload, None) => (payload, None),
                (payload, Some(e)) => {
                    warn!("Could not extract transport options: {}", e);
                    (payload, Some(PARSE_FAILED_MESSAGE.to_string()))
                }
            },
            Err(e) => {
                warn!("Transport generation failed: {}", e);
                (ExtractedPayload::default(), Some(FETCH_FAILED_MESSAGE.to_string()))
            }
        };

        let notices = TransportMode::ALL
            .into_iter()
            .filter(|mode| payload.options(*mode).is_empty())
            .map(|mode| ModeNotice {
                mode,
                message: empty_mode_message(mode, source, destination),
            })
            .collect();

        info!(
            "Found {} flights, {} trains, {} buses",
            payload.flights.len(),
            payload.trains.len(),
            payload.buses.len()
        );

        Ok(TransportLookup {
            source: source.to_string(),
            destination: destination.to_string(),
            payload,
            error,
            notices,
        })
    }

    /// Look up options for a stored trip's source and destination
    pub async fn lookup_for_trip(&self, trip: &TripRecord) -> Result<TransportLookup> {
        let selection = &trip.user_selection;
        let source = selection.source.as_ref().map_or("", SelectedPlace::label);
        let destination = selection.location.as_ref().map_or("", SelectedPlace::label);
        self.lookup(source, destination).await
    }
}
