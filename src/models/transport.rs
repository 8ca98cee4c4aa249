//! Transportation options recovered from generated text

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient::optional_text;

/// One flight, train or bus suggestion. Every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportOption {
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl TransportOption {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// The three transport lists. All of them are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPayload {
    pub flights: Vec<TransportOption>,
    pub trains: Vec<TransportOption>,
    pub buses: Vec<TransportOption>,
}

impl ExtractedPayload {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty() && self.trains.is_empty() && self.buses.is_empty()
    }

    #[must_use]
    pub fn options(&self, mode: TransportMode) -> &[TransportOption] {
        match mode {
            TransportMode::Flights => &self.flights,
            TransportMode::Trains => &self.trains,
            TransportMode::Buses => &self.buses,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flights,
    Trains,
    Buses,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [Self::Flights, Self::Trains, Self::Buses];

    /// Key used in the generated JSON
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Flights => "flights",
            Self::Trains => "trains",
            Self::Buses => "buses",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
