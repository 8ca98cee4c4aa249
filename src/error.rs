//! Error types and handling for `TripLens`

use thiserror::Error;

/// Main error type for the `TripLens` library
#[derive(Error, Debug)]
pub enum TripLensError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input rejected before any request was sent
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Network or HTTP failure talking to an upstream service
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Upstream text did not contain a usable JSON payload
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Every lookup attempt came back empty
    #[error("Not found: {message}")]
    NotFound { message: String },
}

/// Failure modes when recovering JSON from generative text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("no JSON object found in response")]
    NoJsonFound,

    /// The candidate was found but did not parse. `raw` keeps the full response text.
    #[error("malformed JSON in response: {message}")]
    MalformedJson { raw: String, message: String },
}

impl TripLensError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Get a user-facing message paired with a retry affordance
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripLensError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripLensError::Validation { message } => format!("Invalid input: {message}"),
            TripLensError::Transport { .. } => {
                "Failed to fetch data from the travel service. Please try again.".to_string()
            }
            TripLensError::Extraction(_) => {
                "Failed to parse the generated data. Please try again.".to_string()
            }
            TripLensError::NotFound { .. } => "Nothing found for this search.".to_string(),
        }
    }
}

impl From<reqwest::Error> for TripLensError {
    fn from(err: reqwest::Error) -> Self {
        TripLensError::transport(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for TripLensError {
    fn from(err: reqwest_middleware::Error) -> Self {
        TripLensError::transport(err.to_string())
    }
}
