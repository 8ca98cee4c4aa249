//! Recover structured payloads from generative text
//!
//! Model output usually wraps its JSON in prose or a fenced code block. Extraction
//! looks for a fenced block first, then for the widest `{ ... }` span, parses the
//! candidate and normalizes it to a fixed schema.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::{ExtractedPayload, TransportMode, TransportOption};

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```[A-Za-z0-9_+-]*[ \t]*\r?\n?([\s\S]*?)```").expect("fenced block pattern")
});

/// Locate the JSON candidate inside free text
fn json_candidate(raw: &str) -> Option<&str> {
    if let Some(inner) = FENCED_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| !inner.is_empty())
    {
        return Some(inner);
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Find and parse the JSON value embedded in `raw`
pub fn extract_json(raw: &str) -> Result<Value, ExtractionError> {
    let candidate = json_candidate(raw).ok_or(ExtractionError::NoJsonFound)?;
    serde_json::from_str(candidate).map_err(|e| {
        warn!("Failed to parse JSON candidate: {}", e);
        ExtractionError::MalformedJson {
            raw: raw.to_string(),
            message: e.to_string(),
        }
    })
}

/// Extract the flights/trains/buses payload. Missing or non-array lists become empty.
pub fn extract(raw: &str) -> Result<ExtractedPayload, ExtractionError> {
    let value = extract_json(raw)?;
    Ok(normalize_payload(&value))
}

/// Extraction with the caller-side fallback applied: on failure the payload is empty
/// and the error is handed back for a retry prompt.
pub fn extract_or_default(raw: &str) -> (ExtractedPayload, Option<ExtractionError>) {
    match extract(raw) {
        Ok(payload) => (payload, None),
        Err(e) => (ExtractedPayload::default(), Some(e)),
    }
}

/// Map an already parsed value onto the three-list schema
#[must_use]
pub fn normalize_payload(value: &Value) -> ExtractedPayload {
    let empty = Map::new();
    let object = value.as_object().unwrap_or(&empty);
    ExtractedPayload {
        flights: options_for(object, TransportMode::Flights),
        trains: options_for(object, TransportMode::Trains),
        buses: options_for(object, TransportMode::Buses),
    }
}

fn options_for(object: &Map<String, Value>, mode: TransportMode) -> Vec<TransportOption> {
    let Some(items) = object.get(mode.key()).and_then(Value::as_array) else {
        debug!("No {} list in payload", mode);
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(option) => Some(option),
            Err(e) => {
                debug!("Dropping unreadable {} entry: {}", mode, e);
                None
            }
        })
        .collect()
}
