//! Forgiving field deserializers for generated JSON
//!
//! Generative output mixes strings, numbers and nested objects for what should be
//! plain text fields. These helpers coerce what they can and drop the rest.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a scalar JSON value into text. Arrays and objects are discarded.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

/// Like [`optional_text`], but also understands `{ "latitude": .., "longitude": .. }`
/// objects and `[lat, lon]` pairs.
pub fn optional_coordinates<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coordinates_text))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coordinates_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            let lat = map.get("latitude").or_else(|| map.get("lat"))?;
            let lon = map
                .get("longitude")
                .or_else(|| map.get("lng"))
                .or_else(|| map.get("lon"))?;
            Some(format!("{}, {}", scalar_text(lat)?, scalar_text(lon)?))
        }
        Value::Array(pair) if pair.len() == 2 => Some(format!(
            "{}, {}",
            scalar_text(&pair[0])?,
            scalar_text(&pair[1])?
        )),
        other => scalar_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "optional_text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "optional_coordinates")]
        geo: Option<String>,
    }

    fn probe(value: Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_scalars_become_text() {
        assert_eq!(probe(json!({"text": "4.5"})).text.as_deref(), Some("4.5"));
        assert_eq!(probe(json!({"text": 4.5})).text.as_deref(), Some("4.5"));
        assert_eq!(probe(json!({"text": true})).text.as_deref(), Some("true"));
    }

    #[test]
    fn test_nested_and_missing_values_are_dropped() {
        assert_eq!(probe(json!({"text": {"a": 1}})).text, None);
        assert_eq!(probe(json!({"text": null})).text, None);
        assert_eq!(probe(json!({})).text, None);
    }

    #[test]
    fn test_coordinate_shapes() {
        let obj = probe(json!({"geo": {"latitude": 27.17, "longitude": 78.04}}));
        assert_eq!(obj.geo.as_deref(), Some("27.17, 78.04"));

        let short = probe(json!({"geo": {"lat": 1, "lng": 2}}));
        assert_eq!(short.geo.as_deref(), Some("1, 2"));

        let pair = probe(json!({"geo": [10.5, 76.2]}));
        assert_eq!(pair.geo.as_deref(), Some("10.5, 76.2"));

        let text = probe(json!({"geo": "27.1751° N, 78.0421° E"}));
        assert_eq!(text.geo.as_deref(), Some("27.1751° N, 78.0421° E"));
    }
}
