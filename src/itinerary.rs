//! Day-keyed itinerary normalization
//!
//! Generated itineraries arrive as `{"day1": {"plan": [...]}, "day2": ...}`. Object key
//! order is not meaningful and string ordering puts `day10` before `day2`, so days are
//! parsed and sorted numerically before anything renders them.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{ItineraryDay, PlaceVisit};

const DAY_PREFIX: &str = "day";

/// Day number from a key like `day3`, `Day 3` or ` DAY03 `.
///
/// On failure returns the suffix after the `day` prefix that did not parse, or `None` when the
/// key has no `day` prefix at all. A bare `5` is not day 5.
fn parse_day_key(key: &str) -> Result<u32, Option<&str>> {
    let key = key.trim();
    match key.get(..DAY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DAY_PREFIX) => {
            let suffix = key[DAY_PREFIX.len()..].trim();
            suffix.parse::<u32>().map_err(|_| Some(suffix))
        }
        _ => Err(None),
    }
}

/// Plan entries of one day. Accepts `{"plan": [...]}` or a bare list.
fn plan_of(day: &Value) -> Vec<PlaceVisit> {
    let entries = match day {
        Value::Array(entries) => entries,
        Value::Object(fields) => match fields.get("plan") {
            Some(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect()
}

/// Reshape a day map into days ordered by day number.
///
/// Keys that share a day number are merged. Keys without a usable number come last,
/// in key order, numbered after the highest parsed day. They are labelled `Day {suffix}`
/// when the key had a `day` prefix and with the raw key otherwise.
#[must_use]
pub fn normalize(days: &Map<String, Value>) -> Vec<ItineraryDay> {
    let mut numbered: BTreeMap<u32, Vec<PlaceVisit>> = BTreeMap::new();
    let mut unparsed = Vec::new();

    for (key, day) in days {
        match parse_day_key(key) {
            Ok(index) => numbered.entry(index).or_default().extend(plan_of(day)),
            Err(suffix) => {
                debug!("Itinerary key '{}' has no day number", key);
                let label = match suffix {
                    Some(suffix) if !suffix.is_empty() => format!("Day {suffix}"),
                    _ => key.clone(),
                };
                unparsed.push((label, plan_of(day)));
            }
        }
    }

    // Parsed days fit in u32, so the u64 tail after them never wraps.
    let mut next_index = numbered.keys().next_back().map_or(0, |&day| u64::from(day));
    let mut normalized: Vec<ItineraryDay> = numbered
        .into_iter()
        .map(|(day, plan)| ItineraryDay {
            day_index: u64::from(day),
            label: format!("Day {day}"),
            plan,
        })
        .collect();

    for (label, plan) in unparsed {
        next_index += 1;
        normalized.push(ItineraryDay {
            day_index: next_index,
            label,
            plan,
        });
    }

    normalized
}

/// Normalize whatever shape the itinerary was stored in.
///
/// A day map goes through [`normalize`]. A list of `{ "day": .., "plan": [..] }` entries keeps
/// its order and is numbered from 1. Anything else is an empty itinerary.
#[must_use]
pub fn normalize_value(itinerary: &Value) -> Vec<ItineraryDay> {
    match itinerary {
        Value::Object(days) => normalize(days),
        Value::Array(entries) => entries
            .iter()
            .filter(|entry| entry.is_object())
            .zip(1u64..)
            .map(|(entry, day_index)| ItineraryDay {
                day_index,
                label: list_label(entry.get("day"), day_index),
                plan: plan_of(entry),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn list_label(day: Option<&Value>, day_index: u64) -> String {
    match day {
        Some(Value::String(label)) if !label.trim().is_empty() => label.trim().to_string(),
        Some(Value::Number(number)) => format!("Day {number}"),
        _ => format!("Day {day_index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn days(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn labels(days: &[ItineraryDay]) -> Vec<&str> {
        days.iter().map(|d| d.label.as_str()).collect()
    }

    #[rstest]
    #[case("day1", Ok(1))]
    #[case("day10", Ok(10))]
    #[case("Day 3", Ok(3))]
    #[case("  DAY07 ", Ok(7))]
    #[case("dayX", Err(Some("X")))]
    #[case("day", Err(Some("")))]
    #[case("day-1", Err(Some("-1")))]
    #[case("notes", Err(None))]
    #[case("5", Err(None))]
    fn test_parse_day_key(#[case] key: &str, #[case] expected: Result<u32, Option<&str>>) {
        assert_eq!(parse_day_key(key), expected);
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        let normalized = normalize(&days(json!({
            "day10": {"plan": []},
            "day2": {"plan": [{"place": "A"}]}
        })));

        assert_eq!(
            normalized,
            vec![
                ItineraryDay {
                    day_index: 2,
                    label: "Day 2".to_string(),
                    plan: vec![PlaceVisit::named("A")],
                },
                ItineraryDay {
                    day_index: 10,
                    label: "Day 10".to_string(),
                    plan: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_empty_map() {
        assert!(normalize(&Map::new()).is_empty());
    }

    #[test]
    fn test_missing_or_invalid_plan_defaults_to_empty() {
        let normalized = normalize(&days(json!({
            "day1": {},
            "day2": {"plan": "see you"},
            "day3": null,
            "day4": {"plan": ["not an object", {"placeName": "Baga Beach"}, 7]}
        })));

        assert_eq!(labels(&normalized), ["Day 1", "Day 2", "Day 3", "Day 4"]);
        assert!(normalized[..3].iter().all(|d| d.plan.is_empty()));
        assert_eq!(normalized[3].plan, vec![PlaceVisit::named("Baga Beach")]);
    }

    #[test]
    fn test_unparsed_keys_come_last() {
        let normalized = normalize(&days(json!({
            "day": {"plan": []},
            "day1": {"plan": []},
            "day3": {"plan": []},
            "dayX": {"plan": [{"place": "X"}]}
        })));

        let indices: Vec<u64> = normalized.iter().map(|d| d.day_index).collect();
        assert_eq!(indices, [1, 3, 4, 5]);
        assert_eq!(labels(&normalized), ["Day 1", "Day 3", "day", "Day X"]);
        assert_eq!(normalized[3].plan, vec![PlaceVisit::named("X")]);
    }

    #[test]
    fn test_duplicate_day_numbers_are_merged() {
        let normalized = normalize(&days(json!({
            "day01": {"plan": [{"place": "Fort Aguada"}]},
            "day1": {"plan": [{"place": "Calangute"}]},
            "Day 2": {"plan": []}
        })));

        // "Day 2" < "day01" < "day1" in key order
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].day_index, 1);
        assert_eq!(
            normalized[0].plan,
            vec![PlaceVisit::named("Fort Aguada"), PlaceVisit::named("Calangute")]
        );
        assert_eq!(normalized[1].label, "Day 2");
    }

    #[test]
    fn test_indices_are_unique_and_ascending() {
        let normalized = normalize(&days(json!({
            "day5": {}, "day12": {}, "day1": {}, "extra": {}, "day05": {}
        })));
        let indices: Vec<u64> = normalized.iter().map(|d| d.day_index).collect();
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(indices.last(), Some(&13));
    }

    #[test]
    fn test_largest_day_number_still_leaves_room_for_unparsed_keys() {
        let normalized = normalize(&days(json!({
            "day4294967295": {}, "dayX": {}, "dayY": {}
        })));

        let indices: Vec<u64> = normalized.iter().map(|d| d.day_index).collect();
        assert_eq!(indices, [4_294_967_295, 4_294_967_296, 4_294_967_297]);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(labels(&normalized), ["Day 4294967295", "Day X", "Day Y"]);
    }

    #[test]
    fn test_keys_without_day_prefix_keep_their_raw_label() {
        let normalized = normalize(&days(json!({
            "5": {"plan": [{"place": "Dudhsagar Falls"}]},
            "day1": {},
            "notes": {}
        })));

        let indices: Vec<u64> = normalized.iter().map(|d| d.day_index).collect();
        assert_eq!(indices, [1, 2, 3]);
        assert_eq!(labels(&normalized), ["Day 1", "5", "notes"]);
        assert_eq!(normalized[1].plan, vec![PlaceVisit::named("Dudhsagar Falls")]);
    }

    #[test]
    fn test_bare_list_as_day_value() {
        let normalized = normalize(&days(json!({"day1": [{"place": "Tiger Hill"}]})));
        assert_eq!(normalized[0].plan, vec![PlaceVisit::named("Tiger Hill")]);
    }

    #[test]
    fn test_normalize_value_list_shape() {
        let normalized = normalize_value(&json!([
            {"day": "Arrival", "plan": [{"place": "Mall Road"}]},
            "garbage",
            {"day": 2, "plan": []},
            {"plan": []}
        ]));

        assert_eq!(labels(&normalized), ["Arrival", "Day 2", "Day 3"]);
        let indices: Vec<u64> = normalized.iter().map(|d| d.day_index).collect();
        assert_eq!(indices, [1, 2, 3]);
    }

    #[test]
    fn test_normalize_value_other_shapes() {
        assert!(normalize_value(&Value::Null).is_empty());
        assert!(normalize_value(&json!("day1")).is_empty());
        assert_eq!(normalize_value(&json!({"day1": {}})).len(), 1);
    }
}
