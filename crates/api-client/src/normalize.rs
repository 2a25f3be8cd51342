//! Upstream payload normalisation.
//!
//! The recommendation and cafe endpoints have grown several spellings for
//! the same fields (`cafe_id` / `cafeId` / `id`, `latitude` / `lat`, ratings
//! as numbers or strings, facilities as a comma string or a list). Every
//! spelling is resolved here, once, into [`RecommendationRecord`] and
//! [`CafeDetail`]; nothing downstream looks at raw JSON.

use crate::error::{ApiError, ApiResult};
use kopi_geo::{parse_coordinate, parse_coordinate_component, parse_location_object, Coordinate};
use kopi_search::parse_facilities;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

const LIST_ENVELOPES: &[&str] = &["data", "recommendations", "results", "items"];
const ID_KEYS: &[&str] = &["cafe_id", "cafeId", "id_cafe", "id"];
const NAME_KEYS: &[&str] = &["name", "cafe_name", "cafeName", "nama_cafe"];
const ADDRESS_KEYS: &[&str] = &["address", "cafe_address", "alamat"];
const RATING_KEYS: &[&str] = &["rating", "avg_rating", "average_rating", "rating_avg"];
const SCORE_KEYS: &[&str] = &["score", "similarity", "relevance"];
const MENU_KEYS: &[&str] = &["matched_menu", "matchedMenu", "menu_matches"];
const FACILITY_KEYS: &[&str] = &["facilities", "facility", "fasilitas"];
const LATITUDE_KEYS: &[&str] = &["latitude", "lat"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "lng", "lon", "long"];
const LOCATION_KEYS: &[&str] = &["location", "coordinates", "geo"];

/// One entry of a user's recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Cafe identifier used for the detail lookup
    pub cafe_id: String,
    /// Display name; may be empty until enriched
    pub name: String,
    /// Street address; may be empty until enriched
    pub address: String,
    /// Average rating; 0 when absent or unreadable
    pub rating: f64,
    /// Relevance score; `None` when the recommender gave none
    pub score: Option<f64>,
    /// Menu items that matched the user's preferences
    pub matched_menu: Vec<String>,
}

/// Cafe attributes from the detail endpoint.
///
/// [`CafeDetail::default`] is the empty detail used when a lookup fails:
/// no facilities and an unknown location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CafeDetail {
    /// Display name, when the detail carries one
    pub name: Option<String>,
    /// Street address, when the detail carries one
    pub address: Option<String>,
    /// Average rating, when the detail carries a readable one
    pub rating: Option<f64>,
    /// Facility labels in upstream spelling
    pub facilities: Vec<String>,
    /// Cafe location; NaN components when unknown
    pub coordinate: Coordinate,
}

fn first<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    let n = parse_coordinate_component(value);
    n.is_finite().then_some(n)
}

fn labels(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => parse_facilities(s),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => first(obj, &["name", "label", "nama"]).and_then(text),
                other => text(other),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Unwraps `{"data": [...]}`-style envelopes down to the entry array.
fn entries(payload: &Value) -> ApiResult<&[Value]> {
    match payload {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Object(obj) => LIST_ENVELOPES
            .iter()
            .find_map(|key| obj.get(*key))
            .map_or_else(
                || Err(ApiError::malformed("recommendation payload has no entry list")),
                entries,
            ),
        other => Err(ApiError::malformed(format!(
            "expected a recommendation list, got {}",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads one recommendation entry.
///
/// Entries may nest the cafe under `"cafe"`; the nested object is consulted
/// after the entry itself. Returns `None` when no identifier can be found.
#[must_use]
pub fn normalize_recommendation(value: &Value) -> Option<RecommendationRecord> {
    let outer = value.as_object()?;
    let nested = outer.get("cafe").and_then(Value::as_object);
    let lookup = |keys: &[&str]| first(outer, keys).or_else(|| nested.and_then(|n| first(n, keys)));

    let cafe_id = lookup(ID_KEYS).and_then(text)?;

    Some(RecommendationRecord {
        cafe_id,
        name: lookup(NAME_KEYS).and_then(text).unwrap_or_default(),
        address: lookup(ADDRESS_KEYS).and_then(text).unwrap_or_default(),
        rating: lookup(RATING_KEYS).and_then(number).unwrap_or(0.0),
        score: first(outer, SCORE_KEYS).and_then(number),
        matched_menu: lookup(MENU_KEYS).map(labels).unwrap_or_default(),
    })
}

/// Reads a whole recommendation payload, skipping entries without an id.
///
/// # Errors
/// Returns [`ApiError::Malformed`] when no entry list can be found.
pub fn normalize_recommendations(payload: &Value) -> ApiResult<Vec<RecommendationRecord>> {
    let items = entries(payload)?;
    let records: Vec<RecommendationRecord> = items
        .iter()
        .filter_map(|item| {
            let record = normalize_recommendation(item);
            if record.is_none() {
                warn!(entry = %item, "Skipping recommendation without a cafe id");
            }
            record
        })
        .collect();
    Ok(records)
}

fn coordinate(obj: &Map<String, Value>) -> Coordinate {
    if let (Some(lat), Some(lng)) = (first(obj, LATITUDE_KEYS), first(obj, LONGITUDE_KEYS)) {
        return parse_coordinate(lat, lng);
    }
    first(obj, LOCATION_KEYS)
        .and_then(parse_location_object)
        .unwrap_or(Coordinate::UNKNOWN)
}

/// Reads a cafe detail payload.
///
/// Accepts the cafe object itself or a `{"data": {...}}` envelope. Anything
/// unreadable degrades to the empty detail rather than failing.
#[must_use]
pub fn normalize_cafe_detail(payload: &Value) -> CafeDetail {
    let Some(obj) = payload
        .get("data")
        .filter(|d| d.is_object())
        .unwrap_or(payload)
        .as_object()
    else {
        return CafeDetail::default();
    };

    CafeDetail {
        name: first(obj, NAME_KEYS).and_then(text),
        address: first(obj, ADDRESS_KEYS).and_then(text),
        rating: first(obj, RATING_KEYS).and_then(number),
        facilities: first(obj, FACILITY_KEYS).map(labels).unwrap_or_default(),
        coordinate: coordinate(obj),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_entry() {
        let record = normalize_recommendation(&json!({
            "cafe_id": 12,
            "name": "Kopi Kenangan",
            "rating": "4.5",
            "score": 0.91,
            "matched_menu": ["Es Kopi Susu", {"name": "Croissant"}]
        }))
        .unwrap();

        assert_eq!(record.cafe_id, "12");
        assert_eq!(record.name, "Kopi Kenangan");
        assert_eq!(record.rating, 4.5);
        assert_eq!(record.score, Some(0.91));
        assert_eq!(record.matched_menu, ["Es Kopi Susu", "Croissant"]);
    }

    #[test]
    fn test_nested_cafe_entry() {
        let record = normalize_recommendation(&json!({
            "similarity": 0.4,
            "cafe": {"id": "c-9", "cafeName": "Tuku", "alamat": "Cipete"}
        }))
        .unwrap();

        assert_eq!(record.cafe_id, "c-9");
        assert_eq!(record.name, "Tuku");
        assert_eq!(record.address, "Cipete");
        assert_eq!(record.score, Some(0.4));
    }

    #[test]
    fn test_missing_score_is_none_not_zero() {
        let record = normalize_recommendation(&json!({"id": 1})).unwrap();
        assert_eq!(record.score, None);
        assert_eq!(record.rating, 0.0);

        let record = normalize_recommendation(&json!({"id": 1, "score": 0})).unwrap();
        assert_eq!(record.score, Some(0.0));
    }

    #[test]
    fn test_unreadable_numbers() {
        let record =
            normalize_recommendation(&json!({"id": 1, "rating": "n/a", "score": "high"})).unwrap();
        assert_eq!(record.rating, 0.0);
        assert_eq!(record.score, None);
    }

    #[test]
    fn test_entry_without_id_is_skipped() {
        let records = normalize_recommendations(&json!([
            {"name": "no id"},
            {"id": 2, "name": "has id"}
        ]))
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cafe_id, "2");
    }

    #[test]
    fn test_envelopes() {
        let inner = json!([{"id": 1}, {"id": 2}]);
        for key in ["data", "recommendations", "results", "items"] {
            let mut envelope = Map::new();
            envelope.insert(key.to_string(), inner.clone());
            let payload = Value::Object(envelope);
            assert_eq!(normalize_recommendations(&payload).unwrap().len(), 2, "{key}");
        }
    }

    #[test]
    fn test_unrecognised_list_shape() {
        assert!(matches!(
            normalize_recommendations(&json!({"message": "ok"})),
            Err(ApiError::Malformed(_))
        ));
        assert!(matches!(
            normalize_recommendations(&json!("nope")),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_detail_with_string_coordinates_and_facility_string() {
        let detail = normalize_cafe_detail(&json!({
            "name": "Fore",
            "facilities": "Free Wi-Fi, Toilet, AC Full Ruangan",
            "latitude": "-6.2088",
            "longitude": "106,8456",
            "rating": 4.2
        }));

        assert_eq!(detail.name.as_deref(), Some("Fore"));
        assert_eq!(detail.facilities, ["Free Wi-Fi", "Toilet", "AC Full Ruangan"]);
        assert_eq!(detail.coordinate, Coordinate::new(-6.2088, 106.8456));
        assert_eq!(detail.rating, Some(4.2));
    }

    #[test]
    fn test_detail_in_envelope_with_geojson() {
        let detail = normalize_cafe_detail(&json!({
            "data": {
                "fasilitas": [{"name": "Musholla"}, "Parkir"],
                "location": {"type": "Point", "coordinates": [106.8, -6.2]}
            }
        }));

        assert_eq!(detail.facilities, ["Musholla", "Parkir"]);
        assert_eq!(detail.coordinate, Coordinate::new(-6.2, 106.8));
    }

    #[test]
    fn test_detail_missing_location_is_unknown() {
        let detail = normalize_cafe_detail(&json!({"name": "X", "lat": null}));
        assert!(!detail.coordinate.is_finite());
        assert!(detail.facilities.is_empty());
    }

    #[test]
    fn test_detail_garbage_is_empty() {
        let detail = normalize_cafe_detail(&json!(42));
        assert_eq!(detail.name, None);
        assert!(!detail.coordinate.is_finite());
    }
}
