//! Lenient coordinate parsing for loosely-typed API payloads.
//!
//! Upstream services send coordinates as JSON numbers, numeric strings
//! (sometimes with a comma decimal separator), nested objects, or not at
//! all. Everything that cannot be read becomes NaN.

use crate::{Coordinate, GeoError, Result};
use serde_json::Value;

/// Reads one coordinate component, yielding NaN when it is missing or invalid.
///
/// # Example
/// ```
/// use kopi_geo::parse_coordinate_component;
/// use serde_json::json;
///
/// assert_eq!(parse_coordinate_component(&json!(-6.2)), -6.2);
/// assert_eq!(parse_coordinate_component(&json!(" 106,8 ")), 106.8);
/// assert!(parse_coordinate_component(&json!(null)).is_nan());
/// assert!(parse_coordinate_component(&json!("")).is_nan());
/// ```
#[must_use]
pub fn parse_coordinate_component(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_decimal(s).unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Builds a coordinate from separate latitude and longitude values.
#[must_use]
pub fn parse_coordinate(latitude: &Value, longitude: &Value) -> Coordinate {
    Coordinate::new(
        parse_coordinate_component(latitude),
        parse_coordinate_component(longitude),
    )
}

/// Reads a coordinate from an object-shaped location field.
///
/// Supported shapes:
/// - GeoJSON: `{"type": "Point", "coordinates": [lng, lat]}`
/// - `{"lat": .., "lng": ..}` (also `lon` / `long`)
/// - `{"latitude": .., "longitude": ..}`
///
/// Returns `None` when the value has none of these shapes.
#[must_use]
pub fn parse_location_object(value: &Value) -> Option<Coordinate> {
    let obj = value.as_object()?;

    if let Some(coords) = obj.get("coordinates").and_then(Value::as_array) {
        if let [lng, lat, ..] = coords.as_slice() {
            return Some(parse_coordinate(lat, lng));
        }
    }

    let lat = obj.get("latitude").or_else(|| obj.get("lat"))?;
    let lng = ["longitude", "lng", "lon", "long"]
        .iter()
        .find_map(|key| obj.get(*key))?;

    Some(parse_coordinate(lat, lng))
}

/// Parses a decimal number, accepting a comma as decimal separator.
fn parse_decimal(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GeoError::InvalidNumber("empty string".into()));
    }

    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };

    normalized
        .parse::<f64>()
        .map_err(|_| GeoError::InvalidNumber(raw.to_string()))
}
