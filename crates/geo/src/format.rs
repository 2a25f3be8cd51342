//! Distance results and their human-readable form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance from the user to a cafe.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum DistanceResult {
    /// Great-circle distance in meters
    Meters(f64),
    /// Either endpoint is missing or invalid
    #[default]
    Unavailable,
}

impl DistanceResult {
    /// Wraps a raw meter value; non-finite input becomes `Unavailable`.
    #[must_use]
    pub fn from_meters(meters: f64) -> Self {
        if meters.is_finite() {
            Self::Meters(meters)
        } else {
            Self::Unavailable
        }
    }

    /// The distance in meters, if known.
    #[must_use]
    pub fn meters(&self) -> Option<f64> {
        match *self {
            Self::Meters(m) => Some(m),
            Self::Unavailable => None,
        }
    }

    /// Returns true if a distance is known.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Meters(_))
    }
}

impl From<Option<f64>> for DistanceResult {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::from_meters)
    }
}

impl From<DistanceResult> for Option<f64> {
    fn from(value: DistanceResult) -> Self {
        value.meters()
    }
}

impl fmt::Display for DistanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_distance(self.meters().unwrap_or(f64::NAN)))
    }
}

/// Formats a distance for display.
///
/// Values that round to under 1000 m are shown in whole meters; anything
/// else is shown in kilometers with two decimals.
///
/// ```
/// use kopi_geo::format_distance;
///
/// assert_eq!(format_distance(0.0), "0 m");
/// assert_eq!(format_distance(999.4), "999 m");
/// assert_eq!(format_distance(999.6), "1.00 km");
/// assert_eq!(format_distance(1000.0), "1.00 km");
/// assert_eq!(format_distance(f64::NAN), "unavailable");
/// ```
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() {
        "unavailable".to_string()
    } else if meters.round() < 1000.0 {
        format!("{:.0} m", meters.round())
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}
