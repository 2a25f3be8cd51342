//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::{Coordinate, DistanceResult};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in meters.
///
/// Returns NaN when any of the four components is non-finite. The function
/// never panics and never substitutes zero for a missing component.
///
/// # Example
/// ```
/// use kopi_geo::{haversine_distance_meters, Coordinate};
///
/// let here = Coordinate::new(0.0, 0.0);
/// assert_eq!(haversine_distance_meters(&here, &here), 0.0);
/// assert!(haversine_distance_meters(&here, &Coordinate::UNKNOWN).is_nan());
/// ```
#[inline]
#[must_use]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    if !from.is_finite() || !to.is_finite() {
        return f64::NAN;
    }

    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Typed distance between two coordinates.
#[inline]
#[must_use]
pub fn distance_between(from: &Coordinate, to: &Coordinate) -> DistanceResult {
    DistanceResult::from_meters(haversine_distance_meters(from, to))
}
