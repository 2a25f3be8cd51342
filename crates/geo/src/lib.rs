//! Geospatial helpers for cafe ranking.
//!
//! This crate provides:
//! - Haversine distance in meters, total over invalid input
//! - A typed [`DistanceResult`] and its display format
//! - Lenient coordinate parsing for loosely-typed API payloads
//! - Batch distance computation with optional parallelism
//!
//! # Example
//!
//! ```
//! use kopi_geo::{distance_between, Coordinate};
//!
//! let monas = Coordinate::new(-6.1754, 106.8272);
//! let kota_tua = Coordinate::new(-6.1352, 106.8133);
//!
//! let distance = distance_between(&monas, &kota_tua);
//! assert_eq!(distance.to_string(), "4.73 km");
//! ```

mod haversine;
mod format;
mod parse;
pub mod batch;
mod error;

pub use haversine::{distance_between, haversine_distance_meters, EARTH_RADIUS_M};
pub use format::{format_distance, DistanceResult};
pub use parse::{parse_coordinate, parse_coordinate_component, parse_location_object};
pub use batch::distances_from;
pub use error::{GeoError, Result};

/// A geographic coordinate with latitude and longitude in degrees.
///
/// Missing or unparseable components are stored as NaN rather than 0, so an
/// absent location can never masquerade as the Gulf of Guinea.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Coordinate with both components missing.
    pub const UNKNOWN: Self = Self {
        latitude: f64::NAN,
        longitude: f64::NAN,
    };

    /// Creates a new coordinate without validation.
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidCoordinate`] when either component is
    /// non-finite or outside the valid degree range.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({latitude}, {longitude})")))
        }
    }

    /// Returns true if both components are finite numbers.
    ///
    /// This is the only precondition for distance computation.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Returns true if the coordinate is finite and within degree bounds.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
