//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
///
/// Distance computation itself never fails; these errors only come from
/// strict constructors and parsers used at input boundaries.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A coordinate component could not be read as a number
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}
