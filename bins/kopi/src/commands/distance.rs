//! Point-to-point distance

use crate::Format;
use anyhow::Result;
use kopi_geo::{distance_between, Coordinate, DistanceResult};

/// Print the haversine distance between two points
pub fn run(lat1: f64, lng1: f64, lat2: f64, lng2: f64, format: Format) -> Result<()> {
    let distance = distance_between(&Coordinate::new(lat1, lng1), &Coordinate::new(lat2, lng2));
    match format {
        Format::Json => println!("{}", serde_json::to_string(&distance)?),
        Format::Text => println!("{distance}"),
    }
    if let DistanceResult::Unavailable = distance {
        tracing::debug!(lat1, lng1, lat2, lng2, "Distance unavailable for non-finite input");
    }
    Ok(())
}
