//! Batch distance calculations with optional parallelism.

use crate::{distance_between, Coordinate, DistanceResult};

/// Calculate the distance from `origin` to every target, preserving order.
///
/// An unusable origin yields `Unavailable` for every target.
///
/// # Example
/// ```
/// use kopi_geo::{distances_from, Coordinate, DistanceResult};
///
/// let me = Coordinate::new(0.0, 0.0);
/// let cafes = [Coordinate::new(0.0, 0.0), Coordinate::UNKNOWN];
///
/// let results = distances_from(&me, &cafes);
/// assert_eq!(results, vec![DistanceResult::Meters(0.0), DistanceResult::Unavailable]);
/// ```
#[must_use]
pub fn distances_from(origin: &Coordinate, targets: &[Coordinate]) -> Vec<DistanceResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        targets
            .par_iter()
            .map(|target| distance_between(origin, target))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        targets
            .iter()
            .map(|target| distance_between(origin, target))
            .collect()
    }
}
