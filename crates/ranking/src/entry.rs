//! The ranking input record.

use kopi_geo::{Coordinate, DistanceResult};
use serde::Serialize;

/// A recommended cafe after enrichment.
///
/// Values are rebuilt on every enrichment pass; nothing mutates them in
/// place once ranking starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CafeEntry {
    /// Cafe identifier as issued by the API
    pub id: String,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Average rating; 0 when the cafe has none
    pub rating: f64,
    /// Relevance score from the recommender; `None` is distinct from zero
    pub score: Option<f64>,
    /// Facility labels, e.g. `"Free Wi-Fi"`
    pub facilities: Vec<String>,
    /// Cafe location; NaN components when unknown
    #[serde(skip)]
    pub coordinate: Coordinate,
    /// Menu items that matched the user's preferences (display only)
    pub matched_menu: Vec<String>,
    /// Distance from the user, when both locations are known
    pub distance: DistanceResult,
}

impl CafeEntry {
    /// Creates an entry with no rating, score, facilities or location.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            rating: 0.0,
            score: None,
            facilities: Vec::new(),
            coordinate: Coordinate::UNKNOWN,
            matched_menu: Vec::new(),
            distance: DistanceResult::Unavailable,
        }
    }

    /// Sets the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the relevance score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the facility labels.
    #[must_use]
    pub fn with_facilities<S: Into<String>>(mut self, facilities: impl IntoIterator<Item = S>) -> Self {
        self.facilities = facilities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = coordinate;
        self
    }

    /// Sets the distance from the user.
    #[must_use]
    pub fn with_distance(mut self, distance: DistanceResult) -> Self {
        self.distance = distance;
        self
    }
}

/// Recomputes every entry's distance from `origin` in one batch.
///
/// Without an origin every distance becomes unavailable.
pub fn locate_all(entries: &mut [CafeEntry], origin: Option<&Coordinate>) {
    let Some(origin) = origin else {
        for entry in entries.iter_mut() {
            entry.distance = DistanceResult::Unavailable;
        }
        return;
    };

    let targets: Vec<Coordinate> = entries.iter().map(|e| e.coordinate).collect();
    for (entry, distance) in entries.iter_mut().zip(kopi_geo::distances_from(origin, &targets)) {
        entry.distance = distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_defaults() {
        let cafe = CafeEntry::new("7", "Anomali");
        assert_eq!(cafe.rating, 0.0);
        assert!(cafe.score.is_none());
        assert!(!cafe.coordinate.is_finite());
        assert_eq!(cafe.distance, DistanceResult::Unavailable);
    }

    #[test]
    fn test_locate_all() {
        let mut cafes = vec![
            CafeEntry::new("1", "A").with_coordinate(Coordinate::new(0.0, 0.0)),
            CafeEntry::new("2", "B"),
            CafeEntry::new("3", "C").with_coordinate(Coordinate::new(0.0, 0.01)),
        ];
        locate_all(&mut cafes, Some(&Coordinate::new(0.0, 0.0)));

        assert_eq!(cafes[0].distance, DistanceResult::Meters(0.0));
        assert_eq!(cafes[0].distance.to_string(), "0 m");
        assert_eq!(cafes[1].distance, DistanceResult::Unavailable);
        let meters = cafes[2].distance.meters().unwrap();
        assert!((meters - 1_112.0).abs() < 1.0, "{meters}");
    }

    #[test]
    fn test_locate_all_without_origin_clears_distances() {
        let mut cafes = vec![CafeEntry::new("1", "A")
            .with_coordinate(Coordinate::new(0.0, 0.0))
            .with_distance(DistanceResult::Meters(5.0))];
        locate_all(&mut cafes, None);
        assert_eq!(cafes[0].distance, DistanceResult::Unavailable);
    }

    #[test]
    fn test_serialize_hides_coordinate() {
        let cafe = CafeEntry::new("1", "A").with_score(0.5);
        let json = serde_json::to_value(&cafe).unwrap();
        assert!(json.get("coordinate").is_none());
        assert_eq!(json["distance"], serde_json::Value::Null);
        assert_eq!(json["score"], 0.5);
    }
}
