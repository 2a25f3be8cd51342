//! Sort and filter choices.

use kopi_search::FacilitySet;
use serde::{Deserialize, Serialize};

/// Rating sort direction; the two directions cannot both be active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSort {
    /// Rating does not affect order
    #[default]
    None,
    /// Best rated first
    Highest,
    /// Worst rated first
    Lowest,
}

/// Distance sort direction; only meaningful when the user location is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSort {
    /// Distance does not affect order
    #[default]
    None,
    /// Closest first
    Nearest,
    /// Farthest first
    Farthest,
}

impl RatingSort {
    /// Checkbox semantics: picking the active direction clears it, picking
    /// the other direction replaces it.
    #[must_use]
    pub fn toggled(self, pick: Self) -> Self {
        if self == pick { Self::None } else { pick }
    }
}

impl DistanceSort {
    /// Checkbox semantics, as for [`RatingSort::toggled`].
    #[must_use]
    pub fn toggled(self, pick: Self) -> Self {
        if self == pick { Self::None } else { pick }
    }
}

/// A complete filter/sort configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Rating sort direction
    #[serde(default)]
    pub rating: RatingSort,
    /// Distance sort direction
    #[serde(default)]
    pub distance: DistanceSort,
    /// Facilities every shown cafe must offer
    #[serde(default)]
    pub facilities: FacilitySet,
}

impl FilterSelection {
    /// The selection with distance sorting dropped when location is unknown.
    #[must_use]
    pub fn effective(&self, location_known: bool) -> Self {
        let mut effective = self.clone();
        if !location_known {
            effective.distance = DistanceSort::None;
        }
        effective
    }

    /// True when no sort direction and no facility filter is active.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.rating == RatingSort::None
            && self.distance == DistanceSort::None
            && self.facilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_toggle_is_exclusive() {
        let mut rating = RatingSort::None;
        rating = rating.toggled(RatingSort::Highest);
        assert_eq!(rating, RatingSort::Highest);
        rating = rating.toggled(RatingSort::Lowest);
        assert_eq!(rating, RatingSort::Lowest);
        rating = rating.toggled(RatingSort::Lowest);
        assert_eq!(rating, RatingSort::None);
    }

    #[test]
    fn test_distance_toggle_is_exclusive() {
        let distance = DistanceSort::Nearest.toggled(DistanceSort::Farthest);
        assert_eq!(distance, DistanceSort::Farthest);
        assert_eq!(distance.toggled(DistanceSort::Farthest), DistanceSort::None);
    }

    #[test]
    fn test_distance_inert_without_location() {
        let selection = FilterSelection {
            distance: DistanceSort::Nearest,
            ..Default::default()
        };
        assert_eq!(selection.effective(false).distance, DistanceSort::None);
        assert_eq!(selection.effective(true).distance, DistanceSort::Nearest);
        assert!(selection.effective(false).is_default());
    }

    #[test]
    fn test_facility_filter_is_not_default() {
        let mut selection = FilterSelection::default();
        assert!(selection.is_default());
        selection.facilities.insert("wifi");
        assert!(!selection.is_default());
    }

    #[test]
    fn test_deserialize_partial() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{"rating": "highest", "facilities": ["ac"]}"#).unwrap();
        assert_eq!(selection.rating, RatingSort::Highest);
        assert_eq!(selection.distance, DistanceSort::None);
        assert!(selection.facilities.contains("AC"));
    }
}
