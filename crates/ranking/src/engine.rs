//! Filter, sort, truncate.

use crate::compare::{by_score_desc, composite};
use crate::entry::CafeEntry;
use crate::selection::FilterSelection;
use kopi_search::FacilityMatcher;
use tracing::debug;

/// Number of cafes a ranked view shows.
pub const DEFAULT_TOP_N: usize = 6;

/// Orders enriched cafes for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingEngine {
    top_n: usize,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl RankingEngine {
    /// Creates an engine that keeps at most `top_n` cafes.
    #[must_use]
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Maximum number of cafes returned by [`rank`](Self::rank).
    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Ranks cafes for the given selection.
    ///
    /// 1. Drops cafes missing any required facility.
    /// 2. With no active sort or filter, orders by relevance score
    ///    (unscored last). Otherwise orders by rating, then distance, then
    ///    score, each stage breaking only the ties left by the previous one.
    ///    Distance sorting is ignored when `location_known` is false.
    /// 3. Keeps the first `top_n`.
    ///
    /// The sort is stable, so cafes equal on every key keep input order.
    #[must_use]
    pub fn rank(
        &self,
        entries: &[CafeEntry],
        selection: &FilterSelection,
        location_known: bool,
    ) -> Vec<CafeEntry> {
        let effective = selection.effective(location_known);
        let matcher = FacilityMatcher::new(&effective.facilities);

        let mut kept: Vec<CafeEntry> = entries
            .iter()
            .filter(|cafe| matcher.matches(&cafe.facilities))
            .cloned()
            .collect();

        if effective.is_default() {
            kept.sort_by(by_score_desc);
        } else {
            kept.sort_by(composite(&effective));
        }

        debug!(
            input = entries.len(),
            matched = kept.len(),
            top_n = self.top_n,
            default_order = effective.is_default(),
            "Ranked cafes"
        );

        kept.truncate(self.top_n);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{DistanceSort, RatingSort};
    use kopi_geo::DistanceResult;
    use proptest::prelude::*;

    fn ids(cafes: &[CafeEntry]) -> Vec<&str> {
        cafes.iter().map(|c| c.id.as_str()).collect()
    }

    fn scenario() -> Vec<CafeEntry> {
        vec![
            CafeEntry::new("1", "One").with_rating(4.5).with_score(0.9),
            CafeEntry::new("2", "Two").with_rating(4.8),
            CafeEntry::new("3", "Three").with_rating(3.0).with_score(0.99),
        ]
    }

    #[test]
    fn test_default_orders_by_score_with_unscored_last() {
        let ranked = RankingEngine::default().rank(&scenario(), &FilterSelection::default(), true);
        assert_eq!(ids(&ranked), ["3", "1", "2"]);
    }

    #[test]
    fn test_rating_highest() {
        let selection = FilterSelection {
            rating: RatingSort::Highest,
            ..Default::default()
        };
        let ranked = RankingEngine::default().rank(&scenario(), &selection, true);
        assert_eq!(ids(&ranked), ["2", "1", "3"]);
    }

    #[test]
    fn test_rating_lowest() {
        let selection = FilterSelection {
            rating: RatingSort::Lowest,
            ..Default::default()
        };
        let ranked = RankingEngine::default().rank(&scenario(), &selection, true);
        assert_eq!(ids(&ranked), ["3", "1", "2"]);
    }

    #[test]
    fn test_equal_ratings_tie_break_on_score() {
        let cafes = vec![
            CafeEntry::new("a", "A").with_rating(4.0),
            CafeEntry::new("b", "B").with_rating(4.0).with_score(0.2),
            CafeEntry::new("c", "C").with_rating(4.0).with_score(0.7),
        ];
        let selection = FilterSelection {
            rating: RatingSort::Highest,
            ..Default::default()
        };
        let ranked = RankingEngine::default().rank(&cafes, &selection, false);
        assert_eq!(ids(&ranked), ["c", "b", "a"]);
    }

    #[test]
    fn test_nearest_with_unavailable_last() {
        let cafes = vec![
            CafeEntry::new("far", "Far").with_distance(DistanceResult::Meters(3000.0)),
            CafeEntry::new("unknown", "Unknown").with_score(1.0),
            CafeEntry::new("near", "Near").with_distance(DistanceResult::Meters(50.0)),
        ];
        let selection = FilterSelection {
            distance: DistanceSort::Nearest,
            ..Default::default()
        };
        let ranked = RankingEngine::default().rank(&cafes, &selection, true);
        assert_eq!(ids(&ranked), ["near", "far", "unknown"]);

        let selection = FilterSelection {
            distance: DistanceSort::Farthest,
            ..Default::default()
        };
        let ranked = RankingEngine::default().rank(&cafes, &selection, true);
        assert_eq!(ids(&ranked), ["far", "near", "unknown"]);
    }

    #[test]
    fn test_distance_sort_ignored_without_location() {
        let cafes = vec![
            CafeEntry::new("a", "A").with_score(0.1).with_distance(DistanceResult::Meters(1.0)),
            CafeEntry::new("b", "B").with_score(0.9).with_distance(DistanceResult::Meters(900.0)),
        ];
        let selection = FilterSelection {
            distance: DistanceSort::Nearest,
            ..Default::default()
        };
        let ranked = RankingEngine::default().rank(&cafes, &selection, false);
        assert_eq!(ids(&ranked), ["b", "a"]);
    }

    #[test]
    fn test_facility_filter_excludes_non_matching() {
        let cafes = vec![
            CafeEntry::new("1", "One").with_facilities(["Free Wi-Fi", "Toilet"]),
            CafeEntry::new("2", "Two").with_facilities(["AC Full Ruangan"]),
        ];
        let mut selection = FilterSelection::default();
        selection.facilities.insert("AC");

        let ranked = RankingEngine::default().rank(&cafes, &selection, false);
        assert_eq!(ids(&ranked), ["2"]);
    }

    #[test]
    fn test_filter_matching_nothing_is_empty() {
        let cafes: Vec<CafeEntry> = (0..10)
            .map(|i| {
                CafeEntry::new(i.to_string(), format!("Cafe {i}"))
                    .with_score(f64::from(i) / 10.0)
                    .with_facilities(["Toilet"])
            })
            .collect();
        let mut selection = FilterSelection::default();
        selection.facilities.insert("rooftop");

        assert!(RankingEngine::default().rank(&cafes, &selection, true).is_empty());
    }

    #[test]
    fn test_truncates_to_six() {
        let cafes: Vec<CafeEntry> = (0..10)
            .map(|i| CafeEntry::new(i.to_string(), "c").with_score(f64::from(i)))
            .collect();
        let ranked = RankingEngine::default().rank(&cafes, &FilterSelection::default(), false);
        assert_eq!(ids(&ranked), ["9", "8", "7", "6", "5", "4"]);
    }

    #[test]
    fn test_custom_top_n() {
        let ranked = RankingEngine::new(2).rank(&scenario(), &FilterSelection::default(), false);
        assert_eq!(ranked.len(), 2);
    }

    fn arb_cafe() -> impl Strategy<Value = CafeEntry> {
        (
            0.0f64..=5.0,
            prop::option::of(0.0f64..=1.0),
            prop::option::of(0.0f64..20_000.0),
            prop::sample::subsequence(vec!["Free Wi-Fi", "Toilet", "AC", "Parkir"], 0..=4),
        )
            .prop_map(|(rating, score, meters, facilities)| {
                let mut cafe = CafeEntry::new("p", "p")
                    .with_rating(rating)
                    .with_distance(meters.into())
                    .with_facilities(facilities);
                cafe.score = score;
                cafe
            })
    }

    fn arb_selection() -> impl Strategy<Value = FilterSelection> {
        (
            prop::sample::select(vec![RatingSort::None, RatingSort::Highest, RatingSort::Lowest]),
            prop::sample::select(vec![DistanceSort::None, DistanceSort::Nearest, DistanceSort::Farthest]),
            prop::sample::subsequence(vec!["wi-fi", "toilet", "ac"], 0..=2),
        )
            .prop_map(|(rating, distance, facilities)| FilterSelection {
                rating,
                distance,
                facilities: facilities.into_iter().collect(),
            })
    }

    proptest! {
        #[test]
        fn prop_length_is_min_of_six_and_matches(
            cafes in prop::collection::vec(arb_cafe(), 0..20),
            selection in arb_selection(),
            location_known in any::<bool>(),
        ) {
            let matcher = FacilityMatcher::new(&selection.facilities);
            let passing = cafes.iter().filter(|c| matcher.matches(&c.facilities)).count();
            let ranked = RankingEngine::default().rank(&cafes, &selection, location_known);
            prop_assert_eq!(ranked.len(), passing.min(DEFAULT_TOP_N));
        }

        #[test]
        fn prop_default_is_score_descending_with_unscored_last(
            cafes in prop::collection::vec(arb_cafe(), 0..20),
        ) {
            let ranked = RankingEngine::new(usize::MAX).rank(&cafes, &FilterSelection::default(), true);
            for pair in ranked.windows(2) {
                match (pair[0].score, pair[1].score) {
                    (Some(a), Some(b)) => prop_assert!(a >= b),
                    (None, Some(_)) => prop_assert!(false, "unscored before scored"),
                    _ => {}
                }
            }
        }

        #[test]
        fn prop_deterministic(
            cafes in prop::collection::vec(arb_cafe(), 0..20),
            selection in arb_selection(),
        ) {
            let cafes: Vec<CafeEntry> = cafes
                .into_iter()
                .enumerate()
                .map(|(i, mut cafe)| {
                    cafe.id = i.to_string();
                    cafe
                })
                .collect();
            let engine = RankingEngine::default();
            let first = engine.rank(&cafes, &selection, true);
            let second = engine.rank(&cafes, &selection, true);
            prop_assert_eq!(ids(&first), ids(&second));
        }
    }
}
