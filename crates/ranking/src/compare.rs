//! Total orderings over cafe fields.
//!
//! Every comparator here is total: NaN ratings sort as the lowest rating,
//! NaN or missing scores sort below every real score, and unavailable
//! distances sort last in both directions.

use crate::entry::CafeEntry;
use crate::selection::{DistanceSort, FilterSelection, RatingSort};
use std::cmp::Ordering;

fn rating_key(cafe: &CafeEntry) -> f64 {
    if cafe.rating.is_nan() { f64::NEG_INFINITY } else { cafe.rating }
}

fn score_key(cafe: &CafeEntry) -> Option<f64> {
    cafe.score.filter(|s| !s.is_nan())
}

/// Relevance score, highest first; missing scores last.
pub(crate) fn by_score_desc(a: &CafeEntry, b: &CafeEntry) -> Ordering {
    match (score_key(a), score_key(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_rating(a: &CafeEntry, b: &CafeEntry, sort: RatingSort) -> Ordering {
    match sort {
        RatingSort::None => Ordering::Equal,
        RatingSort::Highest => rating_key(b).total_cmp(&rating_key(a)),
        RatingSort::Lowest => rating_key(a).total_cmp(&rating_key(b)),
    }
}

fn by_distance(a: &CafeEntry, b: &CafeEntry, sort: DistanceSort) -> Ordering {
    if sort == DistanceSort::None {
        return Ordering::Equal;
    }
    match (a.distance.meters(), b.distance.meters()) {
        (Some(x), Some(y)) if sort == DistanceSort::Nearest => x.total_cmp(&y),
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rating, then distance, then score; each stage only breaks earlier ties.
pub(crate) fn composite(selection: &FilterSelection) -> impl Fn(&CafeEntry, &CafeEntry) -> Ordering + '_ {
    move |a, b| {
        by_rating(a, b, selection.rating)
            .then_with(|| by_distance(a, b, selection.distance))
            .then_with(|| by_score_desc(a, b))
    }
}
