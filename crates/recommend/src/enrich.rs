//! All-settled gathering and entry assembly.

use futures::future::join_all;
use kopi_api_client::{CafeDetail, RecommendationRecord};
use kopi_ranking::CafeEntry;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Outcome of one task in an all-settled batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    /// The task produced a value
    Fulfilled(T),
    /// The task failed or ran out of time; carries the reason
    Degraded(String),
}

impl<T> Settled<T> {
    /// True when the task failed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

impl<T: Default> Settled<T> {
    /// The value, or the type's empty default when the task failed.
    pub fn into_value(self) -> T {
        match self {
            Self::Fulfilled(value) => value,
            Self::Degraded(_) => T::default(),
        }
    }
}

/// Runs every task concurrently, each bounded by `limit`, and waits for all
/// of them. Output order matches input order; one failure never affects the
/// others.
pub async fn settle_all<I, F, T, E>(tasks: I, limit: Duration) -> Vec<Settled<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    join_all(tasks.into_iter().map(|task| async move {
        match timeout(limit, task).await {
            Ok(Ok(value)) => Settled::Fulfilled(value),
            Ok(Err(err)) => Settled::Degraded(err.to_string()),
            Err(_) => Settled::Degraded(format!("timed out after {limit:?}")),
        }
    }))
    .await
}

/// Combines a recommendation with its detail into a rankable entry.
///
/// The list supplies identity, score and matched menu; the detail supplies
/// facilities and location, and fills in name, address and rating when the
/// list left them blank. The distance is left unavailable; see
/// [`kopi_ranking::locate_all`].
#[must_use]
pub fn assemble(record: &RecommendationRecord, detail: &CafeDetail) -> CafeEntry {
    let name = if record.name.is_empty() {
        detail.name.clone().unwrap_or_default()
    } else {
        record.name.clone()
    };
    let address = if record.address.is_empty() {
        detail.address.clone().unwrap_or_default()
    } else {
        record.address.clone()
    };
    let rating = match detail.rating {
        Some(rating) if record.rating == 0.0 => rating,
        _ => record.rating,
    };

    let mut entry = CafeEntry::new(record.cafe_id.clone(), name)
        .with_address(address)
        .with_rating(rating)
        .with_facilities(detail.facilities.iter().cloned())
        .with_coordinate(detail.coordinate);
    entry.score = record.score;
    entry.matched_menu.clone_from(&record.matched_menu);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use kopi_geo::{Coordinate, DistanceResult};

    fn record(id: &str) -> RecommendationRecord {
        RecommendationRecord {
            cafe_id: id.to_string(),
            name: String::new(),
            address: String::new(),
            rating: 0.0,
            score: None,
            matched_menu: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_settle_all_keeps_order_and_isolates_failures() {
        async fn task(outcome: Result<i32, String>) -> Result<i32, String> {
            outcome
        }
        let tasks = vec![task(Ok(1)), task(Err("boom".to_string())), task(Ok(3))];

        let settled = settle_all(tasks, Duration::from_secs(1)).await;
        assert_eq!(
            settled,
            vec![
                Settled::Fulfilled(1),
                Settled::Degraded("boom".to_string()),
                Settled::Fulfilled(3)
            ]
        );
    }

    #[tokio::test]
    async fn test_settle_all_times_out_slow_tasks() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, String>(1)
        };
        let settled = settle_all([slow], Duration::from_millis(20)).await;
        assert!(settled[0].is_degraded());
    }

    #[test]
    fn test_degraded_defaults() {
        let detail = Settled::<CafeDetail>::Degraded("x".into()).into_value();
        assert!(detail.facilities.is_empty());
        assert!(!detail.coordinate.is_finite());
    }

    #[test]
    fn test_assemble_prefers_list_fields() {
        let mut rec = record("1");
        rec.name = "Listed".into();
        rec.rating = 4.0;
        rec.score = Some(0.5);
        let detail = CafeDetail {
            name: Some("Detailed".into()),
            rating: Some(3.0),
            facilities: vec!["Toilet".into()],
            coordinate: Coordinate::new(0.0, 0.0),
            ..CafeDetail::default()
        };

        let entry = assemble(&rec, &detail);
        assert_eq!(entry.name, "Listed");
        assert_eq!(entry.rating, 4.0);
        assert_eq!(entry.score, Some(0.5));
        assert_eq!(entry.facilities, ["Toilet"]);
        assert_eq!(entry.coordinate, Coordinate::new(0.0, 0.0));
        assert_eq!(entry.distance, DistanceResult::Unavailable);
    }

    #[test]
    fn test_assemble_fills_blanks_from_detail() {
        let detail = CafeDetail {
            name: Some("Detailed".into()),
            address: Some("Jl. Sabang".into()),
            rating: Some(3.5),
            ..CafeDetail::default()
        };

        let entry = assemble(&record("1"), &detail);
        assert_eq!(entry.name, "Detailed");
        assert_eq!(entry.address, "Jl. Sabang");
        assert_eq!(entry.rating, 3.5);
        assert_eq!(entry.distance, DistanceResult::Unavailable);
    }

    #[test]
    fn test_assemble_degraded_entry_has_unknown_location() {
        let entry = assemble(&record("1"), &CafeDetail::default());
        assert!(entry.facilities.is_empty());
        assert!(!entry.coordinate.is_finite());
    }
}
