//! Cafe ranking for the recommendation and home views.
//!
//! The pipeline is: keep cafes whose facilities satisfy the selection, order
//! them with a composite comparator (rating, then distance, then relevance
//! score), and keep the first [`DEFAULT_TOP_N`].
//!
//! # Example
//!
//! ```
//! use kopi_ranking::{CafeEntry, FilterSelection, RankingEngine, RatingSort};
//!
//! let cafes = vec![
//!     CafeEntry::new("1", "Kopi Kenangan").with_rating(4.5).with_score(0.9),
//!     CafeEntry::new("2", "Tuku").with_rating(4.8),
//!     CafeEntry::new("3", "Fore").with_rating(3.0).with_score(0.99),
//! ];
//!
//! let engine = RankingEngine::default();
//! let by_score = engine.rank(&cafes, &FilterSelection::default(), false);
//! assert_eq!(ids(&by_score), ["3", "1", "2"]);
//!
//! let mut selection = FilterSelection::default();
//! selection.rating = RatingSort::Highest;
//! let by_rating = engine.rank(&cafes, &selection, false);
//! assert_eq!(ids(&by_rating), ["2", "1", "3"]);
//!
//! fn ids(cafes: &[CafeEntry]) -> Vec<&str> {
//!     cafes.iter().map(|c| c.id.as_str()).collect()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod compare;
mod editor;
mod engine;
mod entry;
mod selection;

pub use editor::FilterEditor;
pub use engine::{RankingEngine, DEFAULT_TOP_N};
pub use entry::{locate_all, CafeEntry};
pub use selection::{DistanceSort, FilterSelection, RatingSort};

pub use kopi_geo::{Coordinate, DistanceResult};
pub use kopi_search::FacilitySet;
