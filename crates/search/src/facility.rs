//! Facility tokens and subset matching.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Splits a comma-separated facility string into trimmed tokens.
///
/// Empty tokens are dropped; original casing is preserved for display.
///
/// ```
/// use kopi_search::parse_facilities;
///
/// assert_eq!(parse_facilities(" Free Wi-Fi, Toilet,,AC "), vec!["Free Wi-Fi", "Toilet", "AC"]);
/// assert!(parse_facilities("").is_empty());
/// ```
#[must_use]
pub fn parse_facilities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

fn normalize(token: &str) -> Option<String> {
    let trimmed = token.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// The set of facilities a user requires; every entry must be satisfied.
///
/// Tokens are stored trimmed and lowercased, so `"AC"` and `" ac "` are the
/// same requirement. Iteration order is alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilitySet(BTreeSet<String>);

impl FacilitySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a requirement. Returns false for blank or duplicate tokens.
    pub fn insert(&mut self, token: &str) -> bool {
        normalize(token).is_some_and(|t| self.0.insert(t))
    }

    /// Removes a requirement. Returns true if it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        normalize(token).is_some_and(|t| self.0.remove(&t))
    }

    /// Flips a requirement on or off. Returns true if it is now required.
    pub fn toggle(&mut self, token: &str) -> bool {
        let Some(t) = normalize(token) else {
            return false;
        };
        if self.0.remove(&t) {
            false
        } else {
            self.0.insert(t);
            true
        }
    }

    /// Returns true if the token is required.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        normalize(token).is_some_and(|t| self.0.contains(&t))
    }

    /// Returns true if nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of required facilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Drops every requirement.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates the normalised tokens.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for FacilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for token in iter {
            set.insert(token.as_ref());
        }
        set
    }
}

/// Matches many cafes against one requirement set.
#[derive(Debug, Clone)]
pub struct FacilityMatcher<'a> {
    required: &'a FacilitySet,
}

impl<'a> FacilityMatcher<'a> {
    /// Creates a matcher for the given requirements.
    #[must_use]
    pub fn new(required: &'a FacilitySet) -> Self {
        Self { required }
    }

    /// Returns true iff every requirement is a case-insensitive substring of
    /// at least one of the cafe's facility tokens.
    pub fn matches<S: AsRef<str>>(&self, facilities: &[S]) -> bool {
        if self.required.is_empty() {
            return true;
        }

        let lowered: Vec<String> = facilities
            .iter()
            .map(|f| f.as_ref().to_lowercase())
            .collect();

        self.required
            .iter()
            .all(|needle| lowered.iter().any(|hay| hay.contains(needle)))
    }
}

/// One-shot form of [`FacilityMatcher::matches`].
///
/// ```
/// use kopi_search::{matches_facilities, FacilitySet};
///
/// let cafe = ["AC Full Ruangan", "Free Wi-Fi"];
/// let required: FacilitySet = ["ac", "WI-FI"].into_iter().collect();
/// assert!(matches_facilities(&cafe, &required));
/// ```
pub fn matches_facilities<S: AsRef<str>>(facilities: &[S], required: &FacilitySet) -> bool {
    FacilityMatcher::new(required).matches(facilities)
}
