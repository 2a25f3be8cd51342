//! Facility vocabulary for filter menus.

use std::collections::BTreeMap;

/// Collects the distinct facility labels across many cafes.
///
/// Labels are de-duplicated case-insensitively, the first spelling seen is
/// kept, and the result is sorted case-insensitively.
///
/// ```
/// use kopi_search::facility_vocabulary;
///
/// let cafes = vec![vec!["Toilet", "Free Wi-Fi"], vec!["toilet", "AC"]];
/// assert_eq!(facility_vocabulary(&cafes), vec!["AC", "Free Wi-Fi", "Toilet"]);
/// ```
pub fn facility_vocabulary<L, S>(cafes: &[L]) -> Vec<String>
where
    L: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for label in cafes.iter().flat_map(|c| c.as_ref().iter()) {
        let display = label.as_ref().trim();
        if display.is_empty() {
            continue;
        }
        seen.entry(display.to_lowercase())
            .or_insert_with(|| display.to_string());
    }
    seen.into_values().collect()
}
