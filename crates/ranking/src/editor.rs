//! Draft and applied filter state.

use crate::selection::{DistanceSort, FilterSelection, RatingSort};
use tracing::debug;

/// Holds the applied selection that drives ranking, plus an optional draft
/// being edited on the filter surface.
///
/// Draft edits never reach [`FilterEditor::applied`] until
/// [`commit`](FilterEditor::commit); [`discard`](FilterEditor::discard)
/// throws the draft away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEditor {
    applied: FilterSelection,
    draft: Option<FilterSelection>,
}

impl FilterEditor {
    /// Creates an editor with the given applied selection and no draft.
    #[must_use]
    pub fn new(applied: FilterSelection) -> Self {
        Self {
            applied,
            draft: None,
        }
    }

    /// The committed selection.
    #[must_use]
    pub fn applied(&self) -> &FilterSelection {
        &self.applied
    }

    /// The in-progress selection, if the filter surface is open.
    #[must_use]
    pub fn draft(&self) -> Option<&FilterSelection> {
        self.draft.as_ref()
    }

    /// True while a draft exists.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Starts (or restarts) editing from the applied selection.
    pub fn open(&mut self) {
        self.draft = Some(self.applied.clone());
    }

    fn draft_mut(&mut self) -> &mut FilterSelection {
        self.draft.get_or_insert_with(|| self.applied.clone())
    }

    /// Toggles a rating direction in the draft, clearing the opposite one.
    ///
    /// Opens the draft if it is not open yet. Returns the new draft value.
    pub fn toggle_rating(&mut self, pick: RatingSort) -> RatingSort {
        let draft = self.draft_mut();
        draft.rating = draft.rating.toggled(pick);
        draft.rating
    }

    /// Toggles a distance direction in the draft, clearing the opposite one.
    pub fn toggle_distance(&mut self, pick: DistanceSort) -> DistanceSort {
        let draft = self.draft_mut();
        draft.distance = draft.distance.toggled(pick);
        draft.distance
    }

    /// Toggles a required facility in the draft. Returns true if now required.
    pub fn toggle_facility(&mut self, facility: &str) -> bool {
        self.draft_mut().facilities.toggle(facility)
    }

    /// Resets the draft to the default selection.
    pub fn clear_draft(&mut self) {
        self.draft = Some(FilterSelection::default());
    }

    /// Makes the draft the applied selection and closes the surface.
    ///
    /// Returns true when the applied selection changed. Without an open
    /// draft this is a no-op.
    pub fn commit(&mut self) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };
        let changed = draft != self.applied;
        debug!(changed, ?draft, "Committing filter selection");
        self.applied = draft;
        changed
    }

    /// Closes the surface without touching the applied selection.
    pub fn discard(&mut self) {
        if self.draft.take().is_some() {
            debug!("Discarded filter draft");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_copies_applied() {
        let mut applied = FilterSelection::default();
        applied.rating = RatingSort::Lowest;
        let mut editor = FilterEditor::new(applied.clone());

        editor.open();
        assert_eq!(editor.draft(), Some(&applied));
    }

    #[test]
    fn test_draft_does_not_leak_before_commit() {
        let mut editor = FilterEditor::default();
        editor.open();
        editor.toggle_rating(RatingSort::Highest);
        editor.toggle_facility("AC");

        assert_eq!(editor.applied(), &FilterSelection::default());
        assert!(editor.commit());
        assert_eq!(editor.applied().rating, RatingSort::Highest);
        assert!(editor.applied().facilities.contains("ac"));
        assert!(!editor.is_open());
    }

    #[test]
    fn test_discard_keeps_applied() {
        let mut editor = FilterEditor::default();
        editor.open();
        editor.toggle_distance(DistanceSort::Nearest);
        editor.discard();

        assert_eq!(editor.applied(), &FilterSelection::default());
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_rating_toggle_clears_sibling_immediately() {
        let mut editor = FilterEditor::default();
        editor.open();
        assert_eq!(editor.toggle_rating(RatingSort::Highest), RatingSort::Highest);
        assert_eq!(editor.toggle_rating(RatingSort::Lowest), RatingSort::Lowest);
        assert_eq!(editor.draft().map(|d| d.rating), Some(RatingSort::Lowest));
        assert_eq!(editor.toggle_rating(RatingSort::Highest), RatingSort::Highest);
    }

    #[test]
    fn test_reopen_discards_previous_draft() {
        let mut editor = FilterEditor::default();
        editor.open();
        editor.toggle_facility("toilet");
        editor.open();
        assert_eq!(editor.draft(), Some(&FilterSelection::default()));
    }

    #[test]
    fn test_commit_without_draft_is_noop() {
        let mut editor = FilterEditor::default();
        assert!(!editor.commit());
    }

    #[test]
    fn test_commit_unchanged_reports_false() {
        let mut editor = FilterEditor::default();
        editor.open();
        assert!(!editor.commit());
    }

    #[test]
    fn test_clear_draft() {
        let mut applied = FilterSelection::default();
        applied.facilities.insert("wifi");
        let mut editor = FilterEditor::new(applied);
        editor.open();
        editor.clear_draft();
        assert!(editor.commit());
        assert!(editor.applied().is_default());
    }
}
