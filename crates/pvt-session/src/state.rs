//! Per-element UI states
//!
//! ```text
//! Cell:      Viewing --click--> Editing --blur|Enter--> (commit) Viewing
//!                                       --Escape-----> Viewing
//! Row label: Viewing --edit--> Renaming --Enter--> (validate+commit) Viewing
//!                                       --Escape-> Viewing
//! Add verb:  Idle --submit--> Submitting --all translations settled--> Idle
//! ```

use crate::keys::CellKey;

/// State of one matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Showing the stored meaning
    Viewing,
    /// Input open
    Editing,
    /// Waiting for a translation; not clickable
    Loading,
}

/// State of one row label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLabelState {
    /// Showing the verb
    Viewing,
    /// Rename input open
    Renaming,
}

/// State of the add-verb control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddVerbState {
    /// Ready for input
    Idle,
    /// Input disabled while translations for `verb` are fetched
    Submitting {
        /// Verb being added
        verb: String,
    },
}

/// Selectors shared by all elements of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UiState {
    pub(crate) editing_cell: Option<CellKey>,
    pub(crate) renaming: Option<String>,
    pub(crate) add_verb: AddVerbState,
}

impl UiState {
    pub(crate) fn new() -> Self {
        Self {
            editing_cell: None,
            renaming: None,
            add_verb: AddVerbState::Idle,
        }
    }

    /// Drop selectors pointing at `verb`
    pub(crate) fn forget_verb(&mut self, verb: &str) {
        if self.editing_cell.as_ref().is_some_and(|k| k.verb == verb) {
            self.editing_cell = None;
        }
        if self.renaming.as_deref() == Some(verb) {
            self.renaming = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forget_verb_clears_matching_selectors_only() {
        let mut ui = UiState::new();
        ui.editing_cell = Some(CellKey::new("Ask", 2));
        ui.renaming = Some("Be".into());

        ui.forget_verb("Ask");
        assert_eq!(ui.editing_cell, None);
        assert_eq!(ui.renaming.as_deref(), Some("Be"));

        ui.forget_verb("Be");
        assert_eq!(ui.renaming, None);
    }
}
