use crate::entry::EntryDraft;
use crate::error::EditorResult;
use membersort_domain::{OrderListError, default_order, join_order_list, parse_order_list};
use tracing::{debug, warn};

/// Structured entry editor the list editor defers to on Add and Edit.
///
/// Given a seed draft, return the confirmed draft, or `None` when the user cancels.
pub trait EntryPrompt {
    fn prompt(&mut self, seed: EntryDraft) -> Option<EntryDraft>;
}

impl<F> EntryPrompt for F
where
    F: FnMut(EntryDraft) -> Option<EntryDraft>,
{
    fn prompt(&mut self, seed: EntryDraft) -> Option<EntryDraft> {
        self(seed)
    }
}

/// Mutable order list of one edit session, with a single-item selection.
///
/// Index-based operations ignore out-of-range indices and return `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListEditor {
    entries: Vec<String>,
    selection: Option<usize>,
}

impl OrderListEditor {
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self {
            entries,
            selection: None,
        }
    }

    /// Start a session from the persisted list.
    ///
    /// A missing list starts from the built-in order. A malformed one does too, and the parse
    /// error is handed back so the caller can report it.
    pub fn load(persisted: Option<&str>) -> (Self, Option<OrderListError>) {
        let Some(persisted) = persisted else {
            return (Self::from_entries(default_order()), None);
        };

        match parse_order_list(persisted) {
            Ok(entries) => (Self::from_entries(entries), None),
            Err(e) => {
                warn!("stored order list is malformed ({}), editing the built-in order", e);
                (Self::from_entries(default_order()), Some(e))
            }
        }
    }

    /// Serialize the list for persistence.
    pub fn commit(&self) -> EditorResult<String> {
        Ok(join_order_list(&self.entries)?)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected_entry(&self) -> Option<&str> {
        self.selection
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    /// Change the selection. Returns `false` and keeps the old selection if `index` is out of range.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.entries.len() => false,
            _ => {
                self.selection = index;
                true
            }
        }
    }

    /// Insert a composed entry after the selection, or at the top with nothing selected.
    ///
    /// Returns the index of the new entry. The selection is left where it was.
    pub fn add(&mut self, draft: &EntryDraft) -> EditorResult<usize> {
        let entry = draft.compose()?;
        let index = self.selection.map_or(0, |i| i + 1);
        debug!(index, entry = %entry, "add order entry");
        self.entries.insert(index, entry);
        Ok(index)
    }

    /// Seed for editing the entry at `index`.
    pub fn begin_edit(&self, index: usize) -> Option<EntryDraft> {
        self.entries.get(index).map(|e| EntryDraft::parse(e))
    }

    /// Replace the entry at `index` in place and select it, as the list editor does after a
    /// dialog closes.
    pub fn edit(&mut self, index: usize, draft: &EntryDraft) -> EditorResult<bool> {
        if index >= self.entries.len() {
            return Ok(false);
        }
        let entry = draft.compose()?;
        debug!(index, entry = %entry, "edit order entry");
        self.entries[index] = entry;
        self.selection = Some(index);
        Ok(true)
    }

    /// Delete the entry at `index`.
    ///
    /// The selection lands on the same position, or on the new last entry when the last one
    /// was removed; an emptied list has no selection.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        let removed = self.entries.remove(index);
        debug!(index, entry = %removed, "remove order entry");
        self.selection = if self.entries.is_empty() {
            None
        } else {
            Some(index.min(self.entries.len() - 1))
        };
        true
    }

    /// Swap the entry at `index` with its predecessor. The selection follows it.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index - 1);
        self.selection = Some(index - 1);
        true
    }

    /// Swap the entry at `index` with its successor. The selection follows it.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.entries.len() || index + 1 == self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        self.selection = Some(index + 1);
        true
    }

    pub fn can_remove(&self) -> bool {
        self.selected_entry().is_some()
    }

    pub fn can_edit(&self) -> bool {
        self.selected_entry().is_some()
    }

    pub fn can_move_up(&self) -> bool {
        matches!(self.selection, Some(i) if i > 0 && i < self.entries.len())
    }

    pub fn can_move_down(&self) -> bool {
        matches!(self.selection, Some(i) if i < self.entries.len().saturating_sub(1))
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.selection {
            Some(i) => self.remove(i),
            None => false,
        }
    }

    pub fn move_selected_up(&mut self) -> bool {
        match self.selection {
            Some(i) => self.move_up(i),
            None => false,
        }
    }

    pub fn move_selected_down(&mut self) -> bool {
        match self.selection {
            Some(i) => self.move_down(i),
            None => false,
        }
    }

    /// Add pressed: prompt from the default draft and insert unless cancelled.
    pub fn add_with(&mut self, prompt: &mut impl EntryPrompt) -> EditorResult<Option<usize>> {
        match prompt.prompt(EntryDraft::default()) {
            Some(draft) => self.add(&draft).map(Some),
            None => Ok(None),
        }
    }

    /// Edit pressed: prompt from the selected entry and replace it unless cancelled.
    pub fn edit_selected_with(&mut self, prompt: &mut impl EntryPrompt) -> EditorResult<bool> {
        let Some(index) = self.selection else {
            return Ok(false);
        };
        let Some(seed) = self.begin_edit(index) else {
            return Ok(false);
        };
        match prompt.prompt(seed) {
            Some(draft) => self.edit(index, &draft),
            None => Ok(false),
        }
    }

    /// Replace the list with the built-in order and clear the selection.
    pub fn reset_to_default(&mut self) {
        self.entries = default_order();
        self.selection = None;
    }
}
