/// Selection state for the per-date list
///
/// Plain click selects one word (or deselects it if it was the only one).
/// Modifier click toggles a word in or out of the set.

use crate::db::{Timestamp, WordRecord};
use crate::error::{Result, WordCalendarError};
use std::collections::HashSet;

/// Where the selection stands, derived from how many words are picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Single(Timestamp),
    Multi(usize),
}

/// What the confirmation step shows, and what it would delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPrompt {
    pub message: String,
    pub targets: HashSet<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    // Click order; the first entry names the word in a single-word prompt
    selected: Vec<Timestamp>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match self.selected.as_slice() {
            [] => SelectionState::Idle,
            [only] => SelectionState::Single(*only),
            many => SelectionState::Multi(many.len()),
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.selected.contains(&timestamp)
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.selected
    }

    /// Handle a click on the record identified by `timestamp`
    pub fn click(&mut self, timestamp: Timestamp, multi: bool) -> SelectionState {
        if multi {
            if let Some(index) = self.selected.iter().position(|&t| t == timestamp) {
                self.selected.remove(index);
            } else {
                self.selected.push(timestamp);
            }
        } else {
            let only_this = self.selected.len() == 1 && self.selected[0] == timestamp;
            self.selected.clear();
            if !only_this {
                self.selected.push(timestamp);
            }
        }

        self.state()
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }

    /// Label for the delete control
    pub fn button_label(&self) -> String {
        match self.selected.len() {
            0 => "Delete selected".to_string(),
            n => format!("Delete selected ({})", n),
        }
    }

    /// Build the confirmation for deleting the current selection.
    ///
    /// A single selected word is named verbatim; otherwise the count is.
    pub fn prompt(&self, records: &[WordRecord]) -> Result<DeletionPrompt> {
        let Some(&first) = self.selected.first() else {
            return Err(WordCalendarError::EmptySelection);
        };

        let count = self.selected.len();
        let named = records
            .iter()
            .find(|r| r.timestamp == first)
            .filter(|_| count == 1);

        let message = match named {
            Some(record) => format!("Delete the selected word \"{}\"?", record.word),
            None => format!("Delete the selected {} words?", count),
        };

        Ok(DeletionPrompt {
            message,
            targets: self.selected.iter().copied().collect(),
        })
    }
}
