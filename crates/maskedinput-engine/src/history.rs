//! Undo/redo history for [`InputMask`](crate::InputMask).
//!
//! Entries store the value and selection *before* an edit. Consecutive edits
//! of the same kind made at a continuing collapsed caret are grouped into a
//! single entry, so undo removes a typed run rather than one character.
//! Starting to undo from a state that is not in the history pushes that state
//! first (flagged `start_undo`) so redo can return to it.

use crate::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Input,
    Backspace,
}

#[derive(Debug, Clone, PartialEq)]
struct HistoryEntry {
    value: String,
    selection: Selection,
    last_op: Option<EditKind>,
    start_undo: bool,
}

/// A state restored by undo or redo.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub value: String,
    pub selection: Selection,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Position while undoing; `None` when at the live state.
    index: Option<usize>,
    last_op: Option<EditKind>,
    last_selection: Option<Selection>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_undoing(&self) -> bool {
        self.index.is_some()
    }

    /// Record an accepted edit.
    pub fn record(
        &mut self,
        kind: EditKind,
        value_before: String,
        selection_before: Selection,
        selection_after: Selection,
    ) {
        // New edits after undoing discard the redo branch
        if let Some(index) = self.index.take() {
            self.entries.truncate(index);
        }

        let continues_run = self.last_op == Some(kind)
            && selection_before.is_collapsed()
            && self
                .last_selection
                .is_none_or(|last| last.start == selection_before.start);

        if !continues_run {
            self.entries.push(HistoryEntry {
                value: value_before,
                selection: selection_before,
                last_op: self.last_op,
                start_undo: false,
            });
        }

        self.last_op = Some(kind);
        self.last_selection = Some(selection_after);
    }

    pub fn undo(&mut self, current_value: &str, current_selection: Selection) -> Option<Restored> {
        if self.entries.is_empty() || self.index == Some(0) {
            return None;
        }

        let entry = match self.index {
            None => {
                let index = self.entries.len() - 1;
                self.index = Some(index);
                let entry = self.entries[index].clone();
                if entry.value != current_value || entry.selection != current_selection {
                    self.entries.push(HistoryEntry {
                        value: current_value.to_string(),
                        selection: current_selection,
                        last_op: self.last_op,
                        start_undo: true,
                    });
                }
                entry
            }
            Some(index) => {
                self.index = Some(index - 1);
                self.entries[index - 1].clone()
            }
        };

        self.last_op = entry.last_op;
        Some(Restored {
            value: entry.value,
            selection: entry.selection,
        })
    }

    pub fn redo(&mut self) -> Option<Restored> {
        let index = self.index?;
        let next = index + 1;
        let Some(entry) = self.entries.get(next).cloned() else {
            self.index = None;
            return None;
        };

        if next == self.entries.len() - 1 {
            self.index = None;
            if entry.start_undo {
                self.entries.pop();
            }
        } else {
            self.index = Some(next);
        }

        self.last_op = entry.last_op;
        Some(Restored {
            value: entry.value,
            selection: entry.selection,
        })
    }
}
