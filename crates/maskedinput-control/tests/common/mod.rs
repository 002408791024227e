// Shared by several integration test binaries; each one uses a different
// subset, which rustc's per-binary dead code analysis can't see.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use maskedinput_control::{
    ChangeEvent, ControlError, IndexedSelection, Selection, TextControl, TextRange,
    TextRangeSelection,
};

pub const PHONE: &str = "(999) 999-9999";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionApi {
    Indexed,
    TextRange,
}

/// In-memory text control that behaves like a browser input.
///
/// Programmatic `set_value` moves the caret to the end, as browsers do, so
/// tests notice when the controller forgets to restore it.
#[derive(Debug)]
pub struct FakeControl {
    pub value: String,
    pub selection: Selection,
    pub focused: bool,
    pub visible: bool,
    api: SelectionApi,
    pub selection_reads: Cell<usize>,
    pub selection_writes: usize,
    pub value_writes: usize,
}

impl FakeControl {
    pub fn indexed() -> Self {
        Self::with_api(SelectionApi::Indexed)
    }

    pub fn text_range() -> Self {
        Self::with_api(SelectionApi::TextRange)
    }

    /// Not rendered: every selection call fails.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::indexed()
        }
    }

    fn with_api(api: SelectionApi) -> Self {
        Self {
            value: String::new(),
            selection: Selection::default(),
            focused: false,
            visible: true,
            api,
            selection_reads: Cell::new(0),
            selection_writes: 0,
            value_writes: 0,
        }
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// The user moves the caret or drags a selection.
    pub fn user_select(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamp(self.len());
    }

    /// The control edits its own text, leaving the caret at `caret`.
    pub fn native_replace(&mut self, value: &str, caret: usize) {
        self.value = value.to_string();
        self.selection = Selection::caret(caret).clamp(self.len());
    }

    /// Forward delete of the selection, or of the character after the caret.
    pub fn native_delete_forward(&mut self) {
        let Selection { start, end } = self.selection;
        let end = if start == end { (end + 1).min(self.len()) } else { end };
        self.remove(start, end);
    }

    /// Cut the selection, returning what was removed.
    pub fn native_cut(&mut self) -> String {
        let Selection { start, end } = self.selection;
        let cut: String = self.value.chars().skip(start).take(end - start).collect();
        self.remove(start, end);
        cut
    }

    fn remove(&mut self, start: usize, end: usize) {
        self.value = self
            .value
            .chars()
            .enumerate()
            .filter(|(i, _)| *i < start || *i >= end)
            .map(|(_, c)| c)
            .collect();
        self.selection = Selection::caret(start);
    }

    fn check_visible(&self) -> Result<(), ControlError> {
        if self.visible {
            Ok(())
        } else {
            Err(ControlError::NotVisible)
        }
    }

    fn check_focused(&self) -> Result<(), ControlError> {
        self.check_visible()?;
        if self.focused {
            Ok(())
        } else {
            Err(ControlError::NotFocused)
        }
    }
}

impl TextControl for FakeControl {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.selection = Selection::caret(self.len());
        self.value_writes += 1;
    }

    fn focus(&mut self) -> Result<(), ControlError> {
        self.check_visible()?;
        self.focused = true;
        Ok(())
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn indexed_selection(&mut self) -> Option<&mut dyn IndexedSelection> {
        match self.api {
            SelectionApi::Indexed => Some(self),
            SelectionApi::TextRange => None,
        }
    }

    fn text_range_selection(&mut self) -> Option<&mut dyn TextRangeSelection> {
        match self.api {
            SelectionApi::TextRange => Some(self),
            SelectionApi::Indexed => None,
        }
    }
}

impl IndexedSelection for FakeControl {
    fn selection_start(&self) -> Result<usize, ControlError> {
        self.check_visible()?;
        self.selection_reads.set(self.selection_reads.get() + 1);
        Ok(self.selection.start)
    }

    fn selection_end(&self) -> Result<usize, ControlError> {
        self.check_visible()?;
        Ok(self.selection.end)
    }

    fn set_selection_range(&mut self, start: usize, end: usize) -> Result<(), ControlError> {
        self.check_visible()?;
        self.user_select(start, end);
        self.selection_writes += 1;
        Ok(())
    }
}

impl TextRangeSelection for FakeControl {
    fn create_text_range(&self) -> Result<TextRange, ControlError> {
        self.check_visible()?;
        Ok(TextRange::new(self.value.clone()))
    }

    fn active_range(&self) -> Result<TextRange, ControlError> {
        self.check_focused()?;
        self.selection_reads.set(self.selection_reads.get() + 1);
        Ok(TextRange::with_bounds(
            self.value.clone(),
            self.selection.start,
            self.selection.end,
        ))
    }

    fn select(&mut self, range: &TextRange) -> Result<(), ControlError> {
        self.check_focused()?;
        self.user_select(range.start(), range.end());
        self.selection_writes += 1;
        Ok(())
    }
}

/// Records every change notification.
pub fn recorder() -> (Rc<RefCell<Vec<ChangeEvent>>>, impl FnMut(&ChangeEvent) + 'static) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    (events, move |event: &ChangeEvent| sink.borrow_mut().push(event.clone()))
}
