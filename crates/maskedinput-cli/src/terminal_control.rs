use maskedinput_control::{ControlError, IndexedSelection, Selection, TextControl};

/// A one-line text field drawn in the terminal.
///
/// It owns the native behaviour a browser input would provide and the
/// controller leaves alone: caret motion, shift selection, forward delete
/// and a process local clipboard.
#[derive(Debug, Default)]
pub struct TerminalControl {
    value: String,
    anchor: usize,
    head: usize,
    focused: bool,
    clipboard: String,
}

impl TerminalControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    /// The end of the selection that moves with the caret keys.
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn move_to(&mut self, at: usize, extend: bool) {
        self.head = at.min(self.len());
        if !extend {
            self.anchor = self.head;
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        let selection = self.selection();
        if !extend && !selection.is_collapsed() {
            self.move_to(selection.start, false);
        } else {
            self.move_to(self.head.saturating_sub(1), extend);
        }
    }

    pub fn move_right(&mut self, extend: bool) {
        let selection = self.selection();
        if !extend && !selection.is_collapsed() {
            self.move_to(selection.end, false);
        } else {
            self.move_to(self.head + 1, extend);
        }
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = self.len();
    }

    /// Remove the selection, or the character after the caret.
    pub fn delete_forward(&mut self) -> bool {
        let selection = self.selection();
        let end = if selection.is_collapsed() {
            (selection.end + 1).min(self.len())
        } else {
            selection.end
        };
        if end == selection.start {
            return false;
        }
        self.remove(selection.start, end);
        true
    }

    pub fn copy(&mut self) {
        let selection = self.selection();
        if !selection.is_collapsed() {
            self.clipboard = self.slice(selection);
        }
    }

    pub fn cut(&mut self) -> bool {
        let selection = self.selection();
        if selection.is_collapsed() {
            return false;
        }
        self.clipboard = self.slice(selection);
        self.remove(selection.start, selection.end);
        true
    }

    fn slice(&self, selection: Selection) -> String {
        self.value
            .chars()
            .skip(selection.start)
            .take(selection.len())
            .collect()
    }

    fn remove(&mut self, start: usize, end: usize) {
        self.value = self
            .value
            .chars()
            .enumerate()
            .filter(|(i, _)| *i < start || *i >= end)
            .map(|(_, c)| c)
            .collect();
        self.move_to(start, false);
    }
}

impl TextControl for TerminalControl {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        let len = self.len();
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
    }

    fn focus(&mut self) -> Result<(), ControlError> {
        self.focused = true;
        Ok(())
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn indexed_selection(&mut self) -> Option<&mut dyn IndexedSelection> {
        Some(self)
    }
}

impl IndexedSelection for TerminalControl {
    fn selection_start(&self) -> Result<usize, ControlError> {
        Ok(self.selection().start)
    }

    fn selection_end(&self) -> Result<usize, ControlError> {
        Ok(self.selection().end)
    }

    fn set_selection_range(&mut self, start: usize, end: usize) -> Result<(), ControlError> {
        let len = self.len();
        self.anchor = start.min(len);
        self.head = end.min(len);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn control(value: &str) -> TerminalControl {
        let mut control = TerminalControl::new();
        control.set_value(value);
        control
    }

    #[test]
    fn shift_motion_extends_selection() {
        let mut control = control("(555) 123");
        control.move_to(1, false);
        control.move_right(true);
        control.move_right(true);

        assert_eq!(control.selection(), Selection::new(1, 3));

        control.move_left(false);
        assert_eq!(control.selection(), Selection::caret(1));
    }

    #[test]
    fn selecting_backwards_normalizes() {
        let mut control = control("abcdef");
        control.move_to(4, false);
        control.move_left(true);
        control.move_left(true);

        assert_eq!(control.selection(), Selection::new(2, 4));
        assert_eq!(control.head(), 2);
    }

    #[test]
    fn delete_forward_removes_next_character() {
        let mut control = control("(555) 123");
        control.move_to(6, false);

        assert!(control.delete_forward());
        assert_eq!(control.value(), "(555) 23");
        assert_eq!(control.selection(), Selection::caret(6));

        control.move_to(8, false);
        assert!(!control.delete_forward());
    }

    #[test]
    fn cut_fills_the_clipboard() {
        let mut control = control("(555) 123");
        control.move_to(1, false);
        control.move_to(4, true);

        assert!(control.cut());
        assert_eq!(control.clipboard(), "555");
        assert_eq!(control.value(), "() 123");
    }

    #[test]
    fn copy_keeps_the_value() {
        let mut control = control("(555) 123");
        control.select_all();
        control.copy();

        assert_eq!(control.clipboard(), "(555) 123");
        assert_eq!(control.value(), "(555) 123");
    }
}
