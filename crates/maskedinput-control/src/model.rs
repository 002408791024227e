use maskedinput_engine::{InputMask, MaskError, PatternUpdate, Selection};

/// The masked value model the controller drives.
///
/// Edit operations return `false` when the model declined the edit, in which
/// case nothing changed.
pub trait MaskModel {
    fn set_pattern(&mut self, pattern: &str, update: PatternUpdate) -> Result<(), MaskError>;
    fn set_value(&mut self, value: &str);
    fn value(&self) -> String;
    fn raw_value(&self) -> String;
    fn empty_value(&self) -> String;
    fn pattern_len(&self) -> usize;
    fn selection(&self) -> Selection;
    fn set_selection(&mut self, selection: Selection);
    fn input(&mut self, c: char) -> bool;
    fn backspace(&mut self) -> bool;
    fn paste(&mut self, text: &str) -> bool;
    fn undo(&mut self) -> bool;
    fn redo(&mut self) -> bool;

    /// What the control shows: the value, or `""` while nothing is entered.
    fn display_value(&self) -> String {
        let value = self.value();
        if value == self.empty_value() {
            String::new()
        } else {
            value
        }
    }
}

impl MaskModel for InputMask {
    fn set_pattern(&mut self, pattern: &str, update: PatternUpdate) -> Result<(), MaskError> {
        InputMask::set_pattern(self, pattern, update)
    }

    fn set_value(&mut self, value: &str) {
        InputMask::set_value(self, value)
    }

    fn value(&self) -> String {
        InputMask::value(self)
    }

    fn raw_value(&self) -> String {
        InputMask::raw_value(self)
    }

    fn empty_value(&self) -> String {
        InputMask::empty_value(self).to_string()
    }

    fn pattern_len(&self) -> usize {
        self.pattern().len()
    }

    fn selection(&self) -> Selection {
        InputMask::selection(self)
    }

    fn set_selection(&mut self, selection: Selection) {
        InputMask::set_selection(self, selection)
    }

    fn input(&mut self, c: char) -> bool {
        InputMask::input(self, c)
    }

    fn backspace(&mut self) -> bool {
        InputMask::backspace(self)
    }

    fn paste(&mut self, text: &str) -> bool {
        InputMask::paste(self, text)
    }

    fn undo(&mut self) -> bool {
        InputMask::undo(self)
    }

    fn redo(&mut self) -> bool {
        InputMask::redo(self)
    }
}
