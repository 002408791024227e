use crate::format::{FormatCharacters, FormatOverrides};
use crate::history::{EditKind, History, Restored};
use crate::pattern::{DEFAULT_PLACEHOLDER, Pattern};
use crate::{MaskError, Selection};

/// Construction options for [`InputMask`].
#[derive(Debug, Clone, Default)]
pub struct MaskOptions {
    pub pattern: String,
    /// Initial value, formatted against the pattern.
    pub value: String,
    pub format_characters: FormatOverrides,
    /// Replaces [`DEFAULT_PLACEHOLDER`] in empty slots.
    pub placeholder_char: Option<char>,
    pub selection: Selection,
}

impl MaskOptions {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_format_characters(mut self, overrides: FormatOverrides) -> Self {
        self.format_characters = overrides;
        self
    }

    pub fn with_placeholder_char(mut self, placeholder: char) -> Self {
        self.placeholder_char = Some(placeholder);
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

/// Value and selection applied together with a new pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternUpdate {
    pub value: String,
    pub selection: Selection,
}

impl PatternUpdate {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selection: Selection::default(),
        }
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

/// A value constrained by a [`Pattern`], with a selection and edit history.
///
/// Editing operations return `false` when the mask declines the edit; a
/// declined edit leaves value, selection and history untouched.
#[derive(Debug, Clone)]
pub struct InputMask {
    formats: FormatCharacters,
    pattern: Pattern,
    value: Vec<char>,
    empty_value: String,
    selection: Selection,
    history: History,
}

impl InputMask {
    pub fn new(options: MaskOptions) -> Result<Self, MaskError> {
        let formats = FormatCharacters::with_overrides(&options.format_characters);
        let placeholder = options.placeholder_char.unwrap_or(DEFAULT_PLACEHOLDER);
        let pattern = Pattern::parse(&options.pattern, &formats, placeholder)?;

        let mut mask = Self {
            formats,
            empty_value: pattern.empty_value(),
            pattern,
            value: Vec::new(),
            selection: Selection::default(),
            history: History::new(),
        };
        mask.set_value(&options.value);
        mask.selection = options.selection.clamp(mask.pattern.len());
        Ok(mask)
    }

    /// Replace the pattern, keeping the placeholder and format table.
    ///
    /// History is cleared because old entries no longer line up with the
    /// new slots. On error the current pattern and value are kept.
    pub fn set_pattern(&mut self, source: &str, update: PatternUpdate) -> Result<(), MaskError> {
        let pattern = Pattern::parse(source, &self.formats, self.pattern.placeholder())?;
        self.empty_value = pattern.empty_value();
        self.pattern = pattern;
        self.set_value(&update.value);
        self.selection = update.selection.clamp(self.pattern.len());
        self.history.reset();
        Ok(())
    }

    /// Format `value` into the mask. Selection and history are left alone.
    pub fn set_value(&mut self, value: &str) {
        let input: Vec<char> = value.chars().collect();
        self.value = self.pattern.format_value(&input);
    }

    /// The formatted value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// The editable slots only, placeholders included.
    pub fn raw_value(&self) -> String {
        self.value
            .iter()
            .enumerate()
            .filter(|(index, _)| self.pattern.is_editable(*index))
            .map(|(_, c)| *c)
            .collect()
    }

    pub fn empty_value(&self) -> &str {
        &self.empty_value
    }

    pub fn is_empty(&self) -> bool {
        self.value() == self.empty_value
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.pattern.len());
    }

    /// Type one character at the selection.
    ///
    /// The character lands in the first editable slot at or after the
    /// selection start; any other slots inside the selection are blanked and
    /// the caret moves past following literals.
    pub fn input(&mut self, c: char) -> bool {
        let len = self.pattern.len();
        if self.selection.is_collapsed() && self.selection.start >= len {
            log::trace!("input {c:?} rejected: caret at end of pattern");
            return false;
        }

        let start = self.selection.start.max(self.pattern.first_editable_index());
        let Some(index) = self.pattern.next_editable_from(start) else {
            log::trace!("input {c:?} rejected: no editable slot after {start}");
            return false;
        };
        let Some(stored) = self.pattern.accept_at(c, index) else {
            log::trace!("input {c:?} rejected at slot {index}");
            return false;
        };

        let selection_before = self.selection;
        let value_before = self.value();

        self.value[index] = stored;
        for blank in (index + 1)..self.selection.end.min(len) {
            if self.pattern.is_editable(blank) {
                self.value[blank] = self.pattern.placeholder();
            }
        }

        let mut caret = index + 1;
        while caret < len && !self.pattern.is_editable(caret) {
            caret += 1;
        }
        self.selection = Selection::caret(caret);

        self.history
            .record(EditKind::Input, value_before, selection_before, self.selection);
        true
    }

    /// Blank the slot before the caret, or every slot in the selection.
    pub fn backspace(&mut self) -> bool {
        if self.selection == Selection::caret(0) {
            return false;
        }

        let selection_before = self.selection;
        let value_before = self.value();
        let placeholder = self.pattern.placeholder();

        if self.selection.is_collapsed() {
            let index = self.selection.start - 1;
            if self.pattern.is_editable(index) {
                self.value[index] = placeholder;
            }
            self.selection = Selection::caret(index);
        } else {
            for index in self.selection.start..self.selection.end.min(self.value.len()) {
                if self.pattern.is_editable(index) {
                    self.value[index] = placeholder;
                }
            }
            self.selection = Selection::caret(self.selection.start);
        }

        self.history.record(
            EditKind::Backspace,
            value_before,
            selection_before,
            self.selection,
        );
        true
    }

    /// Feed `text` through [`input`](Self::input) as one atomic edit.
    ///
    /// Pattern literals may appear in the text and are skipped. If any other
    /// character is rejected the mask is restored to its state before the
    /// paste and `false` is returned.
    pub fn paste(&mut self, text: &str) -> bool {
        let value_before = self.value.clone();
        let selection_before = self.selection;
        let history_before = self.history.clone();

        let mut input: Vec<char> = text.chars().collect();
        let first = self.pattern.first_editable_index();
        if self.selection.start < first {
            let prefix: Vec<char> = (self.selection.start..first)
                .filter_map(|index| self.pattern.literal_at(index))
                .collect();
            if input.starts_with(&prefix) {
                input.drain(..prefix.len());
            }
            self.selection = Selection::new(first, self.selection.end.max(first));
        }

        for c in input {
            if self.selection.start > self.pattern.last_editable_index() {
                break;
            }
            if self.input(c) || self.skip_literal(c) {
                continue;
            }

            log::trace!("paste rejected at {:?}: {c:?}", self.selection);
            self.value = value_before;
            self.selection = selection_before;
            self.history = history_before;
            return false;
        }
        true
    }

    /// Accept `c` when it is a literal adjacent to the caret.
    fn skip_literal(&mut self, c: char) -> bool {
        let caret = self.selection.start;

        // Literals input() already stepped over
        let mut index = caret;
        while index > 0 && !self.pattern.is_editable(index - 1) {
            index -= 1;
            if self.pattern.literal_at(index) == Some(c) {
                return true;
            }
        }

        if self.pattern.literal_at(caret) == Some(c) {
            self.selection = Selection::caret(caret + 1);
            return true;
        }
        false
    }

    pub fn undo(&mut self) -> bool {
        let current = self.value();
        match self.history.undo(&current, self.selection) {
            Some(restored) => {
                self.restore(restored);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(restored) => {
                self.restore(restored);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, restored: Restored) {
        self.value = restored.value.chars().collect();
        self.selection = restored.selection;
    }
}
