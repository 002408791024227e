//! Parsed mask patterns.
//!
//! A pattern is a sequence of slots. Characters found in the
//! [`FormatCharacters`] table become editable slots, everything else is a
//! literal that is copied into the formatted value verbatim. A backslash
//! escapes the following character so format characters can appear as
//! literals (`"\\1"` is a literal `1`).

use crate::format::{FormatCharacter, FormatCharacters};
use crate::MaskError;

pub const ESCAPE_CHAR: char = '\\';
pub const DEFAULT_PLACEHOLDER: char = '_';

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Literal(char),
    Editable {
        format_char: char,
        definition: FormatCharacter,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    source: String,
    slots: Vec<Slot>,
    first_editable: usize,
    last_editable: usize,
    placeholder: char,
}

impl Pattern {
    pub fn parse(
        source: &str,
        formats: &FormatCharacters,
        placeholder: char,
    ) -> Result<Self, MaskError> {
        let mut slots = Vec::with_capacity(source.len());
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c == ESCAPE_CHAR {
                let escaped = chars.next().ok_or_else(|| MaskError::TrailingEscape {
                    pattern: source.to_string(),
                })?;
                slots.push(Slot::Literal(escaped));
            } else if let Some(definition) = formats.get(c) {
                slots.push(Slot::Editable {
                    format_char: c,
                    definition: definition.clone(),
                });
            } else {
                slots.push(Slot::Literal(c));
            }
        }

        let editable = |slot: &Slot| matches!(slot, Slot::Editable { .. });
        let (Some(first_editable), Some(last_editable)) = (
            slots.iter().position(editable),
            slots.iter().rposition(editable),
        ) else {
            return Err(MaskError::NoEditableCharacters {
                pattern: source.to_string(),
            });
        };

        Ok(Self {
            source: source.to_string(),
            slots,
            first_editable,
            last_editable,
            placeholder,
        })
    }

    /// The pattern as written, escapes included.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of slots, which is also the length of every formatted value.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    pub fn first_editable_index(&self) -> usize {
        self.first_editable
    }

    pub fn last_editable_index(&self) -> usize {
        self.last_editable
    }

    pub fn is_editable(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Slot::Editable { .. }))
    }

    pub fn literal_at(&self, index: usize) -> Option<char> {
        match self.slots.get(index) {
            Some(Slot::Literal(c)) => Some(*c),
            _ => None,
        }
    }

    /// The format character behind an editable slot.
    pub fn format_char_at(&self, index: usize) -> Option<char> {
        match self.slots.get(index) {
            Some(Slot::Editable { format_char, .. }) => Some(*format_char),
            _ => None,
        }
    }

    /// Validate `c` for the slot at `index`, returning the transformed char.
    pub fn accept_at(&self, c: char, index: usize) -> Option<char> {
        match self.slots.get(index) {
            Some(Slot::Editable { definition, .. }) => definition.accept(c),
            _ => None,
        }
    }

    /// First editable slot at or after `index`.
    pub fn next_editable_from(&self, index: usize) -> Option<usize> {
        (index..=self.last_editable).find(|&i| self.is_editable(i))
    }

    /// Lay `input` out over the pattern.
    ///
    /// Each editable slot consumes one input character, keeping it when valid
    /// and substituting the placeholder otherwise. Literal slots are copied
    /// from the pattern; an input character equal to the literal is consumed
    /// so already-formatted values survive a round trip.
    pub fn format_value(&self, input: &[char]) -> Vec<char> {
        let mut formatted = Vec::with_capacity(self.slots.len());
        let mut input = input.iter().copied().peekable();

        for slot in &self.slots {
            match slot {
                Slot::Editable { definition, .. } => {
                    let stored = input
                        .next()
                        .and_then(|c| definition.accept(c))
                        .unwrap_or(self.placeholder);
                    formatted.push(stored);
                }
                Slot::Literal(literal) => {
                    formatted.push(*literal);
                    if input.peek() == Some(literal) {
                        input.next();
                    }
                }
            }
        }

        formatted
    }

    /// The formatted value of an empty input: literals plus placeholders.
    pub fn empty_value(&self) -> String {
        self.format_value(&[]).into_iter().collect()
    }
}
