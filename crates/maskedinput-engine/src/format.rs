//! Format characters: the pattern characters that mark editable slots.
//!
//! Every format character carries a [`Validator`] deciding which input
//! characters the slot accepts and an optional case [`Transform`] applied on
//! the way in. The built-in table mirrors the usual mask conventions; hosts
//! can add, replace or disable entries through [`FormatOverrides`].

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::MaskError;

/// Case transform applied to an accepted character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Uppercase,
    Lowercase,
}

impl Transform {
    pub fn apply(self, c: char) -> char {
        let mapped: Vec<char> = match self {
            Transform::Uppercase => c.to_uppercase().collect(),
            Transform::Lowercase => c.to_lowercase().collect(),
        };
        // Multi-char case mappings ("ß" -> "SS") don't fit a single slot
        match mapped.as_slice() {
            [single] => *single,
            _ => c,
        }
    }
}

/// Decides whether a character may occupy a slot.
#[derive(Debug, Clone)]
pub enum Validator {
    Digit,
    Letter,
    Alphanumeric,
    /// Anchored regular expression matched against the single character.
    Regex(Regex),
}

impl Validator {
    /// Compile a custom validator; the expression is anchored to exactly one character.
    pub fn regex(format_char: char, source: &str) -> Result<Self, MaskError> {
        Regex::new(&format!("^(?:{source})$"))
            .map(Validator::Regex)
            .map_err(|source| MaskError::InvalidValidator {
                format_char,
                source,
            })
    }

    pub fn accepts(&self, c: char) -> bool {
        match self {
            Validator::Digit => c.is_ascii_digit(),
            Validator::Letter => c.is_ascii_alphabetic(),
            Validator::Alphanumeric => c.is_ascii_alphanumeric(),
            Validator::Regex(re) => {
                let mut buf = [0u8; 4];
                re.is_match(c.encode_utf8(&mut buf))
            }
        }
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Validator::Digit, Validator::Digit)
            | (Validator::Letter, Validator::Letter)
            | (Validator::Alphanumeric, Validator::Alphanumeric) => true,
            (Validator::Regex(a), Validator::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatCharacter {
    pub validator: Validator,
    pub transform: Option<Transform>,
}

impl FormatCharacter {
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Validate `c` and return the character to store in the slot.
    pub fn accept(&self, c: char) -> Option<char> {
        if !self.validator.accepts(c) {
            return None;
        }
        Some(match self.transform {
            Some(transform) => transform.apply(c),
            None => c,
        })
    }
}

/// Serializable description of a custom format character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatCharacterSpec {
    /// Regular expression a single input character must match.
    pub validate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

impl FormatCharacterSpec {
    pub fn compile(&self, format_char: char) -> Result<FormatCharacter, MaskError> {
        Ok(FormatCharacter {
            validator: Validator::regex(format_char, &self.validate)?,
            transform: self.transform,
        })
    }
}

/// Additions, replacements and removals applied on top of the default table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatOverrides {
    entries: BTreeMap<char, Option<FormatCharacter>>,
}

impl FormatOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, format_char: char, definition: FormatCharacter) -> &mut Self {
        self.entries.insert(format_char, Some(definition));
        self
    }

    /// Remove a default so the character becomes a literal in patterns.
    pub fn disable(&mut self, format_char: char) -> &mut Self {
        self.entries.insert(format_char, None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The resolved table of format characters used to parse patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatCharacters {
    table: BTreeMap<char, FormatCharacter>,
}

impl Default for FormatCharacters {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        table.insert('*', FormatCharacter::new(Validator::Alphanumeric));
        table.insert('1', FormatCharacter::new(Validator::Digit));
        table.insert('9', FormatCharacter::new(Validator::Digit));
        table.insert('a', FormatCharacter::new(Validator::Letter));
        table.insert(
            'A',
            FormatCharacter::new(Validator::Letter).with_transform(Transform::Uppercase),
        );
        table.insert(
            '#',
            FormatCharacter::new(Validator::Alphanumeric).with_transform(Transform::Uppercase),
        );
        Self { table }
    }
}

impl FormatCharacters {
    /// Defaults merged with `overrides`.
    pub fn with_overrides(overrides: &FormatOverrides) -> Self {
        let mut resolved = Self::default();
        for (format_char, entry) in &overrides.entries {
            match entry {
                Some(definition) => {
                    resolved.table.insert(*format_char, definition.clone());
                }
                None => {
                    resolved.table.remove(format_char);
                }
            }
        }
        resolved
    }

    pub fn get(&self, format_char: char) -> Option<&FormatCharacter> {
        self.table.get(&format_char)
    }

    pub fn contains(&self, format_char: char) -> bool {
        self.table.contains_key(&format_char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Transform::Uppercase, 'q', 'Q')]
    #[case(Transform::Lowercase, 'Q', 'q')]
    #[case(Transform::Uppercase, '7', '7')]
    #[case(Transform::Uppercase, 'ß', 'ß')]
    fn transform_maps_to_a_single_char(
        #[case] transform: Transform,
        #[case] input: char,
        #[case] expected: char,
    ) {
        assert_eq!(transform.apply(input), expected);
    }

    #[rstest]
    #[case('1', '5', Some('5'))]
    #[case('1', 'x', None)]
    #[case('9', '0', Some('0'))]
    #[case('a', 'q', Some('q'))]
    #[case('a', '3', None)]
    #[case('A', 'q', Some('Q'))]
    #[case('*', 'z', Some('z'))]
    #[case('*', '-', None)]
    #[case('#', 'f', Some('F'))]
    fn default_table(#[case] format_char: char, #[case] input: char, #[case] stored: Option<char>) {
        let table = FormatCharacters::default();
        let definition = table.get(format_char).unwrap();
        assert_eq!(definition.accept(input), stored);
    }

    #[test]
    fn custom_regex_is_anchored_to_one_character() {
        let hex = FormatCharacterSpec {
            validate: "[0-9a-f]".to_string(),
            transform: Some(Transform::Uppercase),
        }
        .compile('X')
        .unwrap();

        assert_eq!(hex.accept('c'), Some('C'));
        assert_eq!(hex.accept('g'), None);
    }

    #[test]
    fn invalid_regex_names_the_format_char() {
        let err = FormatCharacterSpec {
            validate: "[".to_string(),
            transform: None,
        }
        .compile('X')
        .unwrap_err();

        assert!(matches!(err, MaskError::InvalidValidator { format_char: 'X', .. }));
    }

    #[test]
    fn overrides_add_replace_and_disable() {
        let mut overrides = FormatOverrides::new();
        overrides
            .set('X', FormatCharacter::new(Validator::Digit))
            .set('a', FormatCharacter::new(Validator::Digit))
            .disable('9');

        let table = FormatCharacters::with_overrides(&overrides);

        assert!(table.contains('X'));
        assert_eq!(table.get('a').unwrap().accept('4'), Some('4'));
        assert!(!table.contains('9'));
        assert!(table.contains('1'));
    }

    #[test]
    fn transform_keeps_characters_without_single_mapping() {
        assert_eq!(Transform::Uppercase.apply('ß'), 'ß');
        assert_eq!(Transform::Lowercase.apply('Q'), 'q');
    }
}
