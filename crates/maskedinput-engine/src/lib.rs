//! Mask engine: parses patterns such as `(999) 999-9999` and keeps a value
//! formatted against them while characters are typed, deleted or pasted.
//!
//! [`InputMask`] is the entry point. It owns the formatted value, the current
//! [`Selection`] and an undo/redo [`History`].

pub mod error;
pub mod format;
pub mod history;
pub mod mask;
pub mod pattern;
pub mod selection;

pub use error::MaskError;
pub use format::{
    FormatCharacter, FormatCharacterSpec, FormatCharacters, FormatOverrides, Transform, Validator,
};
pub use history::{EditKind, History};
pub use mask::{InputMask, MaskOptions, PatternUpdate};
pub use pattern::{DEFAULT_PLACEHOLDER, ESCAPE_CHAR, Pattern};
pub use selection::Selection;
