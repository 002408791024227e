#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    #[error("Pattern {pattern:?} ends with a raw escape character")]
    TrailingEscape { pattern: String },
    #[error("Pattern {pattern:?} does not contain any editable characters")]
    NoEditableCharacters { pattern: String },
    #[error("Invalid validator for format character {format_char:?}: {source}")]
    InvalidValidator {
        format_char: char,
        source: regex::Error,
    },
}
