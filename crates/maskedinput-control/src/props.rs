use maskedinput_engine::{FormatOverrides, MaskOptions};

/// Host supplied configuration for a masked control.
///
/// `format_characters` and `placeholder_char` are read once at mount; later
/// changes to them have no effect on the mounted model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskedInputProps {
    pub mask: String,
    pub format_characters: FormatOverrides,
    pub placeholder_char: Option<char>,
    pub value: String,
    /// Rendered `size`; defaults to the pattern length.
    pub size: Option<usize>,
    /// Rendered placeholder; defaults to the empty value.
    pub placeholder: Option<String>,
}

impl MaskedInputProps {
    pub fn new(mask: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
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

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn mask_options(&self) -> MaskOptions {
        let options = MaskOptions::new(self.mask.clone())
            .with_value(self.value.clone())
            .with_format_characters(self.format_characters.clone());
        match self.placeholder_char {
            Some(placeholder) => options.with_placeholder_char(placeholder),
            None => options,
        }
    }
}

/// How the model reacts when props are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropsTransition {
    Unchanged,
    /// Only the value changed: format it in place.
    Value,
    /// Only the pattern changed: reformat the raw value under it.
    Pattern,
    /// Both changed: the new value wins only if nothing was entered yet.
    PatternAndValue,
}

impl PropsTransition {
    pub fn between(prev: &MaskedInputProps, next: &MaskedInputProps) -> Self {
        match (prev.mask != next.mask, prev.value != next.value) {
            (false, false) => PropsTransition::Unchanged,
            (false, true) => PropsTransition::Value,
            (true, false) => PropsTransition::Pattern,
            (true, true) => PropsTransition::PatternAndValue,
        }
    }
}

/// Attributes the host renders on the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAttributes {
    pub value: String,
    pub max_length: usize,
    pub size: usize,
    pub placeholder: String,
}
