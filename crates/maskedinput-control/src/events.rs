//! Native events a host forwards to [`MaskedInput`](crate::MaskedInput).

use std::fmt;

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const META  = 1 << 3;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    /// Any other named key, passed through untouched.
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDown {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyDown {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    fn is_letter(&self, letter: char) -> bool {
        matches!(self.key, Key::Char(c) if c.eq_ignore_ascii_case(&letter))
    }

    fn is_command(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL | Modifiers::META)
    }

    /// Ctrl/Cmd+Z, or Ctrl/Cmd+Shift+Y.
    pub fn is_undo(&self) -> bool {
        let letter = if self.modifiers.contains(Modifiers::SHIFT) { 'y' } else { 'z' };
        self.is_command() && self.is_letter(letter)
    }

    /// Ctrl/Cmd+Y, or Ctrl/Cmd+Shift+Z.
    pub fn is_redo(&self) -> bool {
        let letter = if self.modifiers.contains(Modifiers::SHIFT) { 'z' } else { 'y' };
        self.is_command() && self.is_letter(letter)
    }
}

/// A key press or before-input event carrying typed text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterInput {
    pub key: Option<Key>,
    /// Inserted text, as reported by before-input events.
    pub data: Option<String>,
    pub modifiers: Modifiers,
}

/// Text resolved from a [`CharacterInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputText {
    Char(char),
    /// More than one character at once, e.g. from a soft keyboard suggestion.
    Text(String),
}

impl CharacterInput {
    pub fn key_press(c: char) -> Self {
        Self {
            key: Some(Key::Char(c)),
            ..Self::default()
        }
    }

    pub fn enter() -> Self {
        Self {
            key: Some(Key::Enter),
            ..Self::default()
        }
    }

    pub fn before_input(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_enter(&self) -> bool {
        self.key == Some(Key::Enter) || self.data.as_deref() == Some("\n")
    }

    /// The key's character, falling back to the event data.
    pub fn text(&self) -> Option<InputText> {
        if let Some(Key::Char(c)) = self.key {
            return Some(InputText::Char(c));
        }
        let data = self.data.as_deref()?;
        let mut chars = data.chars();
        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(InputText::Char(c)),
            _ => Some(InputText::Text(data.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paste {
    /// Clipboard text, read when the event fired.
    pub text: String,
}

impl Paste {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeEvent {
    /// The control changed its own value; read it from the control.
    Change,
    KeyDown(KeyDown),
    KeyPress(CharacterInput),
    BeforeInput(CharacterInput),
    Paste(Paste),
}

impl NativeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NativeEvent::Change => EventKind::Change,
            NativeEvent::KeyDown(_) => EventKind::KeyDown,
            NativeEvent::KeyPress(_) => EventKind::KeyPress,
            NativeEvent::BeforeInput(_) => EventKind::BeforeInput,
            NativeEvent::Paste(_) => EventKind::Paste,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    KeyDown,
    KeyPress,
    BeforeInput,
    Paste,
}

impl EventKind {
    /// The handler name hosts bind, e.g. `onKeyPress`.
    pub fn handler_name(self) -> &'static str {
        match self {
            EventKind::Change => "onChange",
            EventKind::KeyDown => "onKeyDown",
            EventKind::KeyPress => "onKeyPress",
            EventKind::BeforeInput => "onBeforeInput",
            EventKind::Paste => "onPaste",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

/// Whether the host should go on with its native handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    PreventDefault,
}

impl Propagation {
    pub fn is_prevented(self) -> bool {
        self == Propagation::PreventDefault
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Input,
    Backspace,
    Paste,
    Undo,
    Redo,
    NativeChange,
}

/// Passed to the change subscriber after the control was updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The control's value after the update.
    pub value: String,
    pub cause: ChangeCause,
}
