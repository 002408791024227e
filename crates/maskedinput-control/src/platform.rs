//! Platform quirks in which events carry typed characters.
//!
//! Android soft keyboards don't produce usable key press events, so typed
//! text has to be taken from before-input events there instead.

use std::sync::OnceLock;

use regex::Regex;

use crate::events::EventKind;

pub const ANDROID_USER_AGENT: &str = "(?i)android";

pub fn is_android(user_agent: &str) -> bool {
    static ANDROID_REGEX: OnceLock<Regex> = OnceLock::new();
    let android_regex = ANDROID_REGEX
        .get_or_init(|| Regex::new(ANDROID_USER_AGENT).expect("Invalid Android user agent regex"));
    android_regex.is_match(user_agent)
}

/// The set of native events the controller handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBindings {
    character_input: EventKind,
}

impl Default for EventBindings {
    fn default() -> Self {
        Self {
            character_input: EventKind::KeyPress,
        }
    }
}

impl EventBindings {
    /// Bindings for the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(target_os = "android") {
            Self {
                character_input: EventKind::BeforeInput,
            }
        } else {
            Self::default()
        }
    }

    pub fn for_user_agent(user_agent: &str) -> Self {
        if is_android(user_agent) {
            Self {
                character_input: EventKind::BeforeInput,
            }
        } else {
            Self::default()
        }
    }

    /// The event that drives character input.
    pub fn character_input(&self) -> EventKind {
        self.character_input
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Change | EventKind::KeyDown | EventKind::Paste => true,
            EventKind::KeyPress | EventKind::BeforeInput => kind == self.character_input,
        }
    }

    /// Handler names to bind on the host control.
    pub fn handler_names(&self) -> [&'static str; 4] {
        [
            EventKind::Change.handler_name(),
            EventKind::KeyDown.handler_name(),
            EventKind::Paste.handler_name(),
            self.character_input.handler_name(),
        ]
    }
}
