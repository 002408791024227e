//! Keeps a single-line text control in sync with a masked value.
//!
//! [`MaskedInput`] owns a [`TextControl`] and a [`MaskModel`]. The host
//! forwards native events to it; it decides which ones to intercept, applies
//! them to the model and writes the formatted value and caret back.

pub mod control;
pub mod controller;
pub mod error;
pub mod events;
pub mod interpret;
pub mod model;
pub mod platform;
pub mod props;
pub mod selection;

pub use control::{Bookmark, EndPoint, IndexedSelection, TextControl, TextRange, TextRangeSelection};
pub use controller::MaskedInput;
pub use error::ControlError;
pub use events::{
    ChangeCause, ChangeEvent, CharacterInput, EventKind, InputText, Key, KeyDown, Modifiers,
    NativeEvent, Paste, Propagation,
};
pub use interpret::{MaskOp, interpret, replay};
pub use model::MaskModel;
pub use platform::EventBindings;
pub use props::{MaskedInputProps, PropsTransition, RenderedAttributes};
pub use selection::{IndexedAccessor, SelectionAccessor, TextRangeAccessor, detect};

pub use maskedinput_engine::{InputMask, MaskError, Selection};
