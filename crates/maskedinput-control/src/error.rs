/// Failures reported by a text control's selection capabilities.
///
/// These never abort an edit: the controller logs them and carries on with
/// the mask's own idea of the selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("Control is not focused")]
    NotFocused,
    #[error("Control is not visible")]
    NotVisible,
    #[error("Control does not support {api} selection")]
    Unsupported { api: &'static str },
}
