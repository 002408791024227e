//! Infer what an uncontrolled native edit meant.
//!
//! When the control changes its own text (forward delete, cut, drag and
//! drop, autofill) all we get is the new string. Comparing it with what we
//! last rendered tells us enough to replay the edit against the mask.

use maskedinput_engine::Selection;

use crate::MaskModel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskOp {
    Unchanged,
    /// Characters were removed starting at the caret.
    Delete { span: Selection, value: String },
    Replace { value: String },
}

/// Classify `incoming` against the `displayed` value.
///
/// A shorter value is a deletion of the length difference at
/// `selection.start`. Lengths are counted in characters.
pub fn interpret(displayed: &str, selection: Selection, incoming: &str) -> MaskOp {
    if incoming == displayed {
        return MaskOp::Unchanged;
    }

    let displayed_len = displayed.chars().count();
    let incoming_len = incoming.chars().count();
    if incoming_len < displayed_len {
        let size_diff = displayed_len - incoming_len;
        MaskOp::Delete {
            span: Selection::new(selection.start, selection.start + size_diff),
            value: incoming.to_string(),
        }
    } else {
        MaskOp::Replace {
            value: incoming.to_string(),
        }
    }
}

/// Apply `op` to `model`. Returns `false` for [`MaskOp::Unchanged`].
pub fn replay<M: MaskModel + ?Sized>(op: &MaskOp, model: &mut M) -> bool {
    match op {
        MaskOp::Unchanged => false,
        MaskOp::Delete { span, value } => {
            model.set_selection(*span);
            model.backspace();
            model.set_value(value);
            true
        }
        MaskOp::Replace { value } => {
            model.set_value(value);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskedinput_engine::{InputMask, MaskOptions};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const FULL: &str = "(555) 123-4567";

    #[test]
    fn same_value_is_unchanged() {
        assert_eq!(interpret(FULL, Selection::caret(3), FULL), MaskOp::Unchanged);
    }

    #[rstest]
    #[case::forward_delete("(555) 23-4567", Selection::caret(6), Selection::new(6, 7))]
    #[case::cut_two("(5) 123-4567", Selection::caret(2), Selection::new(2, 4))]
    fn shorter_value_is_a_delete_at_the_caret(
        #[case] incoming: &str,
        #[case] caret: Selection,
        #[case] span: Selection,
    ) {
        assert_eq!(
            interpret(FULL, caret, incoming),
            MaskOp::Delete {
                span,
                value: incoming.to_string()
            }
        );
    }

    #[test]
    fn length_difference_counts_characters() {
        let op = interpret("a€b€", Selection::caret(1), "ab€");
        assert!(matches!(op, MaskOp::Delete { span, .. } if span == Selection::new(1, 2)));
    }

    #[test]
    fn same_length_or_longer_is_a_replace() {
        assert_eq!(
            interpret(FULL, Selection::caret(0), "(999) 123-4567"),
            MaskOp::Replace {
                value: "(999) 123-4567".to_string()
            }
        );
    }

    #[test]
    fn replaying_a_delete_reformats_the_remaining_text() {
        let mut mask = InputMask::new(MaskOptions::new("(999) 999-9999").with_value(FULL)).unwrap();
        let op = interpret(FULL, Selection::caret(6), "(555) 23-4567");

        assert!(replay(&op, &mut mask));
        assert_eq!(mask.value(), "(555) 23_-4567");
        assert_eq!(mask.selection(), Selection::caret(6));
    }

    #[test]
    fn replaying_unchanged_leaves_model_alone() {
        let mut mask = InputMask::new(MaskOptions::new("(999) 999-9999").with_value(FULL)).unwrap();
        assert!(!replay(&MaskOp::Unchanged, &mut mask));
        assert_eq!(mask.value(), FULL);
    }
}
