//! Reading and writing a control's selection through whichever API it has.

use maskedinput_engine::Selection;

use crate::ControlError;
use crate::control::{EndPoint, TextControl};

/// Stateless adapter between a [`TextControl`] and a [`Selection`].
pub trait SelectionAccessor {
    fn name(&self) -> &'static str;

    fn get(&self, control: &mut dyn TextControl) -> Result<Selection, ControlError>;

    fn set(&self, control: &mut dyn TextControl, selection: Selection) -> Result<(), ControlError>;
}

/// Uses `selection_start` / `selection_end` / `set_selection_range`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedAccessor;

impl SelectionAccessor for IndexedAccessor {
    fn name(&self) -> &'static str {
        "indexed"
    }

    fn get(&self, control: &mut dyn TextControl) -> Result<Selection, ControlError> {
        let indexed = control
            .indexed_selection()
            .ok_or(ControlError::Unsupported { api: self.name() })?;
        Ok(Selection::new(
            indexed.selection_start()?,
            indexed.selection_end()?,
        ))
    }

    fn set(&self, control: &mut dyn TextControl, selection: Selection) -> Result<(), ControlError> {
        control.focus()?;
        let indexed = control
            .indexed_selection()
            .ok_or(ControlError::Unsupported { api: self.name() })?;
        indexed.set_selection_range(selection.start, selection.end)
    }
}

/// Uses text ranges and bookmarks, for controls without offset access.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRangeAccessor;

impl SelectionAccessor for TextRangeAccessor {
    fn name(&self) -> &'static str {
        "text range"
    }

    fn get(&self, control: &mut dyn TextControl) -> Result<Selection, ControlError> {
        control.focus()?;
        let ranges = control
            .text_range_selection()
            .ok_or(ControlError::Unsupported { api: self.name() })?;

        let mut range = ranges.create_text_range()?;
        let mut before = range.duplicate();
        range.move_to_bookmark(ranges.active_range()?.bookmark());
        before.set_end_point(EndPoint::EndToStart, &range);

        let start = before.text().chars().count();
        let end = start + range.text().chars().count();
        Ok(Selection::new(start, end))
    }

    fn set(&self, control: &mut dyn TextControl, selection: Selection) -> Result<(), ControlError> {
        control.focus()?;
        let ranges = control
            .text_range_selection()
            .ok_or(ControlError::Unsupported { api: self.name() })?;

        let mut range = ranges.create_text_range()?;
        range.collapse(true);
        range.move_start(selection.start as isize);
        range.move_end(selection.len() as isize);
        ranges.select(&range)
    }
}

/// Pick the accessor for `control`, preferring offset access.
pub fn detect(control: &mut dyn TextControl) -> Box<dyn SelectionAccessor> {
    if control.indexed_selection().is_some() {
        Box::new(IndexedAccessor)
    } else {
        if control.text_range_selection().is_none() {
            log::debug!("control exposes no selection API; selection sync will be skipped");
        }
        Box::new(TextRangeAccessor)
    }
}
