//! The text control surface the controller drives.
//!
//! A host widget implements [`TextControl`] and exposes one of two selection
//! capabilities: [`IndexedSelection`] (start/end offsets) or the older
//! bookmark based [`TextRangeSelection`]. Which one is used is decided once
//! when the controller binds, see [`crate::selection::detect`].

use crate::ControlError;

/// A single-line editable text control.
pub trait TextControl {
    fn value(&self) -> String;

    /// Replace the displayed text. Hosts may move the caret as a side effect.
    fn set_value(&mut self, value: &str);

    fn focus(&mut self) -> Result<(), ControlError>;

    fn blur(&mut self);

    fn indexed_selection(&mut self) -> Option<&mut dyn IndexedSelection> {
        None
    }

    fn text_range_selection(&mut self) -> Option<&mut dyn TextRangeSelection> {
        None
    }
}

/// Offset based selection access, in characters.
pub trait IndexedSelection {
    fn selection_start(&self) -> Result<usize, ControlError>;
    fn selection_end(&self) -> Result<usize, ControlError>;
    fn set_selection_range(&mut self, start: usize, end: usize) -> Result<(), ControlError>;
}

/// Range object based selection access.
pub trait TextRangeSelection {
    /// A range spanning the whole control text.
    fn create_text_range(&self) -> Result<TextRange, ControlError>;

    /// The range the user currently has selected.
    fn active_range(&self) -> Result<TextRange, ControlError>;

    fn select(&mut self, range: &TextRange) -> Result<(), ControlError>;
}

/// Which end points [`TextRange::set_end_point`] moves and reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPoint {
    StartToStart,
    StartToEnd,
    EndToStart,
    EndToEnd,
}

/// Opaque saved position of a [`TextRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark {
    start: usize,
    end: usize,
}

/// A movable span over a snapshot of the control text.
///
/// Positions are character offsets. Moving one end past the other drags the
/// other end along, so a range is never inverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRange {
    text: String,
    len: usize,
    start: usize,
    end: usize,
}

impl TextRange {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            len,
            start: 0,
            end: len,
        }
    }

    pub fn with_bounds(text: impl Into<String>, start: usize, end: usize) -> Self {
        let mut range = Self::new(text);
        range.end = end.min(range.len);
        range.start = start.min(range.end);
        range
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// The covered text.
    pub fn text(&self) -> String {
        self.text
            .chars()
            .skip(self.start)
            .take(self.end - self.start)
            .collect()
    }

    pub fn bookmark(&self) -> Bookmark {
        Bookmark {
            start: self.start,
            end: self.end,
        }
    }

    pub fn move_to_bookmark(&mut self, bookmark: Bookmark) {
        self.end = bookmark.end.min(self.len);
        self.start = bookmark.start.min(self.end);
    }

    /// Set one of this range's end points from one of `source`'s.
    pub fn set_end_point(&mut self, how: EndPoint, source: &TextRange) {
        match how {
            EndPoint::StartToStart => self.set_start(source.start),
            EndPoint::StartToEnd => self.set_start(source.end),
            EndPoint::EndToStart => self.set_end(source.start),
            EndPoint::EndToEnd => self.set_end(source.end),
        }
    }

    pub fn collapse(&mut self, to_start: bool) {
        if to_start {
            self.end = self.start;
        } else {
            self.start = self.end;
        }
    }

    /// Move the start by `count` characters; returns the distance moved.
    pub fn move_start(&mut self, count: isize) -> isize {
        let before = self.start;
        self.set_start(offset(before, count, self.len));
        self.start as isize - before as isize
    }

    /// Move the end by `count` characters; returns the distance moved.
    pub fn move_end(&mut self, count: isize) -> isize {
        let before = self.end;
        self.set_end(offset(before, count, self.len));
        self.end as isize - before as isize
    }

    fn set_start(&mut self, at: usize) {
        self.start = at.min(self.len);
        if self.start > self.end {
            self.end = self.start;
        }
    }

    fn set_end(&mut self, at: usize) {
        self.end = at.min(self.len);
        if self.end < self.start {
            self.start = self.end;
        }
    }
}

fn offset(at: usize, count: isize, len: usize) -> usize {
    at.saturating_add_signed(count).min(len)
}
