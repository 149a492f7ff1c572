//! Canonical document model.
//!
//! # Responsibility
//! - Own the ordered line sequence for one named document.
//! - Apply edit deltas and batch removals, reporting structural events.
//!
//! # Invariants
//! - `serialize()` is the lines joined by `\n`; order is rendering order.
//! - Lines are owned exclusively; the only external aliasing is a
//!   projection holding `LineId` handles.
//! - Event lists report removals before additions for a single edit.

use crate::model::buffer::{DocumentLine, EditDelta, LineBuffer};
use crate::model::line::{Line, LineId};

impl DocumentLine for Line {
    fn from_text(text: &str) -> Self {
        Line::new(text)
    }

    fn text(&self) -> &str {
        Line::text(self)
    }

    fn set_text(&mut self, text: &str) {
        Line::set_text(self, text);
    }

    fn render(&self, exclude_date: bool) -> &str {
        Line::render(self, exclude_date)
    }
}

/// Structural change notification emitted by a mutating call.
///
/// Payload lines are clones of (or the moved-out originals of) the affected
/// lines; they keep the `LineId` of the line they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Lines spliced out, in their original top-to-bottom order.
    LinesRemoved(Vec<Line>),
    /// Lines spliced in immediately after index `at` (or at the start of a
    /// previously empty document, reported with `at == 0`).
    LinesAdded { at: usize, lines: Vec<Line> },
}

/// An ordered, mutable, named sequence of lines. The canonical model.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    buffer: LineBuffer<Line>,
}

impl Document {
    /// Creates an empty document with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: LineBuffer::new(),
        }
    }

    /// Creates a document populated from raw text.
    pub fn from_text(name: impl Into<String>, raw: &str) -> Self {
        Self {
            name: name.into(),
            buffer: LineBuffer::from_text(raw),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.buffer.line(index)
    }

    pub fn lines(&self) -> &[Line] {
        self.buffer.lines()
    }

    /// Joins all line texts with `\n`. The only persisted form.
    pub fn serialize(&self) -> String {
        self.buffer.serialize()
    }

    /// Replaces the whole line sequence from raw text.
    ///
    /// This is the bulk-replace path used when a stored document is loaded;
    /// it unconditionally overwrites any edits made in the meantime.
    pub fn load_text(&mut self, raw: &str) {
        self.buffer.replace_with_text(raw);
    }

    /// Finds the current index of the line with the given id.
    pub fn index_of(&self, id: LineId) -> Option<usize> {
        self.buffer.lines().iter().position(|line| line.id() == id)
    }

    /// Rewrites the text of the line with the given id, if present.
    pub fn set_text_by_id(&mut self, id: LineId, text: &str) -> bool {
        match self.index_of(id) {
            Some(index) => self.buffer.set_line_text(index, text),
            None => false,
        }
    }

    /// Inserts prebuilt lines at `index` (clamped to the sequence end).
    pub fn insert_lines(&mut self, index: usize, lines: Vec<Line>) {
        self.buffer.insert_lines(index, lines);
    }

    /// Removes the lines at the given pre-removal indices in one batch.
    ///
    /// Emits a single removal event carrying the removed lines in their
    /// original order. Out-of-range indices are ignored; an all-out-of-range
    /// set produces no event.
    pub fn remove_lines(&mut self, indices: &[usize]) -> Vec<DocumentEvent> {
        let removed = self.buffer.remove_lines(indices);
        if removed.is_empty() {
            Vec::new()
        } else {
            vec![DocumentEvent::LinesRemoved(removed)]
        }
    }

    /// Applies a range-replace edit delta.
    ///
    /// Returns the structural events in occurrence order: a removal event
    /// (when whole lines were merged away) always precedes an addition event
    /// (when the delta inserted more lines than it kept). A single-line
    /// in-place edit returns no events. A delta missing either endpoint is
    /// ignored.
    pub fn apply_change(&mut self, delta: &EditDelta) -> Vec<DocumentEvent> {
        let outcome = self.buffer.apply_change(delta);

        let mut events = Vec::new();
        if !outcome.removed.is_empty() {
            events.push(DocumentEvent::LinesRemoved(outcome.removed));
        }
        if let Some(run) = outcome.added {
            let lines = self.buffer.lines()[run.start..run.start + run.count].to_vec();
            events.push(DocumentEvent::LinesAdded {
                at: run.anchor,
                lines,
            });
        }
        events
    }
}
