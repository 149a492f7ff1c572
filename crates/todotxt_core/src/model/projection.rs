//! Projected document view and its line proxies.
//!
//! # Responsibility
//! - Mirror a base document as a parallel sequence of line proxies.
//! - Route structural edits made on the projection back into the base by
//!   stable line identity, never by positional index.
//!
//! # Invariants
//! - A proxy holds a non-owning `LineId` handle to its backing line; the
//!   projection is only usable while the base document is alive, which the
//!   `&mut Document` parameter on every mutating call enforces.
//! - After a mutating call returns, any proxy text rewritten by the edit has
//!   been written through to its backing line.
//! - Backing lines that have vanished from the base are skipped; the rest of
//!   the batch still applies.

use crate::model::buffer::{DocumentLine, EditDelta, LineBuffer};
use crate::model::document::{Document, DocumentEvent};
use crate::model::line::{parse_date_token, Line, LineId};
use chrono::NaiveDate;
use uuid::Uuid;

/// A line-like view that stands in for a backing [`Line`].
///
/// Carries the backing line's id plus a cached copy of its text and derived
/// fields, so the projection can render without touching the base. The cache
/// is kept strictly in sync by [`ProjectedDocument`]'s write-through step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineProxy {
    target: LineId,
    text: String,
    date: Option<NaiveDate>,
    text_without_date: String,
}

impl LineProxy {
    /// Wraps an existing line, snapshotting its fields.
    pub fn wrap(line: &Line) -> Self {
        Self {
            target: line.id(),
            text: line.text().to_string(),
            date: line.date(),
            text_without_date: line.text_without_date().to_string(),
        }
    }

    /// Creates a proxy over a brand-new backing identity.
    ///
    /// The backing line does not exist in any document yet; it is
    /// materialized into the base when the projection syncs the insertion.
    pub fn from_text(text: &str) -> Self {
        let (date, text_without_date) = parse_date_token(text);
        Self {
            target: Uuid::new_v4(),
            text: text.to_string(),
            date,
            text_without_date,
        }
    }

    /// Returns the id of the backing line.
    pub fn target(&self) -> LineId {
        self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn text_without_date(&self) -> &str {
        &self.text_without_date
    }

    /// Replaces the cached text and recomputes the cached derived fields.
    ///
    /// The backing line is brought up to date by the owning
    /// [`ProjectedDocument`] in the same mutating call; a proxy on its own
    /// has no way to reach the base document.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        let (date, text_without_date) = parse_date_token(text);
        self.date = date;
        self.text_without_date = text_without_date;
    }

    /// Renders the cached text, optionally without its date token.
    pub fn render(&self, exclude_date: bool) -> &str {
        if exclude_date {
            &self.text_without_date
        } else {
            &self.text
        }
    }

    /// Materializes the cached state as a standalone line sharing the
    /// backing identity.
    pub fn to_line(&self) -> Line {
        Line::with_id(self.target, self.text.clone())
    }
}

impl DocumentLine for LineProxy {
    fn from_text(text: &str) -> Self {
        LineProxy::from_text(text)
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        LineProxy::set_text(self, text);
    }

    fn render(&self, exclude_date: bool) -> &str {
        LineProxy::render(self, exclude_date)
    }
}

/// A document-shaped view over a base [`Document`], one proxy per line.
///
/// Edits applied to the projection run the same splice algorithm as the
/// base, over proxies, and are then replayed into the base by identity
/// lookup. The sync is correct even when the projection's index space has
/// diverged from the base's (filtered or reordered views), although
/// construction always starts from the 1:1 order-preserving wrap.
#[derive(Debug, Clone)]
pub struct ProjectedDocument {
    buffer: LineBuffer<LineProxy>,
}

impl ProjectedDocument {
    /// Builds a 1:1 projection of the base's current lines.
    pub fn new(base: &Document) -> Self {
        let mut buffer = LineBuffer::new();
        buffer.insert_lines(0, base.lines().iter().map(LineProxy::wrap).collect());
        Self { buffer }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&LineProxy> {
        self.buffer.line(index)
    }

    pub fn lines(&self) -> &[LineProxy] {
        self.buffer.lines()
    }

    /// Joins all proxy texts with `\n`.
    pub fn serialize(&self) -> String {
        self.buffer.serialize()
    }

    /// Applies a range-replace delta to the projection and mirrors the
    /// resulting changes into `base`.
    ///
    /// Runs in one synchronous pass: the splice over the proxies, then the
    /// write-through of the in-place text mutation, then the base removal,
    /// then the base insertion. Returns the projection's own structural
    /// events (payloads materialized from the proxy caches).
    pub fn apply_change(&mut self, base: &mut Document, delta: &EditDelta) -> Vec<DocumentEvent> {
        let outcome = self.buffer.apply_change(delta);

        if let Some(index) = outcome.modified {
            if let Some(proxy) = self.buffer.line(index) {
                base.set_text_by_id(proxy.target(), proxy.text());
            }
        }

        let mut events = Vec::new();

        if !outcome.removed.is_empty() {
            self.sync_removed(base, &outcome.removed);
            events.push(DocumentEvent::LinesRemoved(
                outcome.removed.iter().map(LineProxy::to_line).collect(),
            ));
        }

        if let Some(run) = outcome.added {
            self.sync_added(base, run.anchor, run.start, run.count);
            let lines = self.buffer.lines()[run.start..run.start + run.count]
                .iter()
                .map(LineProxy::to_line)
                .collect();
            events.push(DocumentEvent::LinesAdded {
                at: run.anchor,
                lines,
            });
        }

        events
    }

    /// Removes the lines at the given projection indices and mirrors the
    /// removal into `base`.
    pub fn remove_lines(&mut self, base: &mut Document, indices: &[usize]) -> Vec<DocumentEvent> {
        let removed = self.buffer.remove_lines(indices);
        if removed.is_empty() {
            return Vec::new();
        }

        self.sync_removed(base, &removed);
        vec![DocumentEvent::LinesRemoved(
            removed.iter().map(LineProxy::to_line).collect(),
        )]
    }

    /// Maps removed proxies to base indices by identity and removes them in
    /// one batch. Proxies whose backing line is already gone are skipped.
    fn sync_removed(&self, base: &mut Document, removed: &[LineProxy]) {
        let indices: Vec<usize> = removed
            .iter()
            .filter_map(|proxy| base.index_of(proxy.target()))
            .collect();
        if !indices.is_empty() {
            base.remove_lines(&indices);
        }
    }

    /// Splices the backing lines of a newly inserted run into `base`.
    ///
    /// The proxy at `anchor` (in the already-updated sequence) locates the
    /// insertion point: its backing line's position in the base, insertion
    /// right after it. When the anchor's backing line cannot be found, an
    /// insertion reported at index 0 goes to the start of the base (this is
    /// also the empty-document bootstrap path, where the anchor is itself a
    /// new proxy); any other orphaned insertion is dropped.
    fn sync_added(&self, base: &mut Document, anchor: usize, start: usize, count: usize) {
        let lines: Vec<Line> = self.buffer.lines()[start..start + count]
            .iter()
            .map(LineProxy::to_line)
            .collect();

        let anchor_index = self
            .buffer
            .line(anchor)
            .and_then(|proxy| base.index_of(proxy.target()));

        match anchor_index {
            Some(index) => base.insert_lines(index + 1, lines),
            None if anchor == 0 => base.insert_lines(0, lines),
            None => {}
        }
    }
}
