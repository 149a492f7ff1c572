//! Generic line buffer and the range-replace edit algorithm.
//!
//! # Responsibility
//! - Implement the splice algorithm shared by `Document` (over `Line`) and
//!   `ProjectedDocument` (over `LineProxy`).
//! - Normalize removal index sets and report structural changes to callers.
//!
//! # Invariants
//! - Applying a delta is equivalent to a substring replace on the joined
//!   text: the half-open range `from..to` is replaced by the inserted lines
//!   joined with `\n`.
//! - The line at `from.line` is mutated in place, never recreated, so its
//!   identity survives the edit.
//! - Removals are reported before additions for a single edit.

use serde::{Deserialize, Serialize};

/// A line/column coordinate in a buffer.
///
/// Serializes as `{line, ch}`, the shape editor surfaces emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    #[serde(rename = "ch")]
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A range-replace edit instruction.
///
/// Means "replace the text between `from` and `to` with `inserted` joined by
/// newline". A delta missing either endpoint is a caller contract violation
/// and is ignored. Serializes as `{from, to, text}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDelta {
    #[serde(default)]
    pub from: Option<Position>,
    #[serde(default)]
    pub to: Option<Position>,
    #[serde(rename = "text", default)]
    pub inserted: Vec<String>,
}

impl EditDelta {
    /// Convenience constructor for a fully specified delta.
    pub fn new(from: Position, to: Position, inserted: Vec<String>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            inserted,
        }
    }
}

/// Location of lines inserted by an edit, in post-edit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedRun {
    /// Index the addition is reported at: `from.line` for a range replace,
    /// `0` for the empty-buffer bootstrap.
    pub anchor: usize,
    /// Index of the first newly created line in the updated sequence.
    pub start: usize,
    /// Number of newly created lines.
    pub count: usize,
}

/// Structural result of one edit, removals listed before additions apply.
#[derive(Debug)]
pub struct EditOutcome<L> {
    /// Lines spliced out of the sequence, in their original order.
    pub removed: Vec<L>,
    /// Newly created lines, when the delta inserted more lines than it kept.
    pub added: Option<InsertedRun>,
    /// Index of the kept line whose text was rewritten in place.
    pub modified: Option<usize>,
}

impl<L> EditOutcome<L> {
    fn noop() -> Self {
        Self {
            removed: Vec::new(),
            added: None,
            modified: None,
        }
    }

    /// Returns whether the edit changed anything at all.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.added.is_none() && self.modified.is_none()
    }
}

/// Capability contract a buffer needs from its line type.
///
/// `Line` and `LineProxy` both implement it; the two types are otherwise
/// unrelated.
pub trait DocumentLine {
    /// Constructs a line from raw text.
    fn from_text(text: &str) -> Self;

    /// Returns the full line text.
    fn text(&self) -> &str;

    /// Replaces the text, recomputing derived fields.
    fn set_text(&mut self, text: &str);

    /// Renders the line, optionally without its date token.
    fn render(&self, exclude_date: bool) -> &str;
}

/// An ordered, mutable sequence of lines with range-replace editing.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer<L> {
    lines: Vec<L>,
}

impl<L: DocumentLine> LineBuffer<L> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Builds a buffer from raw text split on `\n`.
    ///
    /// Splitting the empty string yields one empty line, matching the
    /// joined-text round trip (`serialize` of one empty line is `""`).
    pub fn from_text(raw: &str) -> Self {
        Self {
            lines: raw.split('\n').map(L::from_text).collect(),
        }
    }

    /// Replaces the whole sequence from raw text. The only bulk-replace path.
    pub fn replace_with_text(&mut self, raw: &str) {
        self.lines = raw.split('\n').map(L::from_text).collect();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&L> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[L] {
        &self.lines
    }

    /// Joins all line texts with `\n`.
    pub fn serialize(&self) -> String {
        self.lines
            .iter()
            .map(DocumentLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Inserts prebuilt lines at `index` (clamped to the sequence end).
    pub fn insert_lines(&mut self, index: usize, lines: Vec<L>) {
        let index = index.min(self.lines.len());
        self.lines.splice(index..index, lines);
    }

    /// Rewrites the text of the line at `index` in place.
    pub fn set_line_text(&mut self, index: usize, text: &str) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Removes the lines at the given pre-removal indices in one batch.
    ///
    /// Indices are deduplicated and processed in descending numeric order so
    /// earlier removals do not shift later ones. Out-of-range indices are
    /// ignored. The removed lines are returned in their original
    /// top-to-bottom order.
    pub fn remove_lines(&mut self, indices: &[usize]) -> Vec<L> {
        let mut normalized = indices.to_vec();
        normalized.sort_unstable_by(|a, b| b.cmp(a));
        normalized.dedup();

        let mut removed = Vec::new();
        for index in normalized {
            if index < self.lines.len() {
                removed.push(self.lines.remove(index));
            }
        }
        removed.reverse();
        removed
    }

    /// Applies a range-replace delta to the sequence.
    ///
    /// The algorithm:
    /// 1. Empty-buffer bootstrap: a `(0,0)-(0,0)` delta on an empty sequence
    ///    appends one new line per inserted entry.
    /// 2. Otherwise the prefix of `from.line` (before `from.column`) and the
    ///    suffix of `to.line` (after `to.column`) are captured, the lines
    ///    strictly after `from.line` through `to.line` are spliced out, the
    ///    kept line at `from.line` is rewritten to `prefix + first inserted
    ///    entry` (plus the suffix when it is also the last entry), and any
    ///    further entries become new lines spliced in right after it.
    pub fn apply_change(&mut self, delta: &EditDelta) -> EditOutcome<L> {
        let (Some(from), Some(to)) = (delta.from, delta.to) else {
            return EditOutcome::noop();
        };

        if self.lines.is_empty() {
            if from == Position::new(0, 0) && to == Position::new(0, 0) {
                let created: Vec<L> = delta
                    .inserted
                    .iter()
                    .map(|text| L::from_text(text))
                    .collect();
                let count = created.len();
                self.lines.extend(created);
                return EditOutcome {
                    removed: Vec::new(),
                    added: (count > 0).then_some(InsertedRun {
                        anchor: 0,
                        start: 0,
                        count,
                    }),
                    modified: None,
                };
            }
            return EditOutcome::noop();
        }

        if from.line >= self.lines.len() || to.line >= self.lines.len() || to.line < from.line {
            return EditOutcome::noop();
        }

        let prefix = slice_before(self.lines[from.line].text(), from.column).to_string();
        let suffix = slice_after(self.lines[to.line].text(), to.column).to_string();

        let removed: Vec<L> = self.lines.drain(from.line + 1..=to.line).collect();

        // A pure deletion arrives as a single empty entry; normalize an empty
        // list to the same shape so the prefix/suffix merge still happens.
        let empty = [String::new()];
        let inserted: &[String] = if delta.inserted.is_empty() {
            &empty
        } else {
            &delta.inserted
        };

        let last = inserted.len() - 1;
        let mut created: Vec<L> = Vec::new();
        for (i, entry) in inserted.iter().enumerate() {
            let mut text = String::new();
            if i == 0 {
                text.push_str(&prefix);
            }
            text.push_str(entry);
            if i == last {
                text.push_str(&suffix);
            }

            if i == 0 {
                self.lines[from.line].set_text(&text);
            } else {
                created.push(L::from_text(&text));
            }
        }

        let count = created.len();
        if count > 0 {
            self.lines.splice(from.line + 1..from.line + 1, created);
        }

        EditOutcome {
            removed,
            added: (count > 0).then_some(InsertedRun {
                anchor: from.line,
                start: from.line + 1,
                count,
            }),
            modified: Some(from.line),
        }
    }
}

/// Returns the part of `text` before byte column `column`, clamped to the
/// text length and backed off to the nearest character boundary.
fn slice_before(text: &str, column: usize) -> &str {
    &text[..clamp_column(text, column)]
}

/// Returns the part of `text` from byte column `column` onward.
fn slice_after(text: &str, column: usize) -> &str {
    &text[clamp_column(text, column)..]
}

fn clamp_column(text: &str, column: usize) -> usize {
    let mut column = column.min(text.len());
    while !text.is_char_boundary(column) {
        column -= 1;
    }
    column
}
