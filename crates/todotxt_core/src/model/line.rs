//! Line domain model.
//!
//! # Responsibility
//! - Hold one line of document text plus fields derived from it.
//! - Extract the leading `YYYY-MM-DD ` date token when one is present.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the line; `set_text` never changes it.
//! - When a date token was extracted, `date_token() + text_without_date()`
//!   reconstructs `text()` exactly; otherwise `text_without_date() == text()`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Stable identifier for a line.
///
/// Lines are matched across a document and its projection by this handle,
/// never by text comparison or by position.
pub type LineId = Uuid;

static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} ").expect("valid date token regex"));

const DATE_TOKEN_FORMAT: &str = "%Y-%m-%d ";

/// Splits `text` into its leading date token and the remainder.
///
/// The token must sit at the very start of the line, match `YYYY-MM-DD `
/// (trailing space included) and name a valid calendar date. A digit pattern
/// that is not a real date (`2014-13-99 `) is treated as plain text.
pub(crate) fn parse_date_token(text: &str) -> (Option<NaiveDate>, String) {
    if let Some(found) = DATE_TOKEN_RE.find(text) {
        let token = found.as_str();
        if let Ok(date) = NaiveDate::parse_from_str(token.trim_end(), "%Y-%m-%d") {
            return (Some(date), text[token.len()..].to_string());
        }
    }
    (None, text.to_string())
}

/// One line of a document.
///
/// The atomic content unit: owns its text and keeps the date-derived fields
/// in sync with it. Cheap to clone; clones share the `LineId` of the line
/// they were taken from, so event payloads stay matchable against the
/// sequence they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    text: String,
    date: Option<NaiveDate>,
    text_without_date: String,
}

impl Line {
    /// Creates a line with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    /// Creates a line with a caller-provided id.
    ///
    /// Used when materializing a projection-created line into the base
    /// document, where the identity already exists on the proxy side.
    pub fn with_id(id: LineId, text: impl Into<String>) -> Self {
        let text = text.into();
        let (date, text_without_date) = parse_date_token(&text);
        Self {
            id,
            text,
            date,
            text_without_date,
        }
    }

    /// Returns the stable line id.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Returns the full line text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the parsed leading date, if the line starts with a date token.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the line text with the leading date token removed.
    pub fn text_without_date(&self) -> &str {
        &self.text_without_date
    }

    /// Returns the extracted date token in its on-line form (`YYYY-MM-DD `).
    pub fn date_token(&self) -> Option<String> {
        self.date
            .map(|date| date.format(DATE_TOKEN_FORMAT).to_string())
    }

    /// Replaces the text and recomputes every derived field.
    ///
    /// Pure in-place mutation: the id is untouched, which is what lets a
    /// projection keep pointing at this line across edits.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        let (date, text_without_date) = parse_date_token(text);
        self.date = date;
        self.text_without_date = text_without_date;
    }

    /// Renders the line, optionally without its date token.
    pub fn render(&self, exclude_date: bool) -> &str {
        if exclude_date {
            &self.text_without_date
        } else {
            &self.text
        }
    }
}
