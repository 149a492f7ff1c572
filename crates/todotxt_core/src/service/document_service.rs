//! Document use-case service.
//!
//! # Responsibility
//! - Load and persist named documents through a [`DocumentStore`].
//! - Provide the archive-completed batch removal over a document.
//!
//! # Invariants
//! - A load unconditionally replaces the document's lines, regardless of
//!   edits made while the read was pending; last writer wins, no merge.
//! - Persist writes exactly `Document::serialize()` and nothing else.

use crate::model::document::{Document, DocumentEvent};
use crate::repo::document_repo::{DocumentStore, RepoResult};
use log::info;

/// Use-case facade over a document store.
///
/// Debouncing of persist calls is the editor surface's job; this service
/// persists exactly when asked.
pub struct DocumentService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> DocumentService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Opens the named document, populated from the store.
    ///
    /// A name with no stored content opens as a single empty line, the same
    /// state an empty stored text loads to.
    pub fn open(&self, name: &str) -> RepoResult<Document> {
        let mut document = Document::new(name);
        self.load(&mut document)?;
        Ok(document)
    }

    /// Reloads the document's lines from the store.
    ///
    /// Returns the raw text that was loaded (the load-complete payload).
    pub fn load(&self, document: &mut Document) -> RepoResult<String> {
        let raw = self
            .store
            .read_document(document.name())?
            .unwrap_or_default();
        document.load_text(&raw);
        info!(
            "event=document_load module=service status=ok name={} lines={}",
            document.name(),
            document.len()
        );
        Ok(raw)
    }

    /// Writes the document's serialized text to the store.
    pub fn persist(&self, document: &Document) -> RepoResult<()> {
        self.store
            .write_document(document.name(), &document.serialize())?;
        info!(
            "event=document_persist module=service status=ok name={} lines={}",
            document.name(),
            document.len()
        );
        Ok(())
    }

    /// Removes every completed task line (`x ` / `X ` prefix) in one batch.
    ///
    /// Returns the removal events so callers can re-render.
    pub fn archive_completed(&self, document: &mut Document) -> Vec<DocumentEvent> {
        let indices: Vec<usize> = document
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| is_completed(line.text()))
            .map(|(index, _)| index)
            .collect();

        if indices.is_empty() {
            return Vec::new();
        }

        let events = document.remove_lines(&indices);
        info!(
            "event=archive_completed module=service status=ok name={} removed={}",
            document.name(),
            indices.len()
        );
        events
    }
}

/// todo.txt convention: a completed task starts with a lowercase or
/// uppercase `x` followed by a space.
fn is_completed(text: &str) -> bool {
    text.starts_with("x ") || text.starts_with("X ")
}

#[cfg(test)]
mod tests {
    use super::is_completed;

    #[test]
    fn is_completed_requires_leading_x_and_space() {
        assert!(is_completed("x done thing"));
        assert!(is_completed("X 2014-01-01 done thing"));
        assert!(!is_completed("xylophone practice"));
        assert!(!is_completed(" x indented"));
    }
}
