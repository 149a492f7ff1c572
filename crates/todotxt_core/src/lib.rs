//! Core engine for a line-oriented todo.txt document model.
//!
//! Applies editor-style range-replace deltas to a canonical document, and
//! keeps a projected line view consistent with its base document by stable
//! line identity rather than by index.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::buffer::{DocumentLine, EditDelta, EditOutcome, InsertedRun, LineBuffer, Position};
pub use model::document::{Document, DocumentEvent};
pub use model::line::{Line, LineId};
pub use model::projection::{LineProxy, ProjectedDocument};
pub use repo::document_repo::{DocumentStore, RepoError, RepoResult, SqliteDocumentStore};
pub use service::document_service::DocumentService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
