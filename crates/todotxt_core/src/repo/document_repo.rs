//! Document store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the read/write API the document lifecycle is defined against:
//!   `read_document(name) -> Option<text>`, `write_document(name, text)`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The only persisted artifact is the newline-joined document text; no
//!   extra metadata, headers, or framing.
//! - `write_document` is an upsert keyed by name.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level failure for document persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed raw-text storage for documents.
///
/// Any name-to-text store satisfies this contract; the core never assumes
/// more than these two operations.
pub trait DocumentStore {
    /// Reads the stored text for `name`, or `None` when absent.
    fn read_document(&self, name: &str) -> RepoResult<Option<String>>;

    /// Stores `text` under `name`, replacing any previous content.
    fn write_document(&self, name: &str, text: &str) -> RepoResult<()>;
}

/// SQLite-backed document store.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn read_document(&self, name: &str) -> RepoResult<Option<String>> {
        let content = self
            .conn
            .query_row(
                "SELECT content FROM documents WHERE name = ?1;",
                [name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(content)
    }

    fn write_document(&self, name: &str, text: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO documents (name, content) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                content = excluded.content,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![name, text],
        )?;
        Ok(())
    }
}
