//! Storage layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the document store contract the core is written against.
//! - Isolate SQLite query details from model/service code.
//!
//! # Invariants
//! - A missing document reads back as `None`, never as an error.
//! - Writes upsert by document name.

pub mod document_repo;
