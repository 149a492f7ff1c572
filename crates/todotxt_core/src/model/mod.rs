//! Line-document domain model.
//!
//! # Responsibility
//! - Define the canonical data structures for line-oriented documents.
//! - Implement range-replace editing and projection synchronization.
//!
//! # Invariants
//! - Every line carries a stable `LineId`; identity survives text mutation
//!   and is how a projection and its base stay matched.
//! - A document and a 1:1 projection over it serialize identically after
//!   any sequence of edits applied through the projection.

pub mod buffer;
pub mod document;
pub mod line;
pub mod projection;
