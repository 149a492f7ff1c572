//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and model calls into use-case level APIs.
//! - Keep editor surfaces decoupled from storage details.

pub mod document_service;
