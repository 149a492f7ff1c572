//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `todotxt_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use todotxt_core::{Document, EditDelta, Position};

fn main() {
    println!("todotxt_core version={}", todotxt_core::core_version());

    let mut document = Document::from_text("todo", "2014-01-01 write the readme\nx ship it");
    document.apply_change(&EditDelta::new(
        Position::new(1, 2),
        Position::new(1, 6),
        vec!["release".to_string()],
    ));
    println!("todotxt_core demo={:?}", document.serialize());
}
