//! Domain model for indexed summary notes.
//!
//! # Responsibility
//! - Define the explicit record every downstream stage reads.
//!
//! # Invariants
//! - Records are built once from file text and never re-parsed.

pub mod summary;
