//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate organizer, parser and index builders into one run.
//! - Keep the CLI decoupled from traversal and rendering details.

pub mod index_service;
