//! Tracker use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations the UI layer invokes.
//! - Keep presentation surfaces decoupled from storage details.

pub mod entry_store;
pub mod error;
pub mod rollover;
pub mod summary;
pub mod tracker;
