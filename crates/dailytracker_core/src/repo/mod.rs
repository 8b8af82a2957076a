//! Repository layer: key-value persistence and typed tracker state.
//!
//! # Responsibility
//! - Define the persistence provider contract (`KeyValueStore`).
//! - Isolate SQLite and JSON encoding details from services.
//!
//! # Invariants
//! - Services never touch raw keys or encoded values directly.

pub mod kv_repo;
pub mod tracker_repo;
