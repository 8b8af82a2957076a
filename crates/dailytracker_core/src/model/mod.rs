//! Domain model for daily food logging.
//!
//! # Responsibility
//! - Define entries, goals and the rolling history window.
//! - Keep input parsing rules next to the types they build.
//!
//! # Invariants
//! - Every entry is identified by a stable `FoodEntryId`.
//! - History never holds more than `HISTORY_CAPACITY` days.

pub mod entry;
pub mod goals;
pub mod history;
