//! Core domain logic for DailyTracker.
//! This crate owns the rollover, archival and persistence rules; UI layers
//! call into it and render what it returns.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::entry::{DailyLog, FoodEntry, FoodEntryId, ValidationError};
pub use model::goals::DayGoals;
pub use model::history::{ArchiveOutcome, ArchivedDay, WeeklyHistory, HISTORY_CAPACITY};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::tracker_repo::{DecodeError, TrackerRepository};
pub use service::entry_store::EntryStore;
pub use service::error::{TrackerError, TrackerResult};
pub use service::rollover::{Activation, RolloverPolicy};
pub use service::summary::{
    daily_calorie_bars, estimated_weight_loss_kg, summarize, weekly_deficit, weekly_goal,
    weekly_total_calories, DailyCalorieBar, WeeklySummary, KCAL_PER_KG_FAT,
};
pub use service::tracker::DailyTracker;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
