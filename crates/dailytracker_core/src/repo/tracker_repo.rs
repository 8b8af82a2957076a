//! Typed access to the tracker's persisted keys.
//!
//! # Responsibility
//! - Map domain values onto the fixed key set below.
//! - Encode values as JSON text over any `KeyValueStore`.
//! - Recover malformed persisted values by falling back to defaults.
//!
//! # Invariants
//! - A value that fails to decode is treated as absent and logged at `warn`;
//!   it never fails the caller.
//! - Store transport failures are always propagated.

use crate::model::entry::{DailyLog, FoodEntry};
use crate::model::goals::DayGoals;
use crate::model::history::WeeklyHistory;
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const KEY_CALORIE_GOAL: &str = "calorieGoal";
pub const KEY_PROTEIN_GOAL: &str = "proteinGoal";
pub const KEY_HAS_SETUP_GOALS: &str = "hasSetupGoals";
pub const KEY_FOOD_ENTRIES: &str = "foodEntries";
pub const KEY_WEEKLY_FOOD_ENTRIES: &str = "weeklyFoodEntries";
pub const KEY_WEEKLY_FOOD_DATES: &str = "weeklyFoodDates";
pub const KEY_LAST_OPENED_DATE: &str = "lastOpenedDate";

/// Persisted value present but not in the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub key: &'static str,
    pub message: String,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed value for `{}`: {}", self.key, self.message)
    }
}

impl Error for DecodeError {}

/// Decodes one persisted JSON value.
pub fn decode_value<T: DeserializeOwned>(key: &'static str, raw: &str) -> Result<T, DecodeError> {
    serde_json::from_str(raw).map_err(|err| DecodeError {
        key,
        message: err.to_string(),
    })
}

/// Typed repository over a key-value store.
#[derive(Debug, Clone)]
pub struct TrackerRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TrackerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current day's log; empty when absent or malformed.
    pub fn load_entries(&self) -> RepoResult<DailyLog> {
        Ok(self.read_json(KEY_FOOD_ENTRIES)?.unwrap_or_default())
    }

    pub fn save_entries(&self, entries: &[FoodEntry]) -> RepoResult<()> {
        self.write_json(KEY_FOOD_ENTRIES, entries)
    }

    /// Rolling history; empty when absent or malformed.
    ///
    /// Slot dates are optional side data: when they are missing or malformed
    /// the logs still load, undated.
    pub fn load_history(&self) -> RepoResult<WeeklyHistory> {
        let logs: Vec<DailyLog> = self
            .read_json(KEY_WEEKLY_FOOD_ENTRIES)?
            .unwrap_or_default();
        let dates: Option<Vec<Option<NaiveDate>>> = self.read_json(KEY_WEEKLY_FOOD_DATES)?;
        Ok(WeeklyHistory::from_parts(logs, dates))
    }

    pub fn save_history(&self, history: &WeeklyHistory) -> RepoResult<()> {
        self.write_json(KEY_WEEKLY_FOOD_ENTRIES, &history.logs())?;
        self.write_json(KEY_WEEKLY_FOOD_DATES, &history.dates())
    }

    pub fn load_last_opened(&self) -> RepoResult<Option<DateTime<Utc>>> {
        self.read_json(KEY_LAST_OPENED_DATE)
    }

    pub fn save_last_opened(&self, instant: DateTime<Utc>) -> RepoResult<()> {
        self.write_json(KEY_LAST_OPENED_DATE, &instant)
    }

    /// Stored goals; missing or malformed values read as zero.
    pub fn load_goals(&self) -> RepoResult<DayGoals> {
        Ok(DayGoals {
            calorie_goal: self.read_json(KEY_CALORIE_GOAL)?.unwrap_or(0),
            protein_goal: self.read_json(KEY_PROTEIN_GOAL)?.unwrap_or(0),
        })
    }

    /// Persists goals and marks onboarding complete.
    pub fn save_goals(&self, goals: &DayGoals) -> RepoResult<()> {
        self.write_json(KEY_CALORIE_GOAL, &goals.calorie_goal)?;
        self.write_json(KEY_PROTEIN_GOAL, &goals.protein_goal)?;
        self.write_json(KEY_HAS_SETUP_GOALS, &true)
    }

    pub fn has_setup_goals(&self) -> RepoResult<bool> {
        Ok(self.read_json(KEY_HAS_SETUP_GOALS)?.unwrap_or(false))
    }

    fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> RepoResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match decode_value(key, &raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(
                    "event=state_decode module=repo status=fallback key={} error={}",
                    err.key, err.message
                );
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> RepoResult<()> {
        let encoded = serde_json::to_string(value).map_err(|err| RepoError::Encode {
            key,
            message: err.to_string(),
        })?;
        self.store.set(key, &encoded)
    }
}
