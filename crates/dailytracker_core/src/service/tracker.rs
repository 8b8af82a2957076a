//! Tracker facade used by presentation layers.
//!
//! # Responsibility
//! - Wire `EntryStore` and `RolloverPolicy` over one persistence provider.
//! - Run archival after every user-driven change to today's log.
//! - Expose goals, totals and weekly aggregates in one place.
//!
//! # Invariants
//! - Callers must `on_activate` before reading today's entries.
//! - Rollover clears never touch history; user mutations always archive.
//! - A mutation that fails part-way is rolled back in memory and in storage.

use crate::clock::Clock;
use crate::model::entry::{DailyLog, FoodEntry, FoodEntryId};
use crate::model::goals::DayGoals;
use crate::model::history::{ArchivedDay, WeeklyHistory};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::tracker_repo::TrackerRepository;
use crate::service::entry_store::EntryStore;
use crate::service::error::{TrackerError, TrackerResult};
use crate::service::rollover::{Activation, RolloverPolicy};
use crate::service::summary::{daily_calorie_bars, summarize, DailyCalorieBar, WeeklySummary};
use log::{info, warn};

/// Single-user daily tracker session.
pub struct DailyTracker<S: KeyValueStore + Clone, C: Clock> {
    repo: TrackerRepository<S>,
    entries: EntryStore<S>,
    rollover: RolloverPolicy<S, C>,
}

impl<S: KeyValueStore + Clone, C: Clock> DailyTracker<S, C> {
    /// Builds a tracker over `store` and `clock`.
    ///
    /// The in-memory log starts empty until `on_activate` runs.
    pub fn new(store: S, clock: C) -> Self {
        let repo = TrackerRepository::new(store);
        Self {
            entries: EntryStore::new(repo.clone()),
            rollover: RolloverPolicy::new(repo.clone(), clock),
            repo,
        }
    }

    /// Activation check; call whenever the app or view becomes active.
    pub fn on_activate(&mut self) -> TrackerResult<Activation> {
        Ok(self.rollover.on_activate(&mut self.entries)?)
    }

    /// Logs a food entry from raw form input.
    ///
    /// # Errors
    /// - `TrackerError::Validation` leaves every piece of state unchanged.
    pub fn add(
        &mut self,
        name: &str,
        calories_text: &str,
        protein_text: &str,
    ) -> TrackerResult<FoodEntry> {
        let previous = self.entries.entries().to_vec();
        let history = self.rollover.history()?;
        let entry = self.entries.add(name, calories_text, protein_text)?;
        self.archive_or_rollback(previous, &history, true)?;
        Ok(entry)
    }

    /// Deletes one entry; unknown ids are ignored.
    pub fn remove(&mut self, id: FoodEntryId) -> TrackerResult<bool> {
        let previous = self.entries.entries().to_vec();
        let history = self.rollover.history()?;
        let removed = self.entries.remove(id)?;
        self.archive_or_rollback(previous, &history, false)?;
        Ok(removed)
    }

    /// Empties today's log and archives the empty day.
    pub fn clear(&mut self) -> TrackerResult<()> {
        let previous = self.entries.entries().to_vec();
        let history = self.rollover.history()?;
        self.entries.clear()?;
        self.archive_or_rollback(previous, &history, false)
    }

    /// "Reset today": clear the log and drop the latest history slot.
    pub fn reset(&mut self) -> TrackerResult<Option<ArchivedDay>> {
        Ok(self.rollover.reset(&mut self.entries)?)
    }

    pub fn entries(&self) -> &[FoodEntry] {
        self.entries.entries()
    }

    pub fn total_calories(&self) -> u64 {
        self.entries.total_calories()
    }

    pub fn total_protein(&self) -> u64 {
        self.entries.total_protein()
    }

    /// Validates and stores onboarding goals.
    pub fn setup_goals(&self, calorie_text: &str, protein_text: &str) -> TrackerResult<DayGoals> {
        let goals = DayGoals::parse(calorie_text, protein_text)?;
        self.repo.save_goals(&goals)?;
        info!(
            "event=goals_setup module=tracker status=ok calorie_goal={} protein_goal={}",
            goals.calorie_goal, goals.protein_goal
        );
        Ok(goals)
    }

    pub fn goals(&self) -> TrackerResult<DayGoals> {
        Ok(self.repo.load_goals()?)
    }

    pub fn has_setup_goals(&self) -> TrackerResult<bool> {
        Ok(self.repo.has_setup_goals()?)
    }

    pub fn remaining_calories(&self) -> TrackerResult<u64> {
        Ok(self.goals()?.remaining_calories(self.total_calories()))
    }

    pub fn remaining_protein(&self) -> TrackerResult<u64> {
        Ok(self.goals()?.remaining_protein(self.total_protein()))
    }

    pub fn history(&self) -> TrackerResult<WeeklyHistory> {
        Ok(self.rollover.history()?)
    }

    pub fn weekly_summary(&self) -> TrackerResult<WeeklySummary> {
        Ok(summarize(&self.history()?, &self.goals()?))
    }

    pub fn daily_calorie_bars(&self) -> TrackerResult<Vec<DailyCalorieBar>> {
        Ok(daily_calorie_bars(&self.history()?))
    }

    /// Archives the current log (and records activity when `touch` is set).
    ///
    /// On failure, puts back `previous` and `history` before returning the
    /// original error.
    fn archive_or_rollback(
        &mut self,
        previous: DailyLog,
        history: &WeeklyHistory,
        touch: bool,
    ) -> TrackerResult<()> {
        let result = self
            .rollover
            .archive(self.entries.entries())
            .and_then(|_| if touch { self.rollover.touch() } else { Ok(()) });

        let Err(err) = result else {
            return Ok(());
        };

        let restored = self
            .entries
            .restore(previous)
            .and_then(|()| self.rollover.restore_history(history));
        match restored {
            Ok(()) => warn!("event=mutation_rollback module=tracker status=ok error={err}"),
            Err(rollback_err) => warn!(
                "event=mutation_rollback module=tracker status=error error={err} rollback_error={rollback_err}"
            ),
        }
        Err(TrackerError::from(err))
    }
}
