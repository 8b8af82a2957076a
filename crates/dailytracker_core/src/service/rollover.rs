//! Day rollover, archival and reset policy.
//!
//! # Responsibility
//! - Decide on activation whether the stored log still belongs to today.
//! - Archive the current log into the rolling seven-day history.
//! - Undo the most recent archival on explicit reset.
//!
//! # Invariants
//! - Rollover compares calendar days, never elapsed time.
//! - Activating twice on the same calendar day leaves storage untouched.
//! - History holds at most one slot per calendar day written here.

use crate::clock::Clock;
use crate::model::entry::FoodEntry;
use crate::model::history::{ArchiveOutcome, ArchivedDay, WeeklyHistory};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::repo::tracker_repo::TrackerRepository;
use crate::service::entry_store::EntryStore;
use chrono::NaiveDate;
use log::{debug, info};

/// Result of an activation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Stored log belongs to today and was loaded.
    SameDay { loaded: usize },
    /// Calendar day changed since `last_day`; the current log was cleared.
    NewDay { last_day: NaiveDate, today: NaiveDate },
}

/// Owner of `WeeklyHistory` and the `lastOpenedDate` bookkeeping.
pub struct RolloverPolicy<S: KeyValueStore, C: Clock> {
    repo: TrackerRepository<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> RolloverPolicy<S, C> {
    pub fn new(repo: TrackerRepository<S>, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Runs the activation rule against `store`.
    ///
    /// - Missing `lastOpenedDate` counts as now.
    /// - New day: clear the log, persist `lastOpenedDate` as today's
    ///   midnight, skip loading.
    /// - Same day: load the persisted log verbatim.
    pub fn on_activate<T: KeyValueStore>(
        &self,
        store: &mut EntryStore<T>,
    ) -> RepoResult<Activation> {
        let now = self.clock.now();
        let last_opened = self.repo.load_last_opened()?.unwrap_or(now);
        let today = self.clock.start_of_day(now);
        let last_day = self.clock.start_of_day(last_opened);

        if today != last_day {
            store.clear()?;
            self.repo.save_last_opened(self.clock.midnight(today))?;
            info!(
                "event=rollover module=rollover status=new_day last_day={last_day} today={today}"
            );
            return Ok(Activation::NewDay { last_day, today });
        }

        let entries = self.repo.load_entries()?;
        let loaded = entries.len();
        store.load(entries);
        debug!("event=rollover module=rollover status=same_day loaded={loaded}");
        Ok(Activation::SameDay { loaded })
    }

    /// Writes `entries` as today's history slot.
    pub fn archive(&self, entries: &[FoodEntry]) -> RepoResult<ArchiveOutcome> {
        let mut history = self.repo.load_history()?;
        let today = self.clock.today();
        let outcome = history.record_day(today, entries);
        self.repo.save_history(&history)?;

        debug!(
            "event=archive module=rollover status=ok day={today} outcome={outcome:?} history_len={}",
            history.len()
        );
        Ok(outcome)
    }

    /// Records activity now.
    pub fn touch(&self) -> RepoResult<()> {
        self.repo.save_last_opened(self.clock.now())
    }

    /// Clears today and drops the most recent history slot.
    ///
    /// Returns the dropped slot, if history was non-empty.
    pub fn reset<T: KeyValueStore>(
        &self,
        store: &mut EntryStore<T>,
    ) -> RepoResult<Option<ArchivedDay>> {
        store.clear()?;
        self.repo.save_last_opened(self.clock.now())?;

        let mut history = self.repo.load_history()?;
        let dropped = history.pop_last();
        if dropped.is_some() {
            self.repo.save_history(&history)?;
        }

        info!(
            "event=reset module=rollover status=ok dropped_slot={} history_len={}",
            dropped.is_some(),
            history.len()
        );
        Ok(dropped)
    }

    /// Writes back a history snapshot taken before a failed archival.
    pub fn restore_history(&self, history: &WeeklyHistory) -> RepoResult<()> {
        self.repo.save_history(history)
    }

    /// Current rolling history, oldest first.
    pub fn history(&self) -> RepoResult<WeeklyHistory> {
        self.repo.load_history()
    }
}
