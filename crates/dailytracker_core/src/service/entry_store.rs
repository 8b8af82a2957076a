//! Current-day entry store.
//!
//! # Responsibility
//! - Own the in-memory log for the current calendar day.
//! - Persist the log after every mutation.
//!
//! # Invariants
//! - A rejected `add` changes nothing in memory or in storage.
//! - A mutation whose persist fails is rolled back in memory.

use crate::model::entry::{log_calories, log_protein, DailyLog, FoodEntry, FoodEntryId};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use crate::repo::tracker_repo::TrackerRepository;
use crate::service::error::TrackerResult;
use log::debug;

/// Owner of the current day's `DailyLog`.
pub struct EntryStore<S: KeyValueStore> {
    repo: TrackerRepository<S>,
    entries: DailyLog,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Creates an empty store. Call `load` (or activate the tracker) to
    /// populate it from storage.
    pub fn new(repo: TrackerRepository<S>) -> Self {
        Self {
            repo,
            entries: DailyLog::new(),
        }
    }

    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses form input and appends the resulting entry.
    ///
    /// # Errors
    /// - `TrackerError::Validation` for an empty name or non-numeric amounts.
    /// - `TrackerError::Repo` when the log cannot be persisted.
    pub fn add(
        &mut self,
        name: &str,
        calories_text: &str,
        protein_text: &str,
    ) -> TrackerResult<FoodEntry> {
        let entry = FoodEntry::parse(name, calories_text, protein_text)?;
        self.push(entry.clone())?;
        Ok(entry)
    }

    /// Appends an already-built entry and persists the log.
    pub fn push(&mut self, entry: FoodEntry) -> RepoResult<()> {
        self.entries.push(entry);
        if let Err(err) = self.persist() {
            self.entries.pop();
            return Err(err);
        }
        debug!(
            "event=entry_add module=entry_store status=ok count={}",
            self.entries.len()
        );
        Ok(())
    }

    /// Removes the entry with `id`.
    ///
    /// Returns `false` when no entry matched; the log is still persisted.
    pub fn remove(&mut self, id: FoodEntryId) -> RepoResult<bool> {
        let previous = self.entries.clone();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != previous.len();

        if let Err(err) = self.persist() {
            self.entries = previous;
            return Err(err);
        }
        debug!("event=entry_remove module=entry_store status=ok removed={removed} entry_id={id}");
        Ok(removed)
    }

    /// Empties the log and persists the empty state.
    pub fn clear(&mut self) -> RepoResult<()> {
        let previous = std::mem::take(&mut self.entries);
        if let Err(err) = self.persist() {
            self.entries = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Puts back a previous log and persists it.
    ///
    /// Used to undo a mutation whose follow-up writes failed.
    pub fn restore(&mut self, previous: DailyLog) -> RepoResult<()> {
        self.entries = previous;
        self.persist()
    }

    /// Replaces the in-memory log verbatim without persisting.
    pub fn load(&mut self, entries: DailyLog) {
        self.entries = entries;
    }

    pub fn total_calories(&self) -> u64 {
        log_calories(&self.entries)
    }

    pub fn total_protein(&self) -> u64 {
        log_protein(&self.entries)
    }

    fn persist(&self) -> RepoResult<()> {
        self.repo.save_entries(&self.entries)
    }
}
