//! Rolling seven-day history of archived daily logs.
//!
//! # Responsibility
//! - Hold archived days oldest-first in a bounded FIFO window.
//! - Track the calendar day each slot belongs to when it is known.
//!
//! # Invariants
//! - `len() <= HISTORY_CAPACITY` at all times.
//! - Appending to a full window evicts index 0 first.
//! - At most one slot per known calendar day is written by `record_day`.

use crate::model::entry::{log_calories, DailyLog, FoodEntry};
use chrono::NaiveDate;

/// Maximum number of archived days kept.
pub const HISTORY_CAPACITY: usize = 7;

/// One archived calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedDay {
    /// `None` for slots written before day tracking existed.
    pub date: Option<NaiveDate>,
    pub entries: DailyLog,
}

impl ArchivedDay {
    pub fn total_calories(&self) -> u64 {
        log_calories(&self.entries)
    }
}

/// What `WeeklyHistory::record_day` did with the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The last slot already belonged to the day and was overwritten.
    Replaced,
    /// A new slot was appended; `evicted` is true when the oldest slot dropped out.
    Appended { evicted: bool },
}

/// Bounded, oldest-first window of archived days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyHistory {
    days: Vec<ArchivedDay>,
}

impl WeeklyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds history from persisted parts.
    ///
    /// `dates` is only trusted when it lines up one-to-one with `logs`;
    /// otherwise every slot is treated as undated. Inputs longer than the
    /// window keep the newest `HISTORY_CAPACITY` days.
    pub fn from_parts(logs: Vec<DailyLog>, dates: Option<Vec<Option<NaiveDate>>>) -> Self {
        let dates = match dates {
            Some(dates) if dates.len() == logs.len() => dates,
            _ => vec![None; logs.len()],
        };

        let mut days = logs
            .into_iter()
            .zip(dates)
            .map(|(entries, date)| ArchivedDay { date, entries })
            .collect::<Vec<_>>();

        let overflow = days.len().saturating_sub(HISTORY_CAPACITY);
        days.drain(..overflow);
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Archived days, oldest first.
    pub fn days(&self) -> &[ArchivedDay] {
        &self.days
    }

    pub fn last(&self) -> Option<&ArchivedDay> {
        self.days.last()
    }

    /// Appends a day, evicting the oldest one when the window is full.
    ///
    /// Returns the evicted day, if any.
    pub fn push(&mut self, day: ArchivedDay) -> Option<ArchivedDay> {
        let evicted = if self.days.len() >= HISTORY_CAPACITY {
            Some(self.days.remove(0))
        } else {
            None
        };
        self.days.push(day);
        evicted
    }

    /// Writes `entries` as the slot for `date`.
    ///
    /// Overwrites the last slot when it is already dated `date`; otherwise
    /// appends a new slot.
    pub fn record_day(&mut self, date: NaiveDate, entries: &[FoodEntry]) -> ArchiveOutcome {
        if let Some(last) = self.days.last_mut() {
            if last.date == Some(date) {
                last.entries = entries.to_vec();
                return ArchiveOutcome::Replaced;
            }
        }

        let evicted = self.push(ArchivedDay {
            date: Some(date),
            entries: entries.to_vec(),
        });
        ArchiveOutcome::Appended {
            evicted: evicted.is_some(),
        }
    }

    /// Removes the most recent slot.
    pub fn pop_last(&mut self) -> Option<ArchivedDay> {
        self.days.pop()
    }

    /// Logs in persisted order.
    pub fn logs(&self) -> Vec<&DailyLog> {
        self.days.iter().map(|day| &day.entries).collect()
    }

    /// Slot dates in persisted order.
    pub fn dates(&self) -> Vec<Option<NaiveDate>> {
        self.days.iter().map(|day| day.date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveOutcome, ArchivedDay, WeeklyHistory, HISTORY_CAPACITY};
    use crate::model::entry::FoodEntry;
    use chrono::NaiveDate;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, n).unwrap()
    }

    fn undated(calories: u32) -> ArchivedDay {
        ArchivedDay {
            date: None,
            entries: vec![FoodEntry::new("x", calories, 0).unwrap()],
        }
    }

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut history = WeeklyHistory::new();
        for calories in 1..=7 {
            assert!(history.push(undated(calories)).is_none());
        }

        let evicted = history.push(undated(8)).unwrap();
        assert_eq!(evicted.total_calories(), 1);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.days()[0].total_calories(), 2);
        assert_eq!(history.last().unwrap().total_calories(), 8);
    }

    #[test]
    fn record_day_replaces_same_day_and_appends_new_day() {
        let mut history = WeeklyHistory::new();
        let breakfast = vec![FoodEntry::new("eggs", 200, 14).unwrap()];
        let mut lunch = breakfast.clone();
        lunch.push(FoodEntry::new("rice", 300, 6).unwrap());

        assert_eq!(
            history.record_day(day(1), &breakfast),
            ArchiveOutcome::Appended { evicted: false }
        );
        assert_eq!(history.record_day(day(1), &lunch), ArchiveOutcome::Replaced);
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().total_calories(), 500);

        history.record_day(day(2), &[]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn undated_slot_is_never_treated_as_today() {
        let mut history = WeeklyHistory::new();
        history.push(undated(100));

        let outcome = history.record_day(day(5), &[]);
        assert_eq!(outcome, ArchiveOutcome::Appended { evicted: false });
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn from_parts_keeps_newest_days_and_drops_misaligned_dates() {
        let logs = (1..=9)
            .map(|calories| vec![FoodEntry::new("x", calories, 0).unwrap()])
            .collect::<Vec<_>>();
        let history = WeeklyHistory::from_parts(logs, Some(vec![Some(day(1))]));

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.days()[0].total_calories(), 3);
        assert!(history.dates().iter().all(Option::is_none));
    }
}
