//! Time source used for day-boundary decisions.
//!
//! # Responsibility
//! - Provide the current instant and its calendar day.
//! - Let tests pin time and timezone deterministically.
//!
//! # Invariants
//! - `start_of_day` is pure: the same instant always maps to the same day.

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};
use std::cell::Cell;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Clock provider consumed by rollover logic.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day containing `instant` in the clock's timezone.
    fn start_of_day(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// First instant of `day` in the clock's timezone.
    fn midnight(&self, day: NaiveDate) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.start_of_day(self.now())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn start_of_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        (**self).start_of_day(instant)
    }

    fn midnight(&self, day: NaiveDate) -> DateTime<Utc> {
        (**self).midnight(day)
    }
}

// DST gaps can skip local midnight; the day then starts at the first local
// time that exists.
fn first_instant<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    (0..MINUTES_PER_DAY)
        .map(|minute| midnight + Duration::minutes(minute))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight).with_timezone(&Utc))
}

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn start_of_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }

    fn midnight(&self, day: NaiveDate) -> DateTime<Utc> {
        first_instant(&Local, day)
    }
}

/// Manually driven clock with a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
    offset: FixedOffset,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Cell::new(now),
            offset,
        }
    }

    /// Clock pinned to `now` in UTC.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn start_of_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn midnight(&self, day: NaiveDate) -> DateTime<Utc> {
        first_instant(&self.offset, day)
    }
}

#[cfg(test)]
mod tests {
    use super::{first_instant, Clock, ManualClock};
    use chrono::{
        Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
    };

    /// UTC-3 zone that springs forward to UTC-2 at local midnight on 2026-09-06.
    #[derive(Debug, Clone, Copy)]
    struct MidnightGapZone;

    impl MidnightGapZone {
        fn before() -> FixedOffset {
            FixedOffset::west_opt(3 * 3600).unwrap()
        }

        fn after() -> FixedOffset {
            FixedOffset::west_opt(2 * 3600).unwrap()
        }

        fn gap_start() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2026, 9, 6)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        }
    }

    impl TimeZone for MidnightGapZone {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            MidnightGapZone
        }

        fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::None
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::gap_start();
            if *local < gap_start {
                LocalResult::Single(Self::before())
            } else if *local < gap_start + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::after())
            }
        }

        fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
            Self::before()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::gap_start() + Duration::hours(3) {
                Self::before()
            } else {
                Self::after()
            }
        }
    }

    #[test]
    fn start_of_day_uses_clock_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 5, 6, 23, 30, 0).unwrap();
        let utc = ManualClock::utc(instant);
        let east = ManualClock::new(instant, FixedOffset::east_opt(2 * 3600).unwrap());

        assert_eq!(utc.today(), NaiveDate::from_ymd_opt(2026, 5, 6).unwrap());
        assert_eq!(east.today(), NaiveDate::from_ymd_opt(2026, 5, 7).unwrap());
    }

    #[test]
    fn midnight_is_offset_aware() {
        let instant = Utc.with_ymd_and_hms(2026, 5, 6, 12, 0, 0).unwrap();
        let east = ManualClock::new(instant, FixedOffset::east_opt(2 * 3600).unwrap());
        let day = east.today();

        assert_eq!(
            east.midnight(day),
            Utc.with_ymd_and_hms(2026, 5, 5, 22, 0, 0).unwrap()
        );
        assert_eq!(east.start_of_day(east.midnight(day)), day);
    }

    #[test]
    fn skipped_midnight_starts_day_at_first_valid_local_time() {
        let day = NaiveDate::from_ymd_opt(2026, 9, 6).unwrap();
        let start = first_instant(&MidnightGapZone, day);

        // 01:00 local at UTC-2.
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 9, 6, 3, 0, 0).unwrap());
        assert_eq!(start.with_timezone(&MidnightGapZone).date_naive(), day);
    }

    #[test]
    fn advance_moves_now_forward() {
        let clock = ManualClock::utc(Utc.with_ymd_and_hms(2026, 5, 6, 12, 0, 0).unwrap());
        clock.advance(Duration::hours(13));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 5, 7).unwrap());
    }
}
