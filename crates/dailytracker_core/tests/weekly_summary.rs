use chrono::{NaiveDate, TimeZone, Utc};
use dailytracker_core::db::open_db_in_memory;
use dailytracker_core::{
    ArchivedDay, DailyTracker, DayGoals, FoodEntry, ManualClock, SqliteKeyValueStore,
    TrackerError, TrackerRepository, WeeklyHistory,
};

fn archived(date: Option<NaiveDate>, calories: &[u32]) -> ArchivedDay {
    ArchivedDay {
        date,
        entries: calories
            .iter()
            .map(|kcal| FoodEntry::new("meal", *kcal, 10).unwrap())
            .collect(),
    }
}

#[test]
fn weekly_summary_reports_deficit_and_weight_loss() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let repo = TrackerRepository::new(store);
    let clock = ManualClock::utc(Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap());

    let mut history = WeeklyHistory::new();
    history.push(archived(None, &[2000]));
    history.push(archived(None, &[1200, 600]));
    repo.save_history(&history).unwrap();

    let tracker = DailyTracker::new(store, &clock);
    tracker.setup_goals("1800", "120").unwrap();
    let summary = tracker.weekly_summary().unwrap();

    assert_eq!(summary.weekly_goal, 12_600);
    assert_eq!(summary.weekly_total_calories, 3_800);
    assert_eq!(summary.weekly_deficit, 8_800);
    assert_eq!(summary.estimated_weight_loss_kg, 1.14);
}

#[test]
fn goals_setup_persists_all_onboarding_keys() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let clock = ManualClock::utc(Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap());
    let mut tracker = DailyTracker::new(store, &clock);

    assert!(!tracker.has_setup_goals().unwrap());
    assert_eq!(tracker.goals().unwrap(), DayGoals::default());

    let err = tracker.setup_goals("2k", "100").unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert!(!tracker.has_setup_goals().unwrap());

    tracker.setup_goals("2000", "150").unwrap();
    assert!(tracker.has_setup_goals().unwrap());
    assert_eq!(tracker.goals().unwrap(), DayGoals::new(2000, 150));

    tracker.on_activate().unwrap();
    tracker.add("Steak", "800", "60").unwrap();
    assert_eq!(tracker.remaining_calories().unwrap(), 1200);
    assert_eq!(tracker.remaining_protein().unwrap(), 90);
    tracker.add("Pizza", "1500", "50").unwrap();
    assert_eq!(tracker.remaining_calories().unwrap(), 0);
}

#[test]
fn calorie_bars_follow_archived_days() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    // 2026-05-06 is a Wednesday.
    let clock = ManualClock::utc(Utc.with_ymd_and_hms(2026, 5, 6, 9, 0, 0).unwrap());
    let mut tracker = DailyTracker::new(store, &clock);
    tracker.on_activate().unwrap();

    assert!(tracker.daily_calorie_bars().unwrap().is_empty());

    tracker.add("Bagel", "280", "10").unwrap();
    let bars = tracker.daily_calorie_bars().unwrap();

    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].label, "Wed");
    assert_eq!(bars[0].total, 280);
}
