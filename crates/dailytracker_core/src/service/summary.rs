//! Weekly aggregates derived from the rolling history.
//!
//! All functions are pure and return zeros for an empty history.

use crate::model::goals::DayGoals;
use crate::model::history::WeeklyHistory;
use chrono::{Datelike, NaiveDate};

/// Energy in one kilogram of body fat, in kcal.
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

const DAYS_PER_WEEK: u64 = 7;

/// Short weekday symbols, Sunday first.
pub const SHORT_WEEKDAY_SYMBOLS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Aggregates shown by the weekly view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklySummary {
    pub weekly_goal: u64,
    pub weekly_total_calories: u64,
    pub weekly_deficit: u64,
    pub estimated_weight_loss_kg: f64,
}

/// One bar of the daily calorie chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCalorieBar {
    pub label: String,
    pub date: Option<NaiveDate>,
    pub total: u64,
}

pub fn weekly_total_calories(history: &WeeklyHistory) -> u64 {
    history.days().iter().map(|day| day.total_calories()).sum()
}

pub fn weekly_goal(goals: &DayGoals) -> u64 {
    u64::from(goals.calorie_goal) * DAYS_PER_WEEK
}

/// Goal minus consumed, floored at zero.
pub fn weekly_deficit(history: &WeeklyHistory, goals: &DayGoals) -> u64 {
    weekly_goal(goals).saturating_sub(weekly_total_calories(history))
}

/// Deficit converted to kilograms, rounded to two decimals.
pub fn estimated_weight_loss_kg(deficit: u64) -> f64 {
    let kg = deficit as f64 / KCAL_PER_KG_FAT;
    (kg * 100.0).round() / 100.0
}

pub fn summarize(history: &WeeklyHistory, goals: &DayGoals) -> WeeklySummary {
    let weekly_deficit = weekly_deficit(history, goals);
    WeeklySummary {
        weekly_goal: weekly_goal(goals),
        weekly_total_calories: weekly_total_calories(history),
        weekly_deficit,
        estimated_weight_loss_kg: estimated_weight_loss_kg(weekly_deficit),
    }
}

/// Per-day calorie totals, oldest first.
///
/// Dated slots are labelled with their real weekday; undated slots fall back
/// to `SHORT_WEEKDAY_SYMBOLS[index % 7]`.
pub fn daily_calorie_bars(history: &WeeklyHistory) -> Vec<DailyCalorieBar> {
    history
        .days()
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let symbol_index = match day.date {
                Some(date) => date.weekday().num_days_from_sunday() as usize,
                None => index % SHORT_WEEKDAY_SYMBOLS.len(),
            };
            DailyCalorieBar {
                label: SHORT_WEEKDAY_SYMBOLS[symbol_index].to_string(),
                date: day.date,
                total: day.total_calories(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{daily_calorie_bars, estimated_weight_loss_kg, summarize};
    use crate::model::entry::FoodEntry;
    use crate::model::goals::DayGoals;
    use crate::model::history::{ArchivedDay, WeeklyHistory};
    use chrono::NaiveDate;

    fn slot(date: Option<NaiveDate>, calories: u32) -> ArchivedDay {
        ArchivedDay {
            date,
            entries: vec![FoodEntry::new("meal", calories, 10).unwrap()],
        }
    }

    #[test]
    fn summary_matches_two_day_example() {
        let mut history = WeeklyHistory::new();
        history.push(slot(None, 2000));
        history.push(slot(None, 1800));

        let summary = summarize(&history, &DayGoals::new(1800, 100));
        assert_eq!(summary.weekly_goal, 12_600);
        assert_eq!(summary.weekly_total_calories, 3_800);
        assert_eq!(summary.weekly_deficit, 8_800);
        assert!((summary.estimated_weight_loss_kg - 1.14).abs() < f64::EPSILON);
    }

    #[test]
    fn surplus_floors_deficit_at_zero() {
        let mut history = WeeklyHistory::new();
        history.push(slot(None, 5000));

        let summary = summarize(&history, &DayGoals::new(500, 0));
        assert_eq!(summary.weekly_deficit, 0);
        assert_eq!(summary.estimated_weight_loss_kg, 0.0);
    }

    #[test]
    fn empty_history_yields_zero_consumption() {
        let summary = summarize(&WeeklyHistory::new(), &DayGoals::default());
        assert_eq!(summary.weekly_total_calories, 0);
        assert_eq!(summary.weekly_deficit, 0);
        assert_eq!(estimated_weight_loss_kg(0), 0.0);
    }

    #[test]
    fn bars_use_real_weekday_and_fall_back_to_index() {
        // 2026-05-06 is a Wednesday.
        let wednesday = NaiveDate::from_ymd_opt(2026, 5, 6).unwrap();
        let mut history = WeeklyHistory::new();
        history.push(slot(None, 100));
        history.push(slot(Some(wednesday), 200));

        let bars = daily_calorie_bars(&history);
        assert_eq!(bars[0].label, "Sun");
        assert_eq!(bars[1].label, "Wed");
        assert_eq!(bars[1].total, 200);
    }
}
