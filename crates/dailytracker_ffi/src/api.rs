//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the tracker operations the UI layer invokes, via FRB.
//! - Flatten results into plain envelopes with human-readable messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutating call runs the activation check first, so a stale log
//!   from a previous day is never extended.

use dailytracker_core::db::open_db;
use dailytracker_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, DailyTracker,
    FoodEntry, SqliteKeyValueStore, SystemClock, TrackerConfig, TrackerResult,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type FfiTracker<'conn> = DailyTracker<SqliteKeyValueStore<'conn>, SystemClock>;

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One food entry as shown in the today list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryItem {
    pub entry_id: String,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
}

/// Today's state for the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayResponse {
    pub ok: bool,
    pub entries: Vec<EntryItem>,
    pub total_calories: u64,
    pub total_protein: u64,
    pub calorie_goal: u32,
    pub protein_goal: u32,
    pub remaining_calories: u64,
    pub remaining_protein: u64,
    pub message: String,
}

impl TodayResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entries: Vec::new(),
            total_calories: 0,
            total_protein: 0,
            calorie_goal: 0,
            protein_goal: 0,
            remaining_calories: 0,
            remaining_protein: 0,
            message: message.into(),
        }
    }
}

/// One chart bar of the weekly view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalorieBarItem {
    pub label: String,
    pub total: u64,
}

/// Weekly view payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyResponse {
    pub ok: bool,
    pub bars: Vec<CalorieBarItem>,
    pub weekly_goal: u64,
    pub weekly_total_calories: u64,
    pub weekly_deficit: u64,
    pub estimated_weight_loss_kg: f64,
    pub message: String,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Set when the action created an entry.
    pub entry_id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, entry_id: Option<String>) -> Self {
        Self {
            ok: true,
            entry_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

/// Whether onboarding goals were saved.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_has_setup_goals() -> bool {
    match with_tracker(|tracker| tracker.has_setup_goals()) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=ffi_call module=ffi status=error call=tracker_has_setup_goals error={err}"
            );
            false
        }
    }
}

/// Saves onboarding goals from raw form text.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_setup_goals(calorie_goal: String, protein_goal: String) -> ActionResponse {
    match with_tracker(|tracker| tracker.setup_goals(&calorie_goal, &protein_goal)) {
        Ok(_) => ActionResponse::success("Goals saved.", None),
        Err(err) => ActionResponse::failure(format!("tracker_setup_goals failed: {err}")),
    }
}

/// Runs the activation check and returns today's state.
///
/// Call whenever the today view appears.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_today() -> TodayResponse {
    match with_active_tracker(|tracker| today_snapshot(tracker)) {
        Ok(response) => response,
        Err(err) => TodayResponse::failure(format!("tracker_today failed: {err}")),
    }
}

/// Logs a food entry from raw form text.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_entry(name: String, calories: String, protein: String) -> ActionResponse {
    match with_active_tracker(|tracker| tracker.add(&name, &calories, &protein)) {
        Ok(entry) => ActionResponse::success("Entry added.", Some(entry.id.to_string())),
        Err(err) => ActionResponse::failure(format!("tracker_add_entry failed: {err}")),
    }
}

/// Deletes an entry by id; unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_remove_entry(entry_id: String) -> ActionResponse {
    let id = match Uuid::parse_str(entry_id.trim()) {
        Ok(id) => id,
        Err(err) => {
            return ActionResponse::failure(format!("tracker_remove_entry failed: {err}"));
        }
    };

    match with_active_tracker(|tracker| tracker.remove(id)) {
        Ok(true) => ActionResponse::success("Entry removed.", None),
        Ok(false) => ActionResponse::success("Entry not found.", None),
        Err(err) => ActionResponse::failure(format!("tracker_remove_entry failed: {err}")),
    }
}

/// "Reset today" action.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_reset_today() -> ActionResponse {
    match with_active_tracker(|tracker| tracker.reset()) {
        Ok(_) => ActionResponse::success("Today reset.", None),
        Err(err) => ActionResponse::failure(format!("tracker_reset_today failed: {err}")),
    }
}

/// Weekly summary and chart bars.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_weekly() -> WeeklyResponse {
    let result = with_tracker(|tracker| {
        Ok((tracker.weekly_summary()?, tracker.daily_calorie_bars()?))
    });

    match result {
        Ok((summary, bars)) => WeeklyResponse {
            ok: true,
            message: if bars.is_empty() {
                "No data for the week yet.".to_string()
            } else {
                format!("{} day(s) recorded.", bars.len())
            },
            bars: bars
                .into_iter()
                .map(|bar| CalorieBarItem {
                    label: bar.label,
                    total: bar.total,
                })
                .collect(),
            weekly_goal: summary.weekly_goal,
            weekly_total_calories: summary.weekly_total_calories,
            weekly_deficit: summary.weekly_deficit,
            estimated_weight_loss_kg: summary.estimated_weight_loss_kg,
        },
        Err(err) => WeeklyResponse {
            ok: false,
            bars: Vec::new(),
            weekly_goal: 0,
            weekly_total_calories: 0,
            weekly_deficit: 0,
            estimated_weight_loss_kg: 0.0,
            message: format!("tracker_weekly failed: {err}"),
        },
    }
}

fn today_snapshot(tracker: &FfiTracker<'_>) -> TrackerResult<TodayResponse> {
    let goals = tracker.goals()?;
    Ok(TodayResponse {
        ok: true,
        entries: tracker.entries().iter().map(to_entry_item).collect(),
        total_calories: tracker.total_calories(),
        total_protein: tracker.total_protein(),
        calorie_goal: goals.calorie_goal,
        protein_goal: goals.protein_goal,
        remaining_calories: goals.remaining_calories(tracker.total_calories()),
        remaining_protein: goals.remaining_protein(tracker.total_protein()),
        message: String::new(),
    })
}

fn to_entry_item(entry: &FoodEntry) -> EntryItem {
    EntryItem {
        entry_id: entry.id.to_string(),
        name: entry.name.clone(),
        calories: entry.calories,
        protein: entry.protein,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| match TrackerConfig::from_env() {
            Ok(config) => config.db_path,
            Err(err) => {
                warn!("event=config_load module=ffi status=fallback error={err}");
                TrackerConfig::default().db_path
            }
        })
        .clone()
}

fn with_tracker<T>(f: impl FnOnce(&mut FfiTracker<'_>) -> TrackerResult<T>) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("tracker DB open failed: {err}"))?;
    let store = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| format!("tracker store init failed: {err}"))?;
    let mut tracker = DailyTracker::new(store, SystemClock);
    f(&mut tracker).map_err(|err| err.to_string())
}

fn with_active_tracker<T>(
    f: impl FnOnce(&mut FfiTracker<'_>) -> TrackerResult<T>,
) -> Result<T, String> {
    with_tracker(|tracker| {
        tracker.on_activate()?;
        f(tracker)
    })
}
