//! DailyTracker command-line front end.
//!
//! # Usage
//!
//! ```bash
//! dailytracker setup 2000 150
//! dailytracker add "Greek yogurt" 150 15
//! dailytracker today
//! dailytracker remove 6f1c0e1e-2a7b-4c55-9b8e-0d2f3f0b9a11
//! dailytracker reset
//! dailytracker week
//! ```
//!
//! Every command runs the day-rollover check before doing its work, the same
//! way the app does when its main view appears.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use dailytracker_core::db::open_db;
use dailytracker_core::{
    init_logging_from_config, Activation, Clock, DailyTracker, KeyValueStore,
    SqliteKeyValueStore, SystemClock, TrackerConfig,
};
use log::info;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "dailytracker")]
#[command(author, version, about = "Daily calorie and protein tracker")]
struct Cli {
    /// SQLite database file (overrides DAILYTRACKER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save daily calorie and protein goals
    Setup { calories: String, protein: String },
    /// Log a food entry
    Add {
        name: String,
        calories: String,
        protein: String,
    },
    /// Delete a logged entry by id
    Remove { id: Uuid },
    /// Clear today's log and drop the most recent history day
    Reset,
    /// Show today's entries, totals and remaining goals
    Today,
    /// Show the weekly summary and per-day calories
    Week,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = TrackerConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    init_logging_from_config(&config)?;

    let conn = open_db(&config.db_path)?;
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let mut tracker = DailyTracker::new(store, SystemClock);

    if let Activation::NewDay { last_day, today } = tracker.on_activate()? {
        println!("New day ({today}); log from {last_day} cleared.");
    }

    match cli.command {
        Commands::Setup { calories, protein } => {
            let goals = tracker.setup_goals(&calories, &protein)?;
            println!(
                "Goals saved: {} kcal, {} g protein.",
                goals.calorie_goal, goals.protein_goal
            );
        }
        Commands::Add {
            name,
            calories,
            protein,
        } => {
            let entry = tracker.add(&name, &calories, &protein)?;
            println!("Added {} ({}).", entry.name, entry.id);
        }
        Commands::Remove { id } => {
            if tracker.remove(id)? {
                println!("Removed {id}.");
            } else {
                println!("No entry with id {id}.");
            }
        }
        Commands::Reset => {
            tracker.reset()?;
            println!("Today reset.");
        }
        Commands::Today => print_today(&tracker)?,
        Commands::Week => print_week(&tracker)?,
    }

    info!("event=cli_command module=cli status=ok");
    Ok(())
}

fn print_today<S, C>(tracker: &DailyTracker<S, C>) -> Result<(), Box<dyn std::error::Error>>
where
    S: KeyValueStore + Clone,
    C: Clock,
{
    if !tracker.has_setup_goals()? {
        println!("No goals yet; run `dailytracker setup <calories> <protein>`.");
    }

    for entry in tracker.entries() {
        println!(
            "{}  {:<24} {:>5} kcal {:>4} g",
            entry.id, entry.name, entry.calories, entry.protein
        );
    }
    println!(
        "Total: {} kcal, {} g protein",
        tracker.total_calories(),
        tracker.total_protein()
    );
    println!(
        "Remaining: {} kcal, {} g protein",
        tracker.remaining_calories()?,
        tracker.remaining_protein()?
    );
    Ok(())
}

fn print_week<S, C>(tracker: &DailyTracker<S, C>) -> Result<(), Box<dyn std::error::Error>>
where
    S: KeyValueStore + Clone,
    C: Clock,
{
    let bars = tracker.daily_calorie_bars()?;
    if bars.is_empty() {
        println!("No days recorded yet.");
    }
    for bar in &bars {
        let date = bar.date.map(|date| date.to_string()).unwrap_or_default();
        println!("{} {date:<10}  {:>6} kcal", bar.label, bar.total);
    }

    let summary = tracker.weekly_summary()?;
    println!("Weekly goal:     {} kcal", summary.weekly_goal);
    println!("Weekly total:    {} kcal", summary.weekly_total_calories);
    println!("Weekly deficit:  {} kcal", summary.weekly_deficit);
    println!("Estimated loss:  {:.2} kg", summary.estimated_weight_loss_kg);
    Ok(())
}
