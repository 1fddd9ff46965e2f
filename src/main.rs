use anyhow::Result;
use chrono::Utc;
use std::env;
use std::path::{Path, PathBuf};

use veggie_tracker::{TrackerState, TrackerStore, WEEKLY_GOAL};

const DEFAULT_DB_PATH: &str = "veggie-tracker.db";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "report" {
        // Headless snapshot
        run_report(&db_path(&args, 2))?;
    } else {
        // Interactive mode (default)
        run_ui_mode(&db_path(&args, 1))?;
    }

    Ok(())
}

/// Database path from the args, or the default next to the binary.
fn db_path(args: &[String], index: usize) -> PathBuf {
    args.get(index)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

/// Open the store and hydrate the one tracker instance from it.
fn load_tracker(path: &Path) -> Result<(TrackerStore, TrackerState)> {
    let store = TrackerStore::open(path)?;
    let stored = store.load(Utc::now());
    let state = TrackerState::hydrate(stored.custom_foods, stored.eaten_foods, stored.week_start);

    // Pin the cycle start durably on first run (also heals a malformed row)
    let _ = store.save_week_start(state.week_start());

    Ok((store, state))
}

fn run_report(path: &Path) -> Result<()> {
    let (_store, state) = load_tracker(path)?;
    let progress = state.progress();
    let report = state.weekly_report();
    let evaluation = state.evaluate_week(Utc::now());

    println!("🥗 Weekly Fruit & Veggie Tracker");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Week starting: {}  (day {} of 7)",
        state.week_start().format("%Y-%m-%d"),
        (evaluation.days_elapsed + 1).clamp(1, 7)
    );
    println!();
    println!("Eaten: {}/{}", progress.count, WEEKLY_GOAL);
    println!("{}", progress.message);
    println!();
    println!("📋 Weekly Report");
    println!("{}", report.message());
    println!("{}", report.summary());
    if let Some(note) = report.custom_note() {
        println!("{}", note);
    }

    if evaluation.elapsed {
        println!();
        println!("⏰ The week is up! Open the tracker to review and start a new week.");
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(path: &Path) -> Result<()> {
    use veggie_tracker::ui;

    let (store, state) = load_tracker(path)?;

    let mut app = ui::App::new(state, store);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_path: &Path) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print a snapshot with: veggie-tracker report");
    std::process::exit(1);
}
