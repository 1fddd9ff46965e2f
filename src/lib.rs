// Weekly Fruit & Veggie Tracker - Core Library
// Exposes all modules for use in the CLI, the TUI and tests

pub mod catalog;
pub mod db;
pub mod report;
pub mod tracker;
pub mod week;

// Only compiled when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use catalog::{food_key, FoodCatalog, DEFAULT_FOODS};
pub use db::{StoredState, TrackerStore, KEY_CUSTOM_FOODS, KEY_EATEN_FOODS, KEY_WEEK_START};
pub use report::{ReportTier, ReportView};
pub use tracker::{AddResult, FoodPartition, Progress, TrackerState, WEEKLY_GOAL};
pub use week::{WeekCycle, WeekEvaluation, WEEK_LENGTH_DAYS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
