// 💾 Tracker Store - synchronous key-value persistence over SQLite
//
// Three logical keys: customFoods, eatenFoods, weekStart. Values are JSON.
// Writes are write-through after each mutation; reads that fail to parse
// fall back to defaults so startup never dies on a bad row.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// User-added foods, JSON list of strings.
pub const KEY_CUSTOM_FOODS: &str = "customFoods";

/// Foods eaten this week, JSON list of strings.
pub const KEY_EATEN_FOODS: &str = "eatenFoods";

/// Current week start, JSON RFC 3339 string.
pub const KEY_WEEK_START: &str = "weekStart";

/// State as read back from disk, defaults already applied.
#[derive(Debug, Clone)]
pub struct StoredState {
    pub custom_foods: Vec<String>,
    pub eaten_foods: Vec<String>,
    pub week_start: DateTime<Utc>,
}

// ============================================================================
// TRACKER STORE
// ============================================================================

pub struct TrackerStore {
    conn: Connection,
}

impl TrackerStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open tracker database at {}", path.display()))?;

        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::setup(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::setup(Connection::open_in_memory()?)
    }

    fn setup(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tracker_state (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(TrackerStore { conn })
    }

    // ========================================================================
    // KEY-VALUE PLUMBING
    // ========================================================================

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;

        self.conn.execute(
            "INSERT INTO tracker_state (key, value, updated_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, json],
        )?;

        Ok(())
    }

    /// None on a missing row or a value that does not parse.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json: String = self
            .conn
            .query_row(
                "SELECT value FROM tracker_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .ok()?;

        serde_json::from_str(&json).ok()
    }

    // ========================================================================
    // THE THREE KEYS
    // ========================================================================

    pub fn save_custom_foods(&self, foods: &[String]) -> Result<()> {
        self.write_json(KEY_CUSTOM_FOODS, &foods)
    }

    pub fn save_eaten_foods(&self, foods: &[String]) -> Result<()> {
        self.write_json(KEY_EATEN_FOODS, &foods)
    }

    pub fn save_week_start(&self, start: DateTime<Utc>) -> Result<()> {
        self.write_json(KEY_WEEK_START, &start)
    }

    /// Read all three keys, falling back to the documented default wherever
    /// a value is missing or malformed: empty list, empty list, `now`.
    pub fn load(&self, now: DateTime<Utc>) -> StoredState {
        StoredState {
            custom_foods: self.read_json(KEY_CUSTOM_FOODS).unwrap_or_default(),
            eaten_foods: self.read_json(KEY_EATEN_FOODS).unwrap_or_default(),
            week_start: self.read_json(KEY_WEEK_START).unwrap_or(now),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
