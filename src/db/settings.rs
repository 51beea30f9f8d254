//! Persisted key/value settings (⇔ `settings` table).

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

/// Keys used in the `settings` table.
pub mod keys {
    pub const ENTRY_TIMESTAMP: &str = "entry_timestamp";
    pub const ENTRY_HOUR: &str = "entry_hour";
    pub const ENTRY_MINUTE: &str = "entry_minute";
    pub const ENTRY_SOURCE: &str = "entry_source";
    pub const OFFICE_DURATION: &str = "office_duration_minutes";
    pub const SAFE_EXIT: &str = "safe_exit_minutes";
    pub const DISPLAY_MODE: &str = "display_mode";
    pub const WORKDAYS: &str = "workdays";
    pub const REMINDERS: &str = "reminders";
    pub const GEOFENCE_PENDING_SINCE: &str = "geofence_pending_since";
}

pub fn get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM settings WHERE key = ?1")?;
    let value = stmt
        .query_row([key], |row| row.get::<_, String>(0))
        .optional()?;
    Ok(value)
}

/// Integer value; a stored value that does not parse reads as absent.
pub fn get_i64(conn: &Connection, key: &str) -> AppResult<Option<i64>> {
    Ok(get(conn, key)?.and_then(|v| v.trim().parse::<i64>().ok()))
}

pub fn set(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT INTO settings (key, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )?;
    stmt.execute(params![key, value, now])?;
    Ok(())
}

pub fn set_i64(conn: &Connection, key: &str, value: i64) -> AppResult<()> {
    set(conn, key, &value.to_string())
}

pub fn remove(conn: &Connection, key: &str) -> AppResult<()> {
    conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
    Ok(())
}
