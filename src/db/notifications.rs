//! Queries on the `notifications` table.

use crate::errors::{AppError, AppResult};
use crate::models::notification::NotificationRequest;
use crate::utils::date::from_epoch_seconds;
use chrono::{DateTime, Local};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<NotificationRequest> {
    let fire_epoch: i64 = row.get("fire_at")?;
    let fire_at = from_epoch_seconds(fire_epoch).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            Box::new(AppError::InvalidDate(format!(
                "Invalid fire_at: {}",
                fire_epoch
            ))),
        )
    })?;

    Ok(NotificationRequest {
        identifier: row.get("identifier")?,
        title: row.get("title")?,
        body: row.get("body")?,
        fire_at,
        repeats: row.get::<_, i32>("repeats")? == 1,
        created_at: row.get("created_at")?,
    })
}

/// Insert or replace the request with the same identifier.
pub fn upsert(conn: &Connection, req: &NotificationRequest) -> AppResult<()> {
    conn.execute(
        "INSERT INTO notifications (identifier, title, body, fire_at, repeats, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(identifier) DO UPDATE SET
            title = excluded.title,
            body = excluded.body,
            fire_at = excluded.fire_at,
            repeats = excluded.repeats,
            created_at = excluded.created_at",
        params![
            req.identifier,
            req.title,
            req.body,
            req.fire_at.timestamp(),
            if req.repeats { 1 } else { 0 },
            req.created_at,
        ],
    )?;
    Ok(())
}

/// Remove a pending request; returns whether one existed.
pub fn remove(conn: &Connection, identifier: &str) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM notifications WHERE identifier = ?1",
        [identifier],
    )?;
    Ok(n > 0)
}

pub fn get(conn: &Connection, identifier: &str) -> AppResult<Option<NotificationRequest>> {
    let mut stmt = conn.prepare("SELECT * FROM notifications WHERE identifier = ?1")?;
    Ok(stmt.query_row([identifier], map_row).optional()?)
}

/// All pending requests, earliest first.
pub fn list(conn: &Connection) -> AppResult<Vec<NotificationRequest>> {
    let mut stmt = conn.prepare("SELECT * FROM notifications ORDER BY fire_at ASC, identifier ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Requests whose fire time is at or before `now`, earliest first.
pub fn due(conn: &Connection, now: &DateTime<Local>) -> AppResult<Vec<NotificationRequest>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM notifications
         WHERE fire_at <= ?1
         ORDER BY fire_at ASC, identifier ASC",
    )?;
    let rows = stmt.query_map([now.timestamp()], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
