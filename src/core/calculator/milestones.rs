use crate::errors::{AppError, AppResult};
use crate::models::entry::EntryTime;
use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;

/// Where the current time sits relative to the day's milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Entry time recorded in the future.
    Upcoming,
    Working,
    /// Past the safe-exit time, before the end time.
    SafeToLeave,
    /// Past the end time.
    Done,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Upcoming => "not started yet",
            Phase::Working => "working",
            Phase::SafeToLeave => "safe to leave",
            Phase::Done => "day completed",
        }
    }
}

/// Milestones derived from the entry time. All durations are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestones {
    pub entry: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub safe_exit_time: DateTime<Local>,
    pub office_duration: i64,
    pub safe_exit_offset: i64,
    pub worked: i64,
    pub remaining: i64,
    pub until_safe_exit: i64,
    pub overtime: i64,
    /// 0..=100
    pub progress: u8,
    pub phase: Phase,
}

/// Derive the day's milestones.
///
/// - end = entry + office_duration
/// - safe exit = entry + safe_exit_offset
/// - worked = max(0, now − entry)
/// - remaining = max(0, office_duration − worked)
///
/// Durations that push a milestone out of the representable range are an
/// `InvalidDuration` error.
pub fn compute(
    entry: &EntryTime,
    office_duration: i64,
    safe_exit_offset: i64,
    now: &DateTime<Local>,
) -> AppResult<Milestones> {
    let entry_ts = entry.timestamp;
    let end_time = offset_by(entry_ts, office_duration)?;
    let safe_exit_time = offset_by(entry_ts, safe_exit_offset)?;

    let worked = (*now - entry_ts).num_minutes().max(0);
    let remaining = (office_duration - worked).max(0);
    let until_safe_exit = (safe_exit_time - *now).num_minutes().max(0);
    let overtime = (worked - office_duration).max(0);

    let progress = if office_duration > 0 {
        ((worked * 100) / office_duration).clamp(0, 100) as u8
    } else {
        100
    };

    let phase = if *now < entry_ts {
        Phase::Upcoming
    } else if *now >= end_time {
        Phase::Done
    } else if *now >= safe_exit_time {
        Phase::SafeToLeave
    } else {
        Phase::Working
    };

    Ok(Milestones {
        entry: entry_ts,
        end_time,
        safe_exit_time,
        office_duration,
        safe_exit_offset,
        worked,
        remaining,
        until_safe_exit,
        overtime,
        progress,
        phase,
    })
}

fn offset_by(ts: DateTime<Local>, minutes: i64) -> AppResult<DateTime<Local>> {
    TimeDelta::try_minutes(minutes)
        .and_then(|d| ts.checked_add_signed(d))
        .ok_or_else(|| AppError::InvalidDuration(format!("{} min", minutes)))
}
