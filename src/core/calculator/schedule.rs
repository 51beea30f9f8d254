//! Fire-time derivation for reminders.

use crate::core::calculator::milestones::Milestones;
use crate::models::reminder::{Reminder, Trigger};
use crate::utils::date::{at, is_weekend, next_weekday_from};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeDelta};

/// How many days ahead an at-time reminder is searched for.
const LOOKAHEAD_DAYS: i64 = 8;

fn clamp_to_day(ts: DateTime<Local>, day: &Milestones) -> DateTime<Local> {
    ts.max(day.entry).min(day.end_time)
}

/// Clamp into [entry, end] when the reminder asks for it and the fire time
/// falls on the day the entry belongs to.
fn apply_clamp(
    reminder: &Reminder,
    ts: DateTime<Local>,
    day: Option<&Milestones>,
) -> DateTime<Local> {
    match day {
        Some(d) if reminder.clamp_to_work_hours && ts.date_naive() == d.entry.date_naive() => {
            clamp_to_day(ts, d)
        }
        _ => ts,
    }
}

/// Saturday/Sunday occurrences of a weekday reminder move to Monday.
fn skip_weekend(ts: DateTime<Local>) -> Option<DateTime<Local>> {
    let date = ts.date_naive();
    if !is_weekend(date) {
        return Some(ts);
    }
    at(next_weekday_from(date), ts.time())
}

fn next_at_time(
    reminder: &Reminder,
    time: NaiveTime,
    now: &DateTime<Local>,
    day: Option<&Milestones>,
) -> Option<DateTime<Local>> {
    if let Some(date) = reminder.date {
        let ts = apply_clamp(reminder, at(date, time)?, day);
        return (ts > *now).then_some(ts);
    }

    let today: NaiveDate = now.date_naive();
    for offset in 0..LOOKAHEAD_DAYS {
        let d = today + Duration::days(offset);
        if reminder.repeat_weekdays && is_weekend(d) {
            continue;
        }
        let Some(ts) = at(d, time) else { continue };
        let ts = apply_clamp(reminder, ts, day);
        if ts > *now {
            return Some(ts);
        }
    }
    None
}

fn next_interval(
    reminder: &Reminder,
    minutes: i64,
    now: &DateTime<Local>,
    day: Option<&Milestones>,
) -> Option<DateTime<Local>> {
    if minutes <= 0 {
        return None;
    }
    let first = reminder
        .created_at
        .checked_add_signed(TimeDelta::try_minutes(minutes)?)?;

    if !reminder.repeat_weekdays {
        let ts = apply_clamp(reminder, first, day);
        return (ts > *now).then_some(ts);
    }

    let ts = if first > *now {
        first
    } else {
        let elapsed = (*now - reminder.created_at).num_seconds();
        let k = elapsed / minutes.checked_mul(60)? + 1;
        let step = TimeDelta::try_minutes(minutes.checked_mul(k)?)?;
        reminder.created_at.checked_add_signed(step)?
    };

    let ts = apply_clamp(reminder, skip_weekend(ts)?, day);
    (ts > *now).then_some(ts)
}

fn next_entry_relative(
    reminder: &Reminder,
    now: &DateTime<Local>,
    day: Option<&Milestones>,
) -> Option<DateTime<Local>> {
    let d = day?;

    if reminder.repeat_weekdays && is_weekend(d.entry.date_naive()) {
        return None;
    }

    let ts = match reminder.trigger {
        Trigger::AfterEntry { minutes } => d
            .entry
            .checked_add_signed(TimeDelta::try_minutes(minutes)?)?,
        Trigger::BeforeEnd { minutes } => d
            .end_time
            .checked_sub_signed(TimeDelta::try_minutes(minutes)?)?,
        _ => return None,
    };

    let ts = apply_clamp(reminder, ts, day);
    (ts > *now).then_some(ts)
}

/// Next time `reminder` should fire after `now`, or `None` when there is
/// nothing to schedule.
///
/// `day` carries today's milestones when an entry time is recorded;
/// entry-relative triggers are unschedulable without it.
pub fn next_fire(
    reminder: &Reminder,
    now: &DateTime<Local>,
    day: Option<&Milestones>,
) -> Option<DateTime<Local>> {
    if let Some(last) = reminder.last_fired {
        if reminder.trigger.is_entry_relative() {
            // At most once per work day.
            if last.date_naive() == now.date_naive() {
                return None;
            }
        } else if !reminder.repeat_weekdays {
            return None;
        }
    }

    let ts = match reminder.trigger {
        Trigger::AtTime { time } => next_at_time(reminder, time, now, day),
        Trigger::AfterInterval { minutes } => next_interval(reminder, minutes, now, day),
        Trigger::AfterEntry { .. } | Trigger::BeforeEnd { .. } => {
            next_entry_relative(reminder, now, day)
        }
    }?;

    // A repeating reminder never fires twice for the same slot.
    match reminder.last_fired {
        Some(last) if ts <= last => None,
        _ => Some(ts),
    }
}
