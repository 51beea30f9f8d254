//! Time utilities: parsing HH:MM and durations.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Longest duration accepted for the office day and the safe-exit offset.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Parse a duration into minutes.
///
/// Accepted forms:
/// - `9h`, `8h30m`, `8h 30m`, `45m`
/// - `8.5` or `8.5h` (decimal hours)
/// - `08:30` (HH:MM)
///
/// Zero, negative and longer-than-a-day durations are rejected.
pub fn parse_duration_minutes(input: &str) -> AppResult<i64> {
    let invalid = || AppError::InvalidDuration(input.to_string());
    let s: String = input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if s.is_empty() {
        return Err(invalid());
    }

    let minutes = if let Some((h, m)) = s.split_once(':') {
        let h: i64 = h.parse().map_err(|_| invalid())?;
        let m: i64 = m.parse().map_err(|_| invalid())?;
        if !(0..60).contains(&m) {
            return Err(invalid());
        }
        h.checked_mul(60)
            .and_then(|h| h.checked_add(m))
            .ok_or_else(invalid)?
    } else if s.contains('h') || s.ends_with('m') {
        let (hours_part, rest) = match s.split_once('h') {
            Some((h, rest)) => (h, rest),
            None => ("", s.as_str()),
        };

        let mut total = 0.0_f64;
        if !hours_part.is_empty() {
            let h: f64 = hours_part.parse().map_err(|_| invalid())?;
            total += h * 60.0;
        }
        if !rest.is_empty() {
            let m = rest.strip_suffix('m').ok_or_else(invalid)?;
            let m: i64 = m.parse().map_err(|_| invalid())?;
            total += m as f64;
        }
        whole_minutes(total).ok_or_else(invalid)?
    } else {
        let h: f64 = s.parse().map_err(|_| invalid())?;
        whole_minutes(h * 60.0).ok_or_else(invalid)?
    };

    if minutes <= 0 || minutes > MAX_DURATION_MINUTES {
        return Err(invalid());
    }

    Ok(minutes)
}

fn whole_minutes(total: f64) -> Option<i64> {
    let rounded = total.round();
    let in_range = rounded.is_finite() && rounded.abs() <= MAX_DURATION_MINUTES as f64;
    in_range.then_some(rounded as i64)
}
