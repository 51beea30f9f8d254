use crate::errors::{AppError, AppResult};
use chrono::Weekday;
use std::collections::BTreeSet;

/// Set of working weekdays, stored as ISO indices (1 = Monday … 7 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workdays(BTreeSet<u32>);

impl Default for Workdays {
    fn default() -> Self {
        Self((1..=5).collect())
    }
}

fn weekday_index(token: &str) -> Option<u32> {
    match token.trim().to_lowercase().as_str() {
        "1" | "mo" | "mon" | "monday" => Some(1),
        "2" | "tu" | "tue" | "tuesday" => Some(2),
        "3" | "we" | "wed" | "wednesday" => Some(3),
        "4" | "th" | "thu" | "thursday" => Some(4),
        "5" | "fr" | "fri" | "friday" => Some(5),
        "6" | "sa" | "sat" | "saturday" => Some(6),
        "7" | "su" | "sun" | "sunday" => Some(7),
        _ => None,
    }
}

fn short_name(idx: u32) -> &'static str {
    match idx {
        1 => "Mo",
        2 => "Tu",
        3 => "We",
        4 => "Th",
        5 => "Fr",
        6 => "Sa",
        _ => "Su",
    }
}

impl Workdays {
    /// Parse a user list such as `mon,tue,fri`, `1,2,3` or `mon-fri`.
    pub fn parse(input: &str) -> AppResult<Self> {
        let mut set = BTreeSet::new();

        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some((from, to)) = part.split_once('-') {
                let a = weekday_index(from).ok_or_else(|| AppError::InvalidWeekday(from.into()))?;
                let b = weekday_index(to).ok_or_else(|| AppError::InvalidWeekday(to.into()))?;
                if a > b {
                    return Err(AppError::InvalidWeekday(part.to_string()));
                }
                set.extend(a..=b);
            } else {
                set.insert(weekday_index(part).ok_or_else(|| AppError::InvalidWeekday(part.into()))?);
            }
        }

        if set.is_empty() {
            return Err(AppError::InvalidWeekday(input.to_string()));
        }

        Ok(Self(set))
    }

    /// Storage form: `1,2,3,4,5`.
    pub fn to_db_str(&self) -> String {
        self.0
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode the storage form; unknown indices are dropped.
    pub fn from_db_str(s: &str) -> Option<Self> {
        let set: BTreeSet<u32> = s
            .split(',')
            .filter_map(|p| p.trim().parse::<u32>().ok())
            .filter(|d| (1..=7).contains(d))
            .collect();
        if set.is_empty() { None } else { Some(Self(set)) }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day.number_from_monday())
    }

    /// Human form: `Mo Tu We Th Fr`.
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|d| short_name(*d))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
