use chrono::{DateTime, Local, NaiveDate, Timelike};
use serde::Serialize;

/// Arrival time for the current work day.
///
/// Persisted as epoch seconds plus the redundant local hour/minute pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTime {
    pub timestamp: DateTime<Local>,
    pub hour: u32,
    pub minute: u32,
}

/// How the entry time was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    Manual,
    Geofence,
}

impl EntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::Manual => "manual",
            EntrySource::Geofence => "geofence",
        }
    }
}

impl EntryTime {
    pub fn new(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            hour: timestamp.hour(),
            minute: timestamp.minute(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date() == day
    }

    pub fn is_in_future(&self, now: &DateTime<Local>) -> bool {
        self.timestamp > *now
    }

    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}
