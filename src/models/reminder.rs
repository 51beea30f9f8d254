use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Upper bound for every minute-based trigger: one week.
pub const MAX_TRIGGER_MINUTES: i64 = 7 * 24 * 60;

/// When a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Trigger {
    /// Fixed clock time.
    AtTime { time: NaiveTime },
    /// Minutes after the reminder was created (or last edited).
    AfterInterval { minutes: i64 },
    /// Minutes after today's entry time.
    AfterEntry { minutes: i64 },
    /// Minutes before today's end time.
    BeforeEnd { minutes: i64 },
}

impl Trigger {
    /// Entry-relative triggers need today's entry time to be scheduled.
    pub fn is_entry_relative(&self) -> bool {
        matches!(self, Trigger::AfterEntry { .. } | Trigger::BeforeEnd { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            Trigger::AtTime { time } => format!("at {}", time.format("%H:%M")),
            Trigger::AfterInterval { minutes } => format!("in {} min", minutes),
            Trigger::AfterEntry { minutes } => format!("{} min after entry", minutes),
            Trigger::BeforeEnd { minutes } => format!("{} min before end", minutes),
        }
    }

    fn validate(&self) -> AppResult<()> {
        match self {
            Trigger::AtTime { .. } => Ok(()),
            Trigger::AfterInterval { minutes } if *minutes <= 0 => Err(
                AppError::InvalidReminder("interval must be at least 1 minute".into()),
            ),
            Trigger::AfterEntry { minutes } | Trigger::BeforeEnd { minutes } if *minutes < 0 => {
                Err(AppError::InvalidReminder(
                    "offset minutes cannot be negative".into(),
                ))
            }
            Trigger::AfterInterval { minutes }
            | Trigger::AfterEntry { minutes }
            | Trigger::BeforeEnd { minutes }
                if *minutes > MAX_TRIGGER_MINUTES =>
            {
                Err(AppError::InvalidReminder(format!(
                    "{} minutes is more than a week",
                    minutes
                )))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub trigger: Trigger,
    /// Absolute date for an at-time reminder.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub repeat_weekdays: bool,
    #[serde(default)]
    pub clamp_to_work_hours: bool,
    pub created_at: DateTime<Local>,
    /// Last delivery; one-shot reminders stay silent once set.
    #[serde(default)]
    pub last_fired: Option<DateTime<Local>>,
}

impl Reminder {
    pub fn new(
        title: &str,
        trigger: Trigger,
        date: Option<NaiveDate>,
        repeat_weekdays: bool,
        clamp_to_work_hours: bool,
        now: DateTime<Local>,
    ) -> AppResult<Self> {
        let reminder = Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            trigger,
            date,
            repeat_weekdays,
            clamp_to_work_hours,
            created_at: now,
            last_fired: None,
        };
        reminder.validate()?;
        Ok(reminder)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidReminder("title cannot be empty".into()));
        }

        self.trigger.validate()?;

        if self.date.is_some() {
            if !matches!(self.trigger, Trigger::AtTime { .. }) {
                return Err(AppError::InvalidReminder(
                    "a date can only be combined with an at-time trigger".into(),
                ));
            }
            if self.repeat_weekdays {
                return Err(AppError::InvalidReminder(
                    "a dated reminder cannot repeat on weekdays".into(),
                ));
            }
        }

        Ok(())
    }

    /// Short flags column: `W` weekdays, `C` clamped.
    pub fn flags(&self) -> String {
        let mut f = String::new();
        f.push(if self.repeat_weekdays { 'W' } else { '-' });
        f.push(if self.clamp_to_work_hours { 'C' } else { '-' });
        f
    }

    pub fn describe_trigger(&self) -> String {
        match (&self.trigger, self.date) {
            (Trigger::AtTime { time }, Some(d)) => format!("on {} at {}", d, time.format("%H:%M")),
            (t, _) => t.describe(),
        }
    }
}
