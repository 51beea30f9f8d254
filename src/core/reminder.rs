use crate::config::Config;
use crate::core::notify::NotificationLogic;
use crate::db::log::{log_failure, ttlog};
use crate::db::pool::DbPool;
use crate::db::settings::{self, keys};
use crate::errors::{AppError, AppResult};
use crate::models::reminder::{Reminder, Trigger};
use chrono::{DateTime, Local, NaiveDate};

/// Minimum length of an identifier prefix accepted on the command line.
const MIN_ID_PREFIX: usize = 4;

/// The reminders collection, stored JSON-encoded under one settings key.
pub struct ReminderStore;

impl ReminderStore {
    /// Load all reminders. An undecodable collection is logged and read as empty.
    pub fn load(pool: &DbPool) -> AppResult<Vec<Reminder>> {
        let Some(raw) = settings::get(&pool.conn, keys::REMINDERS)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Reminder>>(&raw) {
            Ok(list) => Ok(list),
            Err(e) => {
                log_failure(
                    &pool.conn,
                    "reminders_decode",
                    keys::REMINDERS,
                    &format!("Cannot decode reminders: {}", e),
                );
                Ok(Vec::new())
            }
        }
    }

    pub fn save(pool: &DbPool, reminders: &[Reminder]) -> AppResult<()> {
        match serde_json::to_string(reminders) {
            Ok(raw) => settings::set(&pool.conn, keys::REMINDERS, &raw),
            Err(e) => {
                log_failure(
                    &pool.conn,
                    "reminders_encode",
                    keys::REMINDERS,
                    &format!("Cannot encode reminders: {}", e),
                );
                Ok(())
            }
        }
    }
}

/// Field changes applied by `reminder edit`; `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct ReminderChanges {
    pub title: Option<String>,
    pub trigger: Option<Trigger>,
    /// `Some(None)` removes the date.
    pub date: Option<Option<NaiveDate>>,
    pub repeat_weekdays: Option<bool>,
    pub clamp_to_work_hours: Option<bool>,
}

pub struct ReminderLogic;

impl ReminderLogic {
    /// Resolve an identifier, or a unique prefix of one.
    fn position(reminders: &[Reminder], id: &str) -> AppResult<usize> {
        if let Some(i) = reminders.iter().position(|r| r.id == id) {
            return Ok(i);
        }

        if id.len() >= MIN_ID_PREFIX {
            let matches: Vec<usize> = reminders
                .iter()
                .enumerate()
                .filter(|(_, r)| r.id.starts_with(id))
                .map(|(i, _)| i)
                .collect();

            match matches.as_slice() {
                [i] => return Ok(*i),
                [] => {}
                _ => {
                    return Err(AppError::ReminderNotFound(format!(
                        "'{}' is ambiguous ({} matches)",
                        id,
                        matches.len()
                    )));
                }
            }
        }

        Err(AppError::ReminderNotFound(id.to_string()))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Reminder>> {
        ReminderStore::load(pool)
    }

    pub fn find(pool: &DbPool, id: &str) -> AppResult<Reminder> {
        let reminders = ReminderStore::load(pool)?;
        let idx = Self::position(&reminders, id)?;
        Ok(reminders[idx].clone())
    }

    pub fn add(
        pool: &DbPool,
        cfg: &Config,
        reminder: Reminder,
        now: &DateTime<Local>,
    ) -> AppResult<Reminder> {
        reminder.validate()?;

        let mut reminders = ReminderStore::load(pool)?;
        if reminders.iter().any(|r| r.id == reminder.id) {
            return Err(AppError::DuplicateReminder(reminder.id));
        }

        reminders.push(reminder.clone());
        ReminderStore::save(pool, &reminders)?;

        ttlog(
            &pool.conn,
            "reminder_add",
            &reminder.id,
            &format!("{} ({})", reminder.title, reminder.describe_trigger()),
        )?;

        NotificationLogic::reschedule_reminder(pool, cfg, &reminder, now)?;
        Ok(reminder)
    }

    pub fn edit(
        pool: &DbPool,
        cfg: &Config,
        id: &str,
        changes: ReminderChanges,
        now: &DateTime<Local>,
    ) -> AppResult<Reminder> {
        let mut reminders = ReminderStore::load(pool)?;
        let idx = Self::position(&reminders, id)?;

        let mut updated = reminders[idx].clone();
        if let Some(title) = changes.title {
            updated.title = title.trim().to_string();
        }
        if let Some(trigger) = changes.trigger {
            updated.trigger = trigger;
            // A dated at-time reminder turned into another kind loses its date.
            if !matches!(trigger, Trigger::AtTime { .. }) && changes.date.is_none() {
                updated.date = None;
            }
        }
        if let Some(date) = changes.date {
            updated.date = date;
        }
        if let Some(repeat) = changes.repeat_weekdays {
            updated.repeat_weekdays = repeat;
        }
        if let Some(clamp) = changes.clamp_to_work_hours {
            updated.clamp_to_work_hours = clamp;
        }
        updated.created_at = *now;
        updated.last_fired = None;
        updated.validate()?;

        reminders[idx] = updated.clone();
        ReminderStore::save(pool, &reminders)?;

        ttlog(
            &pool.conn,
            "reminder_edit",
            &updated.id,
            &format!("{} ({})", updated.title, updated.describe_trigger()),
        )?;

        NotificationLogic::reschedule_reminder(pool, cfg, &updated, now)?;
        Ok(updated)
    }

    pub fn delete(pool: &DbPool, id: &str) -> AppResult<Reminder> {
        let mut reminders = ReminderStore::load(pool)?;
        let idx = Self::position(&reminders, id)?;
        let removed = reminders.remove(idx);

        ReminderStore::save(pool, &reminders)?;
        NotificationLogic::unregister(pool, &removed.id)?;

        ttlog(&pool.conn, "reminder_del", &removed.id, &removed.title)?;
        Ok(removed)
    }

    /// Record a delivery and return the updated reminder.
    pub fn mark_fired(
        pool: &DbPool,
        id: &str,
        at: &DateTime<Local>,
    ) -> AppResult<Option<Reminder>> {
        let mut reminders = ReminderStore::load(pool)?;
        let Some(r) = reminders.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        r.last_fired = Some(*at);
        let updated = r.clone();

        ReminderStore::save(pool, &reminders)?;
        Ok(Some(updated))
    }
}
