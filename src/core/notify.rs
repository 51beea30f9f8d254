use crate::config::Config;
use crate::core::calculator::milestones::Milestones;
use crate::core::calculator::schedule::next_fire;
use crate::core::reminder::{ReminderLogic, ReminderStore};
use crate::core::status::Snapshot;
use crate::db::log::{log_failure, ttlog};
use crate::db::notifications;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::notification::{END_OF_DAY_ID, NotificationRequest, SAFE_EXIT_ID};
use crate::models::reminder::Reminder;
use crate::ui::messages;
use crate::utils::date::format_clock;
use crate::utils::formatting::mins2readable;
use chrono::{DateTime, Local};
use std::process::Command;

/// Delivers a notification to the user.
pub trait Notifier {
    fn deliver(&self, req: &NotificationRequest) -> AppResult<()>;
}

/// Prints notifications on the terminal.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn deliver(&self, req: &NotificationRequest) -> AppResult<()> {
        messages::notification(&req.title, &req.body);
        Ok(())
    }
}

/// Runs an external program with the title and body as arguments
/// (e.g. `notify-send`, `terminal-notifier -message`).
pub struct CommandNotifier {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandNotifier {
    /// Split a configured command line such as `terminal-notifier -title`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl Notifier for CommandNotifier {
    fn deliver(&self, req: &NotificationRequest) -> AppResult<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&req.title)
            .arg(&req.body)
            .status()
            .map_err(|e| AppError::Notification(format!("{}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(AppError::Notification(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}

/// Notifier selected by the configuration.
pub fn notifier_for(cfg: &Config) -> Box<dyn Notifier> {
    match cfg
        .notifier_command
        .as_deref()
        .and_then(CommandNotifier::from_command_line)
    {
        Some(n) => Box::new(n),
        None => Box::new(ConsoleNotifier),
    }
}

fn safe_exit_request(m: &Milestones) -> NotificationRequest {
    let day = m.entry.date_naive();
    NotificationRequest::new(
        SAFE_EXIT_ID,
        "Safe exit",
        &format!(
            "You can leave from {} (entry {}).",
            format_clock(&m.safe_exit_time, day),
            m.entry.format("%H:%M")
        ),
        m.safe_exit_time,
    )
}

fn end_of_day_request(m: &Milestones) -> NotificationRequest {
    let day = m.entry.date_naive();
    NotificationRequest::new(
        END_OF_DAY_ID,
        "End of work day",
        &format!(
            "Your {} office day ends at {}.",
            mins2readable(m.office_duration, false, false),
            format_clock(&m.end_time, day)
        ),
        m.end_time,
    )
}

fn reminder_request(r: &Reminder, fire_at: DateTime<Local>) -> NotificationRequest {
    NotificationRequest::new(&r.id, &r.title, &r.describe_trigger(), fire_at)
        .repeating(r.repeat_weekdays)
}

pub struct NotificationLogic;

impl NotificationLogic {
    /// Register (or replace) a request. Failures are logged and ignored;
    /// returns whether the request was stored.
    ///
    /// With notifications disabled the request is skipped and any earlier
    /// request under the same identifier is dropped.
    pub fn register(pool: &DbPool, cfg: &Config, req: &NotificationRequest) -> bool {
        if !cfg.notifications {
            if let Err(e) = Self::unregister(pool, &req.identifier) {
                log_failure(
                    &pool.conn,
                    "notify_schedule",
                    &req.identifier,
                    &format!("Cannot drop notification: {}", e),
                );
            }
            return false;
        }

        match notifications::upsert(&pool.conn, req) {
            Ok(()) => true,
            Err(e) => {
                log_failure(
                    &pool.conn,
                    "notify_schedule",
                    &req.identifier,
                    &format!("Cannot schedule notification: {}", e),
                );
                false
            }
        }
    }

    pub fn unregister(pool: &DbPool, identifier: &str) -> AppResult<bool> {
        notifications::remove(&pool.conn, identifier)
    }

    fn register_or_remove(
        pool: &DbPool,
        cfg: &Config,
        identifier: &str,
        req: Option<NotificationRequest>,
    ) -> AppResult<()> {
        match req {
            Some(r) => {
                Self::register(pool, cfg, &r);
            }
            None => {
                Self::unregister(pool, identifier)?;
            }
        }
        Ok(())
    }

    /// Safe-exit and end-of-day requests follow today's milestones; they are
    /// dropped when there is no entry or the moment has passed.
    pub fn reschedule_fixed(pool: &DbPool, cfg: &Config, snap: &Snapshot) -> AppResult<()> {
        let now = snap.now;
        let (safe, end) = match &snap.milestones {
            Some(m) => (
                (m.safe_exit_time > now).then(|| safe_exit_request(m)),
                (m.end_time > now).then(|| end_of_day_request(m)),
            ),
            None => (None, None),
        };

        Self::register_or_remove(pool, cfg, SAFE_EXIT_ID, safe)?;
        Self::register_or_remove(pool, cfg, END_OF_DAY_ID, end)
    }

    fn reschedule_with(
        pool: &DbPool,
        cfg: &Config,
        reminder: &Reminder,
        snap: &Snapshot,
    ) -> AppResult<Option<DateTime<Local>>> {
        let fire = next_fire(reminder, &snap.now, snap.milestones.as_ref());
        Self::register_or_remove(
            pool,
            cfg,
            &reminder.id,
            fire.map(|ts| reminder_request(reminder, ts)),
        )?;
        Ok(fire)
    }

    /// Re-derive and re-register one reminder's request.
    pub fn reschedule_reminder(
        pool: &DbPool,
        cfg: &Config,
        reminder: &Reminder,
        now: &DateTime<Local>,
    ) -> AppResult<Option<DateTime<Local>>> {
        let snap = Snapshot::load(pool, cfg, now)?;
        Self::reschedule_with(pool, cfg, reminder, &snap)
    }

    /// Re-derive every request: the two fixed ones and one per reminder.
    /// Requests left over from deleted reminders are dropped.
    pub fn reschedule_all(pool: &DbPool, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
        let snap = Snapshot::load(pool, cfg, now)?;
        Self::reschedule_fixed(pool, cfg, &snap)?;

        let reminders = ReminderStore::load(pool)?;
        for r in &reminders {
            Self::reschedule_with(pool, cfg, r, &snap)?;
        }

        for pending in notifications::list(&pool.conn)? {
            if !pending.is_fixed() && !reminders.iter().any(|r| r.id == pending.identifier) {
                Self::unregister(pool, &pending.identifier)?;
            }
        }

        Ok(())
    }

    /// Deliver every request due at `now`, then re-arm the reminders that
    /// fire again. Returns the delivered requests.
    pub fn deliver_due(
        pool: &DbPool,
        cfg: &Config,
        notifier: &dyn Notifier,
        now: &DateTime<Local>,
    ) -> AppResult<Vec<NotificationRequest>> {
        if !cfg.notifications {
            return Ok(Vec::new());
        }

        let due = notifications::due(&pool.conn, now)?;
        if due.is_empty() {
            return Ok(due);
        }

        let mut delivered = Vec::new();

        for req in due {
            match notifier.deliver(&req) {
                Ok(()) => {
                    ttlog(&pool.conn, "notify", &req.identifier, &req.title)?;
                    delivered.push(req.clone());
                }
                Err(e) => log_failure(
                    &pool.conn,
                    "notify_deliver",
                    &req.identifier,
                    &e.to_string(),
                ),
            }

            Self::unregister(pool, &req.identifier)?;

            if !req.is_fixed()
                && let Some(r) = ReminderLogic::mark_fired(pool, &req.identifier, now)?
            {
                Self::reschedule_reminder(pool, cfg, &r, now)?;
            }
        }

        Ok(delivered)
    }

    pub fn pending(pool: &DbPool) -> AppResult<Vec<NotificationRequest>> {
        notifications::list(&pool.conn)
    }
}
