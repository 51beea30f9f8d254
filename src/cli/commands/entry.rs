use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::EntryLogic;
use crate::core::status::Snapshot;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::EntrySource;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{at, format_clock};
use crate::utils::time::parse_optional_time;
use chrono::{DateTime, Local};

/// Record or clear today's entry time.
pub fn handle(cmd: &Commands, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    if let Commands::Entry { time, clear } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if *clear {
            if EntryLogic::clear(&pool, cfg, now)? {
                success("Entry time cleared.");
            } else {
                info("No entry time recorded for today.");
            }
            return Ok(());
        }

        let timestamp = match parse_optional_time(time.as_ref())? {
            Some(t) => at(now.date_naive(), t).ok_or_else(|| {
                AppError::InvalidTime(format!("{} does not exist today", t.format("%H:%M")))
            })?,
            None => *now,
        };

        let entry = EntryLogic::set(&pool, cfg, timestamp, EntrySource::Manual, now)?;
        success(format!("Entry time set to {}", entry.clock()));

        if entry.is_in_future(now) {
            warning("The entry time is in the future; worked time counts from then.");
        }

        let snap = Snapshot::load(&pool, cfg, now)?;
        if let Some(m) = &snap.milestones {
            let today = now.date_naive();
            info(format!(
                "Safe exit at {}, end of day at {}",
                format_clock(&m.safe_exit_time, today),
                format_clock(&m.end_time, today)
            ));
        }
    }

    Ok(())
}
