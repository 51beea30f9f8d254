use crate::config::Config;
use crate::core::notify::NotificationLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings::{self, keys};
use crate::errors::AppResult;
use crate::models::entry::{EntrySource, EntryTime};
use crate::utils::date::from_epoch_seconds;
use chrono::{DateTime, Local};

pub struct EntryLogic;

impl EntryLogic {
    fn remove_keys(pool: &DbPool) -> AppResult<()> {
        for key in [
            keys::ENTRY_TIMESTAMP,
            keys::ENTRY_HOUR,
            keys::ENTRY_MINUTE,
            keys::ENTRY_SOURCE,
        ] {
            settings::remove(&pool.conn, key)?;
        }
        Ok(())
    }

    /// Today's entry time, if any.
    ///
    /// A stored entry that does not belong to the calendar day of `now` is
    /// removed and reported as absent.
    pub fn load(pool: &DbPool, now: &DateTime<Local>) -> AppResult<Option<EntryTime>> {
        let Some(epoch) = settings::get_i64(&pool.conn, keys::ENTRY_TIMESTAMP)? else {
            return Ok(None);
        };

        let entry = from_epoch_seconds(epoch).map(EntryTime::new);

        match entry {
            Some(e) if e.is_on(now.date_naive()) => Ok(Some(e)),
            stale => {
                Self::remove_keys(pool)?;
                let what = stale
                    .map(|e| e.timestamp.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| epoch.to_string());
                ttlog(
                    &pool.conn,
                    "entry_reset",
                    &what,
                    "Stored entry time is not from today; reset",
                )?;
                Ok(None)
            }
        }
    }

    pub fn source(pool: &DbPool) -> AppResult<Option<String>> {
        settings::get(&pool.conn, keys::ENTRY_SOURCE)
    }

    /// Record the entry time and re-register everything derived from it.
    pub fn set(
        pool: &DbPool,
        cfg: &Config,
        timestamp: DateTime<Local>,
        source: EntrySource,
        now: &DateTime<Local>,
    ) -> AppResult<EntryTime> {
        let entry = EntryTime::new(timestamp);

        settings::set_i64(&pool.conn, keys::ENTRY_TIMESTAMP, entry.epoch_seconds())?;
        settings::set_i64(&pool.conn, keys::ENTRY_HOUR, entry.hour as i64)?;
        settings::set_i64(&pool.conn, keys::ENTRY_MINUTE, entry.minute as i64)?;
        settings::set(&pool.conn, keys::ENTRY_SOURCE, source.as_str())?;

        ttlog(
            &pool.conn,
            "entry",
            &entry.timestamp.format("%Y-%m-%d").to_string(),
            &format!("Entry time set to {} ({})", entry.clock(), source.as_str()),
        )?;

        NotificationLogic::reschedule_all(pool, cfg, now)?;

        Ok(entry)
    }

    /// Forget today's entry time. Returns whether one was recorded.
    pub fn clear(pool: &DbPool, cfg: &Config, now: &DateTime<Local>) -> AppResult<bool> {
        let existed = settings::get(&pool.conn, keys::ENTRY_TIMESTAMP)?.is_some();
        Self::remove_keys(pool)?;

        if existed {
            ttlog(&pool.conn, "entry_clear", "", "Entry time cleared")?;
        }

        NotificationLogic::reschedule_all(pool, cfg, now)?;
        Ok(existed)
    }
}
