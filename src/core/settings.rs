use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings::{self, keys};
use crate::errors::AppResult;
use crate::models::display_mode::DisplayMode;
use crate::models::workdays::Workdays;
use crate::utils::time::MAX_DURATION_MINUTES;

/// Effective user settings: persisted overrides on top of the config defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkdaySettings {
    /// Minutes.
    pub office_duration: i64,
    /// Minutes.
    pub safe_exit_offset: i64,
    pub display_mode: DisplayMode,
    pub workdays: Workdays,
    pub office_duration_overridden: bool,
    pub safe_exit_overridden: bool,
}

pub struct SettingsLogic;

impl SettingsLogic {
    pub fn load(pool: &DbPool, cfg: &Config) -> AppResult<WorkdaySettings> {
        let conn = &pool.conn;

        // Out-of-range overrides fall back to the config defaults.
        let in_range = |m: &i64| (1..=MAX_DURATION_MINUTES).contains(m);
        let stored_office = settings::get_i64(conn, keys::OFFICE_DURATION)?.filter(in_range);
        let stored_safe = settings::get_i64(conn, keys::SAFE_EXIT)?.filter(in_range);

        let office_duration = match stored_office {
            Some(m) => m,
            None => cfg.office_duration_minutes()?,
        };
        let safe_exit_offset = match stored_safe {
            Some(m) => m,
            None => cfg.safe_exit_minutes()?,
        };

        let display_mode = settings::get(conn, keys::DISPLAY_MODE)?
            .and_then(|s| DisplayMode::from_code(&s))
            .unwrap_or_default();

        let workdays = settings::get(conn, keys::WORKDAYS)?
            .and_then(|s| Workdays::from_db_str(&s))
            .unwrap_or_default();

        Ok(WorkdaySettings {
            office_duration,
            safe_exit_offset,
            display_mode,
            workdays,
            office_duration_overridden: stored_office.is_some(),
            safe_exit_overridden: stored_safe.is_some(),
        })
    }

    pub fn set_office_duration(pool: &DbPool, minutes: i64) -> AppResult<()> {
        settings::set_i64(&pool.conn, keys::OFFICE_DURATION, minutes)?;
        ttlog(
            &pool.conn,
            "settings",
            keys::OFFICE_DURATION,
            &format!("Office duration set to {} min", minutes),
        )
    }

    pub fn set_safe_exit(pool: &DbPool, minutes: i64) -> AppResult<()> {
        settings::set_i64(&pool.conn, keys::SAFE_EXIT, minutes)?;
        ttlog(
            &pool.conn,
            "settings",
            keys::SAFE_EXIT,
            &format!("Safe-exit offset set to {} min", minutes),
        )
    }

    pub fn set_display_mode(pool: &DbPool, mode: DisplayMode) -> AppResult<()> {
        settings::set(&pool.conn, keys::DISPLAY_MODE, mode.code())?;
        ttlog(
            &pool.conn,
            "settings",
            keys::DISPLAY_MODE,
            &format!("Display mode set to {}", mode.code()),
        )
    }

    pub fn set_workdays(pool: &DbPool, workdays: &Workdays) -> AppResult<()> {
        settings::set(&pool.conn, keys::WORKDAYS, &workdays.to_db_str())?;
        ttlog(
            &pool.conn,
            "settings",
            keys::WORKDAYS,
            &format!("Workdays set to {}", workdays.describe()),
        )
    }

    /// Drop every user override; config defaults apply again.
    pub fn reset(pool: &DbPool) -> AppResult<()> {
        for key in [
            keys::OFFICE_DURATION,
            keys::SAFE_EXIT,
            keys::DISPLAY_MODE,
            keys::WORKDAYS,
        ] {
            settings::remove(&pool.conn, key)?;
        }
        ttlog(&pool.conn, "settings", "reset", "Settings reset to defaults")
    }
}
