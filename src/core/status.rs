use crate::config::Config;
use crate::core::calculator::milestones::{self, Milestones};
use crate::core::entry::EntryLogic;
use crate::core::settings::{SettingsLogic, WorkdaySettings};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::display_mode::DisplayMode;
use crate::models::entry::EntryTime;
use crate::utils::date::format_clock;
use crate::utils::formatting::mins2readable;
use chrono::{DateTime, Local};

/// Everything the status screen and the schedulers need for "now".
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub now: DateTime<Local>,
    pub settings: WorkdaySettings,
    pub entry: Option<EntryTime>,
    pub milestones: Option<Milestones>,
}

impl Snapshot {
    pub fn load(pool: &DbPool, cfg: &Config, now: &DateTime<Local>) -> AppResult<Self> {
        let settings = SettingsLogic::load(pool, cfg)?;
        let entry = EntryLogic::load(pool, now)?;
        let milestones = entry
            .as_ref()
            .map(|e| {
                milestones::compute(e, settings.office_duration, settings.safe_exit_offset, now)
            })
            .transpose()?;

        Ok(Self {
            now: *now,
            settings,
            entry,
            milestones,
        })
    }

    /// Compact one-line title, e.g. `⏳ 03:12`.
    pub fn title(&self) -> String {
        self.title_for(self.settings.display_mode)
    }

    pub fn title_for(&self, mode: DisplayMode) -> String {
        let Some(m) = &self.milestones else {
            return format!("{} --:--", mode.icon());
        };

        let today = self.now.date_naive();
        let value = match mode {
            DisplayMode::Remaining => mins2readable(m.remaining, false, true),
            DisplayMode::End => format_clock(&m.end_time, today),
            DisplayMode::SafeExit => format_clock(&m.safe_exit_time, today),
            DisplayMode::Worked => mins2readable(m.worked, false, true),
        };

        format!("{} {}", mode.icon(), value)
    }
}
