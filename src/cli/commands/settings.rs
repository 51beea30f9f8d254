use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify::NotificationLogic;
use crate::core::settings::{SettingsLogic, WorkdaySettings};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::display_mode::DisplayMode;
use crate::models::workdays::Workdays;
use crate::ui::messages::{field, success};
use crate::utils::formatting::mins2readable;
use crate::utils::time::parse_duration_minutes;
use chrono::{DateTime, Local};

fn print_settings(s: &WorkdaySettings) {
    let origin = |overridden: bool| if overridden { "" } else { " (default)" };

    println!("⚙️  Settings:\n");
    field(
        "Office duration",
        format!(
            "{}{}",
            mins2readable(s.office_duration, false, false),
            origin(s.office_duration_overridden)
        ),
    );
    field(
        "Safe exit after",
        format!(
            "{}{}",
            mins2readable(s.safe_exit_offset, false, false),
            origin(s.safe_exit_overridden)
        ),
    );
    field("Display", s.display_mode.code());
    field("Workdays", s.workdays.describe());
}

pub fn handle(cmd: &Commands, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    if let Commands::Settings {
        office_duration,
        safe_exit,
        display,
        workdays,
        reset,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let mut durations_changed = false;

        if *reset {
            SettingsLogic::reset(&pool)?;
            success("Settings reset to configuration defaults.");
            durations_changed = true;
        }

        if let Some(d) = office_duration {
            let minutes = parse_duration_minutes(d)?;
            SettingsLogic::set_office_duration(&pool, minutes)?;
            success(format!(
                "Office duration set to {}",
                mins2readable(minutes, false, false)
            ));
            durations_changed = true;
        }

        if let Some(d) = safe_exit {
            let minutes = parse_duration_minutes(d)?;
            SettingsLogic::set_safe_exit(&pool, minutes)?;
            success(format!(
                "Safe-exit offset set to {}",
                mins2readable(minutes, false, false)
            ));
            durations_changed = true;
        }

        if let Some(code) = display {
            let mode = DisplayMode::from_code(code)
                .ok_or_else(|| AppError::InvalidDisplayMode(code.to_string()))?;
            SettingsLogic::set_display_mode(&pool, mode)?;
            success(format!("Display mode set to {}", mode.code()));
        }

        if let Some(list) = workdays {
            let days = Workdays::parse(list)?;
            SettingsLogic::set_workdays(&pool, &days)?;
            success(format!("Workdays set to {}", days.describe()));
        }

        if durations_changed {
            NotificationLogic::reschedule_all(&pool, cfg, now)?;
        }

        let current = SettingsLogic::load(&pool, cfg)?;
        print_settings(&current);
    }

    Ok(())
}
