use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::milestones::Phase;
use crate::core::entry::EntryLogic;
use crate::core::status::Snapshot;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{field, header, info};
use crate::utils::colors::{
    BLUE, CYAN, GREEN, YELLOW, color_for_overtime, color_for_remaining, colorize_optional, paint,
};
use crate::utils::date::format_clock;
use crate::utils::formatting::{bold, mins2readable, progress_bar};
use chrono::{DateTime, Datelike, Local};

fn phase_color(phase: Phase) -> &'static str {
    match phase {
        Phase::Upcoming => BLUE,
        Phase::Working => CYAN,
        Phase::SafeToLeave => YELLOW,
        Phase::Done => GREEN,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    if let Commands::Status { title } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let snap = Snapshot::load(&pool, cfg, now)?;

        if *title {
            println!("{}", snap.title());
            return Ok(());
        }

        let today = now.date_naive();
        header(format!("Work day {} ({})", today, today.weekday()));

        let s = &snap.settings;
        let Some(m) = &snap.milestones else {
            info("No entry time recorded for today.");
            field("Entry", colorize_optional("--:--"));
            field("Office duration", mins2readable(s.office_duration, false, false));
            field("Safe exit after", mins2readable(s.safe_exit_offset, false, false));
            field("Workdays", s.workdays.describe());
            field("Display", s.display_mode.code());
            field("Title", snap.title());
            return Ok(());
        };

        let source = EntryLogic::source(&pool)?.unwrap_or_else(|| "manual".to_string());
        let entry_clock = snap.entry.map(|e| e.clock()).unwrap_or_default();

        field("Entry", format!("{} ({})", bold(&entry_clock), source));
        field("Worked", mins2readable(m.worked, false, false));
        field(
            "Remaining",
            paint(
                color_for_remaining(m.remaining),
                &mins2readable(m.remaining, false, false),
            ),
        );

        let safe_exit = format_clock(&m.safe_exit_time, today);
        if m.until_safe_exit > 0 {
            field(
                "Safe exit",
                format!(
                    "{} (in {})",
                    safe_exit,
                    mins2readable(m.until_safe_exit, false, false)
                ),
            );
        } else {
            field("Safe exit", safe_exit);
        }

        field("End of day", format_clock(&m.end_time, today));
        field(
            "Overtime",
            paint(
                color_for_overtime(m.overtime),
                &mins2readable(m.overtime, false, false),
            ),
        );
        field("Progress", progress_bar(m.progress, 20));
        field("Status", paint(phase_color(m.phase), m.phase.label()));

        let workday_note = if s.workdays.contains(today.weekday()) {
            ""
        } else {
            " (today is a day off)"
        };
        field("Workdays", format!("{}{}", s.workdays.describe(), workday_note));
        field("Display", s.display_mode.code());
        field("Title", snap.title());
    }

    Ok(())
}
