use crate::cli::parser::{Commands, ReminderAction, TriggerArgs};
use crate::config::Config;
use crate::core::calculator::schedule::next_fire;
use crate::core::reminder::{ReminderChanges, ReminderLogic};
use crate::core::status::Snapshot;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::reminder::{Reminder, Trigger};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::formatting::short;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_time;
use chrono::{DateTime, Local, NaiveDate};

fn parse_trigger(args: &TriggerArgs) -> AppResult<Option<Trigger>> {
    if let Some(t) = &args.at_time {
        let time = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.clone()))?;
        return Ok(Some(Trigger::AtTime { time }));
    }
    if let Some(minutes) = args.after {
        return Ok(Some(Trigger::AfterInterval { minutes }));
    }
    if let Some(minutes) = args.after_entry {
        return Ok(Some(Trigger::AfterEntry { minutes }));
    }
    if let Some(minutes) = args.before_end {
        return Ok(Some(Trigger::BeforeEnd { minutes }));
    }
    Ok(None)
}

fn parse_optional_date(date: &Option<String>) -> AppResult<Option<NaiveDate>> {
    match date {
        Some(d) => Ok(Some(
            parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
        )),
        None => Ok(None),
    }
}

fn describe_next(fire: Option<DateTime<Local>>) -> String {
    match fire {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => "--".to_string(),
    }
}

fn print_list(pool: &DbPool, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    let reminders = ReminderLogic::list(pool)?;
    if reminders.is_empty() {
        info("No reminders defined.");
        return Ok(());
    }

    let snap = Snapshot::load(pool, cfg, now)?;
    let sep = cfg.separator_char.chars().next().unwrap_or('-');

    let mut table = Table::new(
        vec![
            Column::new("ID"),
            Column::new("TITLE"),
            Column::new("TRIGGER"),
            Column::new("FLAGS"),
            Column::new("NEXT"),
        ],
        sep,
    );

    for r in &reminders {
        let next = next_fire(r, now, snap.milestones.as_ref());
        table.add_row(vec![
            short(&r.id, 8),
            r.title.clone(),
            r.describe_trigger(),
            r.flags(),
            describe_next(next),
        ]);
    }

    println!("🔔 Reminders:\n");
    print!("{}", table.render());
    Ok(())
}

fn report_saved(verb: &str, r: &Reminder, fire: Option<DateTime<Local>>) {
    success(format!("Reminder {} {}: {}", r.id, verb, r.title));
    match fire {
        Some(ts) => info(format!("Next notification: {}", ts.format("%Y-%m-%d %H:%M"))),
        None if r.trigger.is_entry_relative() => {
            info("Not scheduled: waiting for today's entry time.")
        }
        None => info("Not scheduled: no upcoming fire time."),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    if let Commands::Reminder { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            ReminderAction::Add {
                title,
                trigger,
                flags,
            } => {
                let trigger = parse_trigger(trigger)?.ok_or_else(|| {
                    AppError::InvalidReminder(
                        "one of --at-time, --after, --after-entry, --before-end is required"
                            .into(),
                    )
                })?;
                let date = parse_optional_date(&flags.date)?;

                let reminder =
                    Reminder::new(title, trigger, date, flags.weekdays, flags.clamp, *now)?;
                let saved = ReminderLogic::add(&pool, cfg, reminder, now)?;

                let snap = Snapshot::load(&pool, cfg, now)?;
                report_saved("added", &saved, next_fire(&saved, now, snap.milestones.as_ref()));
            }

            ReminderAction::Edit {
                id,
                title,
                trigger,
                flags,
                no_date,
                no_weekdays,
                no_clamp,
            } => {
                let date = if *no_date {
                    Some(None)
                } else {
                    parse_optional_date(&flags.date)?.map(Some)
                };

                let changes = ReminderChanges {
                    title: title.clone(),
                    trigger: parse_trigger(trigger)?,
                    date,
                    repeat_weekdays: if flags.weekdays {
                        Some(true)
                    } else if *no_weekdays {
                        Some(false)
                    } else {
                        None
                    },
                    clamp_to_work_hours: if flags.clamp {
                        Some(true)
                    } else if *no_clamp {
                        Some(false)
                    } else {
                        None
                    },
                };

                let saved = ReminderLogic::edit(&pool, cfg, id, changes, now)?;
                let snap = Snapshot::load(&pool, cfg, now)?;
                report_saved("updated", &saved, next_fire(&saved, now, snap.milestones.as_ref()));
            }

            ReminderAction::Del { id } => {
                let removed = ReminderLogic::delete(&pool, id)?;
                success(format!("Reminder {} deleted: {}", removed.id, removed.title));
            }

            ReminderAction::List => print_list(&pool, cfg, now)?,
        }
    }

    Ok(())
}
