use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify::{NotificationLogic, notifier_for};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::short;
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Local};

fn print_pending(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let pending = NotificationLogic::pending(pool)?;
    if pending.is_empty() {
        info("No pending notifications.");
        return Ok(());
    }

    let sep = cfg.separator_char.chars().next().unwrap_or('-');
    let mut table = Table::new(
        vec![
            Column::new("ID"),
            Column::new("FIRE AT"),
            Column::new("TITLE"),
            Column::new("REPEATS"),
        ],
        sep,
    );

    for req in &pending {
        let id = if req.is_fixed() {
            req.identifier.clone()
        } else {
            short(&req.identifier, 8)
        };
        table.add_row(vec![
            id,
            req.fire_at.format("%Y-%m-%d %H:%M").to_string(),
            req.title.clone(),
            if req.repeats { "yes" } else { "no" }.to_string(),
        ]);
    }

    println!("🗓️  Pending notifications:\n");
    print!("{}", table.render());
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    if let Commands::Notify { list } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if *list {
            return print_pending(&pool, cfg);
        }

        let notifier = notifier_for(cfg);
        let delivered = NotificationLogic::deliver_due(&pool, cfg, notifier.as_ref(), now)?;

        // A new day may have reset the entry time.
        NotificationLogic::reschedule_all(&pool, cfg, now)?;

        if delivered.is_empty() {
            info("No notifications due.");
        } else {
            success(format!("{} notification(s) delivered.", delivered.len()));
        }
    }

    Ok(())
}
