use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::time::Duration;

/// Initialize the database.
/// Schema creation and upgrades all go through the migration runner.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    // `notify` may run from a login hook while another command is writing.
    conn.busy_timeout(Duration::from_secs(5))?;

    run_pending_migrations(conn)?;
    Ok(())
}
