//! SQLite connection wrapper (lightweight for CLI usage).

use crate::db::initialize::init_db;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use rusqlite::Connection;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database and make sure the schema is up to date.
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(expand_tilde(path))?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory database, used by library tests.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }
}
