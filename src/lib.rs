//! rWorkday library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::{DateTime, Local};
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use ui::messages::{info, warning};
use utils::date::parse_local_datetime;
use utils::path::expand_tilde;
use std::path::PathBuf;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => {
            cli::commands::config::handle(&cli.command, cfg, &config_path(cli))
        }
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Entry { .. } => cli::commands::entry::handle(&cli.command, cfg, now),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg, now),
        Commands::Settings { .. } => cli::commands::settings::handle(&cli.command, cfg, now),
        Commands::Reminder { .. } => cli::commands::reminder::handle(&cli.command, cfg, now),
        Commands::Locate { .. } => cli::commands::locate::handle(&cli.command, cfg, now),
        Commands::Notify { .. } => cli::commands::notify::handle(&cli.command, cfg, now),
    }
}

/// Configuration file in use: `--config-file` or the platform default.
fn config_path(cli: &Cli) -> PathBuf {
    match &cli.config_file {
        Some(path) => expand_tilde(path),
        None => Config::config_file(),
    }
}

/// Launch-at-login registration, once per process. Failures are only reported.
fn register_login_item(cli: &Cli, cfg: &Config) {
    if cli.test || !cfg.launch_at_login {
        return;
    }

    match core::login::ensure_registered() {
        Ok(Some(path)) => info(format!("Registered launch at login: {}", path.display())),
        Ok(None) => {}
        Err(e) => warning(format!("Launch at login not registered: {}", e)),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once
    let mut cfg = Config::load_from(&config_path(&cli))?;

    // Command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let now = match &cli.at {
        Some(s) => parse_local_datetime(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
        None => Local::now(),
    };

    register_login_item(&cli, &cfg);

    dispatch(&cli, &cfg, &now)
}
