#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// A Monday, so weekday reminders behave normally.
pub const DAY: &str = "2026-10-19";

pub fn rwd() -> Command {
    cargo_bin_cmd!("rworkday")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworkday.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Path of a configuration file that does not exist, so defaults are used
/// regardless of the user's own configuration.
pub fn no_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_missing_rworkday.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Office used by the geofence tests.
pub const OFFICE_LAT: f64 = 45.4642;
pub const OFFICE_LON: f64 = 9.1900;

/// Write a configuration file with the office geofence and return its path.
pub fn write_config(name: &str, db_path: &str, geofence: bool, notifications: bool) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rworkday.conf", name));
    let p = path.to_string_lossy().to_string();

    let yaml = format!(
        "database: '{db_path}'\n\
         office_duration: 9h\n\
         safe_exit_offset: 8h\n\
         notifications: {notifications}\n\
         launch_at_login: false\n\
         geofence:\n  \
           enabled: {geofence}\n  \
           latitude: {OFFICE_LAT}\n  \
           longitude: {OFFICE_LON}\n  \
           radius_meters: 150.0\n  \
           dwell_seconds: 300\n\
         separator_char: '-'\n"
    );
    fs::write(&p, yaml).expect("write config");
    p
}

/// Command bound to a test DB, a default configuration and a fixed clock
/// (`time` is HH:MM on [`DAY`]).
pub fn rwd_at(db_path: &str, config: &str, time: &str) -> Command {
    rwd_on(db_path, config, DAY, time)
}

pub fn rwd_on(db_path: &str, config: &str, day: &str, time: &str) -> Command {
    let mut cmd = rwd();
    cmd.args([
        "--db",
        db_path,
        "--config-file",
        config,
        "--test",
        "--at",
        &format!("{} {}", day, time),
    ]);
    cmd
}

/// Reminder id printed by `reminder add`: `Reminder <id> added: <title>`.
pub fn reminder_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    text.split("Reminder ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .expect("reminder id in output")
        .to_string()
}
