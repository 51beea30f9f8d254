use super::Config;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use rusqlite::{Connection, OptionalExtension};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

const VERSION: &str = "20260301_0001_config_geofence_notifier";

/// Compare the YAML file at `conf_file` against the default configuration and
/// return the top-level keys it lacks. When `write` is set, the missing keys
/// are inserted with their default value and the file is rewritten.
fn scan_missing_fields(conf_file: &Path, write: bool) -> io::Result<Vec<String>> {
    if !conf_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(conf_file)?;
    let mut yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| io::Error::other(format!("cannot parse {:?}: {}", conf_file, e)))?;

    let map = yaml
        .as_mapping_mut()
        .ok_or_else(|| io::Error::other(format!("{:?} is not a YAML mapping", conf_file)))?;

    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| io::Error::other(format!("cannot serialize defaults: {}", e)))?;

    let mut missing = Vec::new();

    if let Value::Mapping(default_map) = defaults {
        for (key, value) in default_map {
            if map.contains_key(&key) {
                continue;
            }
            if let Some(name) = key.as_str() {
                missing.push(name.to_string());
            }
            if write {
                map.insert(key, value);
            }
        }
    }

    if write && !missing.is_empty() {
        let serialized = serde_yaml::to_string(&yaml)
            .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
        fs::write(conf_file, serialized)?;
    }

    Ok(missing)
}

/// Report the configuration keys missing from `conf_file`, without touching it.
pub fn missing_fields(conf_file: &Path) -> io::Result<Vec<String>> {
    scan_missing_fields(conf_file, false)
}

/// Add the missing keys to the configuration file once, recording the
/// migration in the `log` table so it is not applied twice.
pub fn migrate_config_fields(conn: &Connection, conf_file: &Path) -> AppResult<Vec<String>> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    let already = chk.query_row([VERSION], |_| Ok(())).optional()?.is_some();

    let added = scan_missing_fields(conf_file, true).map_err(|e| {
        AppError::Migration(format!("config migration {} failed: {}", VERSION, e))
    })?;

    if !added.is_empty() {
        info(format!(
            "Config migration ({}) added: {}",
            VERSION,
            added.join(", ")
        ));
    }

    if !already {
        ttlog(
            conn,
            "migration_applied",
            VERSION,
            "Added geofence / notifier fields to the configuration file",
        )?;
        success(format!("Migration applied: {}", VERSION));
    }

    Ok(added)
}
