use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_duration_minutes;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

/// Office geofence: one fixed coordinate, a radius and the dwell time
/// required before an arrival is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,
    #[serde(default = "default_dwell_seconds")]
    pub dwell_seconds: i64,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            latitude: 0.0,
            longitude: 0.0,
            radius_meters: default_radius_meters(),
            dwell_seconds: default_dwell_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_office_duration")]
    pub office_duration: String,
    #[serde(default = "default_safe_exit_offset")]
    pub safe_exit_offset: String,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default)]
    pub notifier_command: Option<String>,
    /// Opt-in: writes an autostart entry for the current user.
    #[serde(default)]
    pub launch_at_login: bool,
    #[serde(default)]
    pub geofence: GeofenceConfig,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_office_duration() -> String {
    "9h".to_string()
}
fn default_safe_exit_offset() -> String {
    "8h".to_string()
}
fn default_true() -> bool {
    true
}
fn default_radius_meters() -> f64 {
    150.0
}
fn default_dwell_seconds() -> i64 {
    300
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            office_duration: default_office_duration(),
            safe_exit_offset: default_safe_exit_offset(),
            notifications: true,
            notifier_command: None,
            launch_at_login: false,
            geofence: GeofenceConfig::default(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rworkday")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rworkday")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworkday.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworkday.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Default office duration, in minutes.
    pub fn office_duration_minutes(&self) -> AppResult<i64> {
        parse_duration_minutes(&self.office_duration)
    }

    /// Default safe-exit offset, in minutes.
    pub fn safe_exit_minutes(&self) -> AppResult<i64> {
        parse_duration_minutes(&self.safe_exit_offset)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// Returns the resolved database path.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rworkday.sqlite")
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Self::with_database(db_path.clone());
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
