//! Path utilities: expand ~, resolve platform directories.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Directory holding per-user autostart entries for the current platform.
pub fn autostart_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("LaunchAgents"))
    } else if cfg!(target_os = "windows") {
        dirs::data_dir().map(|d| {
            d.join("Microsoft")
                .join("Windows")
                .join("Start Menu")
                .join("Programs")
                .join("Startup")
        })
    } else {
        dirs::config_dir().map(|c| c.join("autostart"))
    }
}
