//! Launch-at-login registration.
//!
//! The registered command is `rworkday notify`, so pending notifications are
//! delivered as soon as the user session starts (and, on macOS, every minute
//! through the LaunchAgent interval).

use crate::errors::{AppError, AppResult};
use crate::utils::path::autostart_dir;
use std::fs;
use std::path::{Path, PathBuf};

const LABEL: &str = "com.umpire274.rworkday";

/// File name and contents of the autostart entry for the current platform.
pub fn render_entry(exe: &Path) -> (String, String) {
    let exe = exe.display();

    if cfg!(target_os = "macos") {
        let plist = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{LABEL}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{exe}</string>
        <string>notify</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
    <key>StartInterval</key>
    <integer>60</integer>
</dict>
</plist>
"#
        );
        (format!("{LABEL}.plist"), plist)
    } else if cfg!(target_os = "windows") {
        (
            "rworkday.cmd".to_string(),
            format!("@echo off\r\nstart \"\" /min \"{exe}\" notify\r\n"),
        )
    } else {
        let desktop = format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=rWorkday\n\
             Comment=Deliver pending work-day notifications\n\
             Exec=\"{exe}\" notify\n\
             Terminal=false\n\
             X-GNOME-Autostart-enabled=true\n"
        );
        ("rworkday.desktop".to_string(), desktop)
    }
}

/// Write the autostart entry into `dir`. Idempotent: returns `false` when an
/// identical entry is already present.
pub fn register_in(dir: &Path, exe: &Path) -> AppResult<bool> {
    let (name, contents) = render_entry(exe);
    let path = dir.join(name);

    if let Ok(existing) = fs::read_to_string(&path)
        && existing == contents
    {
        return Ok(false);
    }

    fs::create_dir_all(dir)
        .map_err(|e| AppError::LoginItem(format!("cannot create {}: {}", dir.display(), e)))?;
    fs::write(&path, contents)
        .map_err(|e| AppError::LoginItem(format!("cannot write {}: {}", path.display(), e)))?;

    Ok(true)
}

/// Register the running binary in the platform autostart directory.
/// Returns the entry path when a new entry was written.
pub fn ensure_registered() -> AppResult<Option<PathBuf>> {
    let dir = autostart_dir()
        .ok_or_else(|| AppError::LoginItem("no autostart directory on this platform".into()))?;
    let exe = std::env::current_exe()
        .map_err(|e| AppError::LoginItem(format!("cannot resolve executable: {}", e)))?;

    let (name, _) = render_entry(&exe);
    if register_in(&dir, &exe)? {
        Ok(Some(dir.join(name)))
    } else {
        Ok(None)
    }
}
