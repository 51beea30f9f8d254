use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{migrate_config_fields, missing_fields};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::path::Path;
use std::process::Command;

fn edit_file(path: &Path, editor: &Option<String>) {
    // Default editor based on the platform
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    // --editor wins over $EDITOR/$VISUAL
    let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{}'",
                editor_to_use
            ));
        }
        Ok(_) | Err(_) => {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            ));

            match Command::new(&default_editor).arg(path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using fallback '{}'",
                        default_editor
                    ));
                }
                Ok(_) | Err(_) => {
                    error(format!(
                        "Failed to edit configuration file using fallback '{}'",
                        default_editor
                    ));
                }
            }
        }
    }
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", cfg.to_yaml()?);
        }

        if *check {
            if !path.exists() {
                info(format!(
                    "No configuration file at {}; defaults are in use.",
                    path.display()
                ));
            } else {
                let missing = missing_fields(path)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!(
                        "Missing fields: {} (run `rworkday config --migrate`)",
                        missing.join(", ")
                    ));
                }
            }
        }

        if *migrate {
            let pool = DbPool::new(&cfg.database)?;
            let added = migrate_config_fields(&pool.conn, path)?;
            if added.is_empty() {
                info("Configuration file already up to date.");
            }
        }

        if *edit_config {
            edit_file(path, editor);
        }
    }

    Ok(())
}
