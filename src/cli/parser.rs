use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rWorkday
/// CLI application to track the work-day entry time with SQLite
#[derive(Parser)]
#[command(
    name = "rworkday",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track your work-day entry time, safe-exit and end-of-day milestones, office arrival and reminders",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override configuration file path
    #[arg(global = true, long = "config-file", value_name = "FILE")]
    pub config_file: Option<String>,

    /// Run in test mode (no config file update, no login item)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend the current time is this one (YYYY-MM-DD HH:MM)
    #[arg(global = true, long = "at", hide = true, value_name = "DATETIME")]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record today's entry time (now, or HH:MM)
    Entry {
        /// Entry time (HH:MM); defaults to now
        time: Option<String>,

        #[arg(long = "clear", conflicts_with = "time", help = "Forget today's entry time")]
        clear: bool,
    },

    /// Show entry time, worked/remaining time, safe-exit and end time
    Status {
        #[arg(long = "title", help = "Print only the compact one-line title")]
        title: bool,
    },

    /// View or change durations, display mode and workdays
    Settings {
        #[arg(long = "office-duration", value_name = "DURATION", help = "Office duration (e.g. 9h, 8h30m, 8.5)")]
        office_duration: Option<String>,

        #[arg(long = "safe-exit", value_name = "DURATION", help = "Safe-exit offset from entry (e.g. 8h)")]
        safe_exit: Option<String>,

        #[arg(long = "display", value_name = "MODE", help = "Title shows: remaining, end, safe-exit, worked")]
        display: Option<String>,

        #[arg(long = "workdays", value_name = "DAYS", help = "Working days (e.g. mon-fri, mon,wed,fri)")]
        workdays: Option<String>,

        #[arg(long = "reset", help = "Drop all overrides and use the configuration defaults")]
        reset: bool,
    },

    /// Manage reminders
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },

    /// Feed a location update to the office geofence
    Locate {
        #[arg(long = "lat", allow_hyphen_values = true, requires = "lon", conflicts_with = "feed")]
        lat: Option<f64>,

        #[arg(long = "lon", allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        #[arg(long = "feed", help = "Read `lat,lon` lines from stdin")]
        feed: bool,
    },

    /// Deliver due notifications
    Notify {
        #[arg(long = "list", help = "List pending notifications instead of delivering")]
        list: bool,
    },
}

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Create a reminder
    Add {
        #[arg(long = "title")]
        title: String,

        #[command(flatten)]
        trigger: TriggerArgs,

        #[command(flatten)]
        flags: ReminderFlags,
    },

    /// Change an existing reminder
    Edit {
        /// Reminder id (or a unique prefix of at least 4 characters)
        id: String,

        #[arg(long = "title")]
        title: Option<String>,

        #[command(flatten)]
        trigger: TriggerArgs,

        #[command(flatten)]
        flags: ReminderFlags,

        #[arg(long = "no-date", conflicts_with = "date", help = "Remove the absolute date")]
        no_date: bool,

        #[arg(long = "no-weekdays", conflicts_with = "weekdays")]
        no_weekdays: bool,

        #[arg(long = "no-clamp", conflicts_with = "clamp")]
        no_clamp: bool,
    },

    /// Delete a reminder
    Del {
        /// Reminder id (or a unique prefix of at least 4 characters)
        id: String,
    },

    /// List reminders with their next fire time
    List,
}

/// Exactly one trigger kind.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct TriggerArgs {
    #[arg(long = "at-time", value_name = "HH:MM", help = "Fire at a fixed time")]
    pub at_time: Option<String>,

    #[arg(long = "after", value_name = "MINUTES", help = "Fire N minutes from now")]
    pub after: Option<i64>,

    #[arg(long = "after-entry", value_name = "MINUTES", help = "Fire N minutes after the entry time")]
    pub after_entry: Option<i64>,

    #[arg(long = "before-end", value_name = "MINUTES", help = "Fire N minutes before the end time")]
    pub before_end: Option<i64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReminderFlags {
    #[arg(long = "date", value_name = "YYYY-MM-DD", help = "Absolute date (with --at-time)")]
    pub date: Option<String>,

    #[arg(long = "weekdays", help = "Repeat every weekday (Mon–Fri)")]
    pub weekdays: bool,

    #[arg(long = "clamp", help = "Keep the fire time within working hours")]
    pub clamp: bool,
}
