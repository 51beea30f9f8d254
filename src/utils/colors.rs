/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Grey placeholder for values that cannot be computed yet
/// (e.g. `--:--` when no entry time is recorded).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "00h 00m" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Overtime color:
/// \>0 → green
/// 0 → reset
pub fn color_for_overtime(value: i64) -> &'static str {
    if value > 0 { GREEN } else { RESET }
}

/// Remaining time color: red while far from the end, yellow inside the last
/// hour, green once nothing is left.
pub fn color_for_remaining(minutes: i64) -> &'static str {
    if minutes <= 0 {
        GREEN
    } else if minutes <= 60 {
        YELLOW
    } else {
        RED
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
