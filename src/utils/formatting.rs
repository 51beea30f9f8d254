//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        // e.g. +02:25 or -01:10
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        // e.g. +02h 25m or -01h 10m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Text progress bar, e.g. `[██████░░░░] 60%`.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let pct = percent.min(100) as usize;
    let filled = pct * width / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        pct
    )
}

/// First `n` characters of a string, used for short identifiers.
pub fn short(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
