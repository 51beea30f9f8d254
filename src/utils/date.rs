use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse `YYYY-MM-DD HH:MM` (or `YYYY-MM-DDTHH:MM`) as a local timestamp.
pub fn parse_local_datetime(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()?;
    to_local(naive)
}

/// Resolve a naive local date-time. Ambiguous times (DST fall-back) take the
/// earliest instant, and times inside a DST gap are pushed forward one hour.
pub fn to_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()
        })
}

pub fn at(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    to_local(date.and_time(time))
}

pub fn from_epoch_seconds(secs: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(secs, 0).single()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The same date if it is a weekday, otherwise the following Monday.
pub fn next_weekday_from(date: NaiveDate) -> NaiveDate {
    let mut d = date;
    while is_weekend(d) {
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    d
}

/// Format a timestamp as HH:MM, adding `(+N)` when it falls N days after `base`.
pub fn format_clock(ts: &DateTime<Local>, base: NaiveDate) -> String {
    let days = (ts.date_naive() - base).num_days();
    if days == 0 {
        ts.format("%H:%M").to_string()
    } else if days > 0 {
        format!("{} (+{})", ts.format("%H:%M"), days)
    } else {
        format!("{} ({})", ts.format("%H:%M"), days)
    }
}
