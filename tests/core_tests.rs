use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use rworkday::config::{Config, GeofenceConfig};
use rworkday::core::calculator::distance::haversine_meters;
use rworkday::core::calculator::milestones::{self, Phase};
use rworkday::core::calculator::schedule::next_fire;
use rworkday::core::geofence::{Decision, GeofenceDetector};
use rworkday::core::login;
use rworkday::core::reminder::{ReminderChanges, ReminderLogic, ReminderStore};
use rworkday::core::settings::SettingsLogic;
use rworkday::db::notifications;
use rworkday::db::pool::DbPool;
use rworkday::db::settings::{self, keys};
use rworkday::models::coordinate::Coordinate;
use rworkday::models::entry::EntryTime;
use rworkday::models::reminder::{Reminder, Trigger};
use rworkday::models::workdays::Workdays;
use rworkday::utils::date::parse_local_datetime;
use rworkday::utils::time::parse_duration_minutes;
use std::env;
use std::fs;

fn ts(s: &str) -> DateTime<Local> {
    parse_local_datetime(s).expect("valid local datetime")
}

fn hm(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}

#[test]
fn test_launch_at_login_is_opt_in() {
    assert!(!Config::default().launch_at_login);
}

fn test_config() -> Config {
    Config {
        launch_at_login: false,
        ..Config::default()
    }
}

// ---------------------------------------------------------------
// durations, workdays, distance
// ---------------------------------------------------------------

#[test]
fn test_parse_duration_forms() {
    assert_eq!(parse_duration_minutes("9h").unwrap(), 540);
    assert_eq!(parse_duration_minutes("8h30m").unwrap(), 510);
    assert_eq!(parse_duration_minutes("8h 30m").unwrap(), 510);
    assert_eq!(parse_duration_minutes("45m").unwrap(), 45);
    assert_eq!(parse_duration_minutes("8.5").unwrap(), 510);
    assert_eq!(parse_duration_minutes("07:45").unwrap(), 465);

    assert!(parse_duration_minutes("").is_err());
    assert!(parse_duration_minutes("0").is_err());
    assert!(parse_duration_minutes("-2h").is_err());
    assert!(parse_duration_minutes("8:75").is_err());
    assert!(parse_duration_minutes("eight").is_err());
}

#[test]
fn test_parse_duration_is_capped_at_one_day() {
    assert_eq!(parse_duration_minutes("24h").unwrap(), 1440);
    assert_eq!(parse_duration_minutes("24:00").unwrap(), 1440);

    assert!(parse_duration_minutes("24h1m").is_err());
    assert!(parse_duration_minutes("25h").is_err());
    assert!(parse_duration_minutes("99999999999h").is_err());
    assert!(parse_duration_minutes("9999999999999999999:00").is_err());
    assert!(parse_duration_minutes("1e300").is_err());
    assert!(parse_duration_minutes("inf").is_err());
}

#[test]
fn test_workdays_parse_and_storage() {
    let days = Workdays::parse("mon-wed, fri").unwrap();
    assert_eq!(days.to_db_str(), "1,2,3,5");
    assert_eq!(days.describe(), "Mo Tu We Fr");
    assert!(days.contains(chrono::Weekday::Fri));
    assert!(!days.contains(chrono::Weekday::Thu));

    assert_eq!(Workdays::from_db_str("1,2,3,5"), Some(days));
    assert_eq!(Workdays::from_db_str("9,0"), None);
    assert!(Workdays::parse("").is_err());
    assert!(Workdays::parse("funday").is_err());
    assert_eq!(Workdays::default().describe(), "Mo Tu We Th Fr");
}

#[test]
fn test_haversine_one_degree_of_latitude() {
    let a = Coordinate::new(45.0, 9.0).unwrap();
    let b = Coordinate::new(46.0, 9.0).unwrap();
    let d = haversine_meters(&a, &b);
    assert!((d - 111_195.0).abs() < 100.0, "distance was {}", d);
    assert_eq!(haversine_meters(&a, &a), 0.0);
}

#[test]
fn test_coordinate_validation() {
    assert!(Coordinate::new(90.0, 180.0).is_ok());
    assert!(Coordinate::new(90.1, 0.0).is_err());
    assert!(Coordinate::new(0.0, -180.5).is_err());
    assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    assert!(Coordinate::parse("45.1, 9.2").is_ok());
    assert!(Coordinate::parse("45.1").is_err());
}

// ---------------------------------------------------------------
// milestones
// ---------------------------------------------------------------

#[test]
fn test_milestones_while_working() {
    let entry = EntryTime::new(ts("2026-10-19 09:00"));
    let m = milestones::compute(&entry, 540, 480, &ts("2026-10-19 12:00")).unwrap();

    assert_eq!(m.end_time, ts("2026-10-19 18:00"));
    assert_eq!(m.safe_exit_time, ts("2026-10-19 17:00"));
    assert_eq!(m.worked, 180);
    assert_eq!(m.remaining, 360);
    assert_eq!(m.until_safe_exit, 300);
    assert_eq!(m.overtime, 0);
    assert_eq!(m.progress, 33);
    assert_eq!(m.phase, Phase::Working);
}

#[test]
fn test_milestones_clamp_at_zero() {
    let entry = EntryTime::new(ts("2026-10-19 09:00"));

    let before = milestones::compute(&entry, 540, 480, &ts("2026-10-19 08:00")).unwrap();
    assert_eq!(before.worked, 0);
    assert_eq!(before.remaining, 540);
    assert_eq!(before.phase, Phase::Upcoming);

    let after = milestones::compute(&entry, 540, 480, &ts("2026-10-19 19:30")).unwrap();
    assert_eq!(after.remaining, 0);
    assert_eq!(after.until_safe_exit, 0);
    assert_eq!(after.overtime, 90);
    assert_eq!(after.progress, 100);
    assert_eq!(after.phase, Phase::Done);

    let safe = milestones::compute(&entry, 540, 480, &ts("2026-10-19 17:00")).unwrap();
    assert_eq!(safe.phase, Phase::SafeToLeave);
}

#[test]
fn test_safe_exit_after_end_is_allowed() {
    let entry = EntryTime::new(ts("2026-10-19 09:00"));
    let m = milestones::compute(&entry, 480, 540, &ts("2026-10-19 17:30")).unwrap();
    assert_eq!(m.end_time, ts("2026-10-19 17:00"));
    assert_eq!(m.safe_exit_time, ts("2026-10-19 18:00"));
    assert_eq!(m.phase, Phase::Done);
}

#[test]
fn test_milestones_out_of_range_is_an_error() {
    let entry = EntryTime::new(ts("2026-10-19 09:00"));
    let now = ts("2026-10-19 10:00");

    assert!(milestones::compute(&entry, i64::MAX, 480, &now).is_err());
    assert!(milestones::compute(&entry, 540, 60_000_000_000_000, &now).is_err());
}

#[test]
fn test_stored_durations_out_of_range_fall_back_to_defaults() {
    let pool = DbPool::in_memory().unwrap();
    let cfg = test_config();
    settings::set_i64(&pool.conn, keys::OFFICE_DURATION, 5_999_999_999_940).unwrap();
    settings::set_i64(&pool.conn, keys::SAFE_EXIT, 450).unwrap();

    let loaded = SettingsLogic::load(&pool, &cfg).unwrap();
    assert_eq!(loaded.office_duration, 540);
    assert!(!loaded.office_duration_overridden);
    assert_eq!(loaded.safe_exit_offset, 450);
    assert!(loaded.safe_exit_overridden);
}

// ---------------------------------------------------------------
// reminder schedule
// ---------------------------------------------------------------

fn reminder(trigger: Trigger, created: &str) -> Reminder {
    Reminder::new("Test", trigger, None, false, false, ts(created)).unwrap()
}

#[test]
fn test_at_time_today_or_tomorrow() {
    let r = reminder(Trigger::AtTime { time: hm("15:00") }, "2026-10-19 10:00");
    let now = ts("2026-10-19 10:00");
    assert_eq!(next_fire(&r, &now, None), Some(ts("2026-10-19 15:00")));

    let late = ts("2026-10-19 16:00");
    assert_eq!(next_fire(&r, &late, None), Some(ts("2026-10-20 15:00")));
}

#[test]
fn test_at_time_weekdays_skips_to_monday() {
    let mut r = reminder(Trigger::AtTime { time: hm("09:00") }, "2026-10-23 08:00");
    r.repeat_weekdays = true;

    let friday_evening = ts("2026-10-23 18:00");
    assert_eq!(
        next_fire(&r, &friday_evening, None),
        Some(ts("2026-10-26 09:00"))
    );
}

#[test]
fn test_dated_at_time() {
    let mut r = reminder(Trigger::AtTime { time: hm("14:00") }, "2026-10-19 10:00");
    r.date = NaiveDate::from_ymd_opt(2026, 10, 21);

    assert_eq!(
        next_fire(&r, &ts("2026-10-19 10:00"), None),
        Some(ts("2026-10-21 14:00"))
    );
    assert_eq!(next_fire(&r, &ts("2026-10-21 14:00"), None), None);
}

#[test]
fn test_interval_one_shot_and_repeating() {
    let r = reminder(Trigger::AfterInterval { minutes: 90 }, "2026-10-19 10:00");
    assert_eq!(
        next_fire(&r, &ts("2026-10-19 10:00"), None),
        Some(ts("2026-10-19 11:30"))
    );
    assert_eq!(next_fire(&r, &ts("2026-10-19 12:00"), None), None);

    let mut fired = r.clone();
    fired.last_fired = Some(ts("2026-10-19 11:30"));
    assert_eq!(next_fire(&fired, &ts("2026-10-19 11:31"), None), None);

    let mut repeating = r.clone();
    repeating.repeat_weekdays = true;
    repeating.last_fired = Some(ts("2026-10-19 11:30"));
    assert_eq!(
        next_fire(&repeating, &ts("2026-10-19 11:30"), None),
        Some(ts("2026-10-19 13:00"))
    );
}

#[test]
fn test_entry_relative_needs_the_day() {
    let after = reminder(Trigger::AfterEntry { minutes: 60 }, "2026-10-19 07:00");
    let before = reminder(Trigger::BeforeEnd { minutes: 15 }, "2026-10-19 07:00");
    let now = ts("2026-10-19 09:30");

    assert_eq!(next_fire(&after, &now, None), None);

    let entry = EntryTime::new(ts("2026-10-19 09:00"));
    let day = milestones::compute(&entry, 540, 480, &now).unwrap();

    assert_eq!(next_fire(&after, &now, Some(&day)), Some(ts("2026-10-19 10:00")));
    assert_eq!(next_fire(&before, &now, Some(&day)), Some(ts("2026-10-19 17:45")));

    let mut fired = after.clone();
    fired.last_fired = Some(ts("2026-10-19 10:00"));
    assert_eq!(next_fire(&fired, &now, Some(&day)), None);
}

#[test]
fn test_clamp_to_work_hours() {
    let now = ts("2026-10-19 09:30");
    let entry = EntryTime::new(ts("2026-10-19 09:00"));
    let day = milestones::compute(&entry, 540, 480, &now).unwrap();

    let mut late = reminder(Trigger::AfterEntry { minutes: 600 }, "2026-10-19 07:00");
    assert_eq!(next_fire(&late, &now, Some(&day)), Some(ts("2026-10-19 19:00")));
    late.clamp_to_work_hours = true;
    assert_eq!(next_fire(&late, &now, Some(&day)), Some(ts("2026-10-19 18:00")));

    // another day is left alone
    let mut tomorrow = reminder(Trigger::AtTime { time: hm("07:00") }, "2026-10-19 07:00");
    tomorrow.clamp_to_work_hours = true;
    assert_eq!(
        next_fire(&tomorrow, &now, Some(&day)),
        Some(ts("2026-10-20 07:00"))
    );
}

#[test]
fn test_reminder_validation() {
    let now = ts("2026-10-19 10:00");
    assert!(Reminder::new(" ", Trigger::AfterInterval { minutes: 5 }, None, false, false, now).is_err());
    assert!(Reminder::new("x", Trigger::AfterInterval { minutes: 0 }, None, false, false, now).is_err());
    assert!(Reminder::new("x", Trigger::BeforeEnd { minutes: -5 }, None, false, false, now).is_err());

    let date = NaiveDate::from_ymd_opt(2026, 10, 21);
    assert!(Reminder::new("x", Trigger::AfterEntry { minutes: 5 }, date, false, false, now).is_err());
    assert!(Reminder::new("x", Trigger::AtTime { time: hm("09:00") }, date, true, false, now).is_err());
    assert!(Reminder::new("x", Trigger::AtTime { time: hm("09:00") }, date, false, false, now).is_ok());
}

#[test]
fn test_reminder_minutes_are_capped_at_one_week() {
    let now = ts("2026-10-19 10:00");
    let week = 7 * 24 * 60;

    assert!(Reminder::new("x", Trigger::AfterInterval { minutes: week }, None, false, false, now).is_ok());
    assert!(Reminder::new("x", Trigger::AfterInterval { minutes: week + 1 }, None, false, false, now).is_err());
    assert!(Reminder::new("x", Trigger::AfterEntry { minutes: 1_000_000_000_000 }, None, false, false, now).is_err());
    assert!(Reminder::new("x", Trigger::BeforeEnd { minutes: week + 1 }, None, false, false, now).is_err());
}

#[test]
fn test_unreachable_fire_times_schedule_nothing() {
    let now = ts("2026-10-19 10:00");
    let entry = EntryTime::new(ts("2026-10-19 09:00"));
    let day = milestones::compute(&entry, 540, 480, &now).unwrap();

    // stored before the bounds existed
    let mut interval = reminder(Trigger::AfterInterval { minutes: 5 }, "2026-10-19 09:00");
    interval.trigger = Trigger::AfterInterval { minutes: 1_000_000_000_000 };
    assert_eq!(next_fire(&interval, &now, None), None);
    interval.repeat_weekdays = true;
    assert_eq!(next_fire(&interval, &now, None), None);

    let mut after = reminder(Trigger::AfterEntry { minutes: 5 }, "2026-10-19 09:00");
    after.trigger = Trigger::AfterEntry { minutes: i64::MAX };
    assert_eq!(next_fire(&after, &now, Some(&day)), None);

    let mut before = reminder(Trigger::BeforeEnd { minutes: 5 }, "2026-10-19 09:00");
    before.trigger = Trigger::BeforeEnd { minutes: i64::MAX };
    assert_eq!(next_fire(&before, &now, Some(&day)), None);
}

// ---------------------------------------------------------------
// geofence detector
// ---------------------------------------------------------------

fn detector(dwell_seconds: i64) -> GeofenceDetector {
    GeofenceDetector::from_config(&GeofenceConfig {
        enabled: true,
        latitude: 45.4642,
        longitude: 9.19,
        radius_meters: 150.0,
        dwell_seconds,
    })
    .unwrap()
}

#[test]
fn test_geofence_dwell_transitions() {
    let d = detector(300);
    let inside = Coordinate::new(45.4645, 9.1902).unwrap();
    let outside = Coordinate::new(45.48, 9.19).unwrap();

    let t0 = ts("2026-10-19 08:50");
    assert!(matches!(d.evaluate(&inside, &t0, None), Decision::Start { .. }));

    match d.evaluate(&inside, &ts("2026-10-19 08:52"), Some(t0)) {
        Decision::Wait { remaining_secs, .. } => assert_eq!(remaining_secs, 180),
        other => panic!("unexpected {:?}", other),
    }

    match d.evaluate(&inside, &ts("2026-10-19 08:55"), Some(t0)) {
        Decision::Confirm { since, .. } => assert_eq!(since, t0),
        other => panic!("unexpected {:?}", other),
    }

    assert!(matches!(
        d.evaluate(&outside, &ts("2026-10-19 08:52"), Some(t0)),
        Decision::Outside { .. }
    ));
}

#[test]
fn test_geofence_without_dwell_confirms_immediately() {
    let d = detector(0);
    let inside = Coordinate::new(45.4642, 9.19).unwrap();
    let now = ts("2026-10-19 08:50");

    match d.evaluate(&inside, &now, None) {
        Decision::Confirm { since, distance } => {
            assert_eq!(since, now);
            assert!(distance < 1.0);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_geofence_rejects_invalid_center() {
    let cfg = GeofenceConfig {
        latitude: 120.0,
        ..GeofenceConfig::default()
    };
    assert!(GeofenceDetector::from_config(&cfg).is_err());
}

// ---------------------------------------------------------------
// reminder store and logic
// ---------------------------------------------------------------

#[test]
fn test_reminder_add_edit_delete_in_memory() {
    let pool = DbPool::in_memory().unwrap();
    let cfg = test_config();
    let now = ts("2026-10-19 10:00");

    let r = reminder(Trigger::AtTime { time: hm("12:00") }, "2026-10-19 10:00");
    let id = r.id.clone();
    ReminderLogic::add(&pool, &cfg, r.clone(), &now).unwrap();

    assert!(ReminderLogic::add(&pool, &cfg, r, &now).is_err());
    assert_eq!(ReminderLogic::list(&pool).unwrap().len(), 1);

    let pending = notifications::get(&pool.conn, &id).unwrap().unwrap();
    assert_eq!(pending.fire_at, ts("2026-10-19 12:00"));

    let changes = ReminderChanges {
        title: Some("Lunch".into()),
        trigger: Some(Trigger::AtTime { time: hm("12:45") }),
        ..ReminderChanges::default()
    };
    let edited = ReminderLogic::edit(&pool, &cfg, &id[..6], changes, &ts("2026-10-19 10:05")).unwrap();
    assert_eq!(edited.title, "Lunch");
    assert_eq!(edited.created_at, ts("2026-10-19 10:05"));

    let pending = notifications::get(&pool.conn, &id).unwrap().unwrap();
    assert_eq!(pending.fire_at, ts("2026-10-19 12:45"));
    assert_eq!(pending.title, "Lunch");

    let removed = ReminderLogic::delete(&pool, &id).unwrap();
    assert_eq!(removed.id, id);
    assert!(notifications::get(&pool.conn, &id).unwrap().is_none());
    assert!(ReminderLogic::find(&pool, &id).is_err());
}

#[test]
fn test_undecodable_reminders_read_as_empty() {
    let pool = DbPool::in_memory().unwrap();
    settings::set(&pool.conn, keys::REMINDERS, "{not json").unwrap();

    assert!(ReminderStore::load(&pool).unwrap().is_empty());
}

// ---------------------------------------------------------------
// login item
// ---------------------------------------------------------------

#[test]
fn test_login_item_registration_is_idempotent() {
    let mut dir = env::temp_dir();
    dir.push("rworkday_login_item_test");
    fs::remove_dir_all(&dir).ok();

    let exe = std::path::Path::new("/usr/local/bin/rworkday");
    assert!(login::register_in(&dir, exe).unwrap());
    assert!(!login::register_in(&dir, exe).unwrap());

    let (name, contents) = login::render_entry(exe);
    let written = fs::read_to_string(dir.join(name)).unwrap();
    assert_eq!(written, contents);
    assert!(written.contains("notify"));
    assert!(written.contains("/usr/local/bin/rworkday"));

    fs::remove_dir_all(&dir).ok();
}
