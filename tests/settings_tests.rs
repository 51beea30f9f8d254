use predicates::str::contains;

mod common;
use common::{no_config, rwd_at, setup_test_db};

#[test]
fn test_settings_show_defaults() {
    let db_path = setup_test_db("settings_defaults");
    let cfg = no_config("settings_defaults");

    rwd_at(&db_path, &cfg, "09:00")
        .arg("settings")
        .assert()
        .success()
        .stdout(contains("09h 00m (default)"))
        .stdout(contains("08h 00m (default)"))
        .stdout(contains("remaining"))
        .stdout(contains("Mo Tu We Th Fr"));
}

#[test]
fn test_settings_change_durations_moves_milestones() {
    let db_path = setup_test_db("settings_durations");
    let cfg = no_config("settings_durations");

    rwd_at(&db_path, &cfg, "09:00")
        .args(["settings", "--office-duration", "8h30m", "--safe-exit", "7.5"])
        .assert()
        .success()
        .stdout(contains("Office duration set to 08h 30m"))
        .stdout(contains("Safe-exit offset set to 07h 30m"));

    rwd_at(&db_path, &cfg, "09:00")
        .args(["entry", "09:00"])
        .assert()
        .success()
        .stdout(contains("Safe exit at 16:30, end of day at 17:30"));
}

#[test]
fn test_settings_display_mode_changes_title() {
    let db_path = setup_test_db("settings_display");
    let cfg = no_config("settings_display");

    rwd_at(&db_path, &cfg, "09:00")
        .args(["entry", "09:00"])
        .assert()
        .success();

    rwd_at(&db_path, &cfg, "10:00")
        .args(["settings", "--display", "end"])
        .assert()
        .success()
        .stdout(contains("Display mode set to end"));

    rwd_at(&db_path, &cfg, "10:00")
        .args(["status", "--title"])
        .assert()
        .success()
        .stdout(contains("🏁 18:00"));

    rwd_at(&db_path, &cfg, "10:00")
        .args(["settings", "--display", "safe-exit"])
        .assert()
        .success();

    rwd_at(&db_path, &cfg, "10:00")
        .args(["status", "--title"])
        .assert()
        .success()
        .stdout(contains("🚪 17:00"));

    rwd_at(&db_path, &cfg, "10:15")
        .args(["settings", "--display", "worked"])
        .assert()
        .success();

    rwd_at(&db_path, &cfg, "10:15")
        .args(["status", "--title"])
        .assert()
        .success()
        .stdout(contains("💼 01:15"));
}

#[test]
fn test_settings_reset_restores_defaults() {
    let db_path = setup_test_db("settings_reset");
    let cfg = no_config("settings_reset");

    rwd_at(&db_path, &cfg, "09:00")
        .args(["settings", "--office-duration", "7h", "--workdays", "mon,wed,fri"])
        .assert()
        .success()
        .stdout(contains("Workdays set to Mo We Fr"));

    rwd_at(&db_path, &cfg, "09:00")
        .args(["settings", "--reset"])
        .assert()
        .success()
        .stdout(contains("Settings reset"))
        .stdout(contains("09h 00m (default)"))
        .stdout(contains("Mo Tu We Th Fr"));
}

#[test]
fn test_settings_reject_invalid_values() {
    let db_path = setup_test_db("settings_invalid");
    let cfg = no_config("settings_invalid");

    rwd_at(&db_path, &cfg, "09:00")
        .args(["settings", "--display", "percent"])
        .assert()
        .failure()
        .stderr(contains("Invalid display mode"));

    rwd_at(&db_path, &cfg, "09:00")
        .args(["settings", "--office-duration", "0h"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));

    rwd_at(&db_path, &cfg, "09:00")
        .args(["settings", "--workdays", "fri-mon"])
        .assert()
        .failure()
        .stderr(contains("Invalid weekday"));
}

#[test]
fn test_status_marks_day_off() {
    let db_path = setup_test_db("settings_day_off");
    let cfg = no_config("settings_day_off");

    rwd_at(&db_path, &cfg, "09:00")
        .args(["settings", "--workdays", "tue-fri"])
        .assert()
        .success();

    rwd_at(&db_path, &cfg, "09:00")
        .args(["entry", "09:00"])
        .assert()
        .success();

    rwd_at(&db_path, &cfg, "10:00")
        .arg("status")
        .assert()
        .success()
        .stdout(contains("today is a day off"));
}

#[test]
fn test_settings_reject_durations_longer_than_a_day() {
    let db_path = setup_test_db("settings_huge");
    let cfg = no_config("settings_huge");

    rwd_at(&db_path, &cfg, "09:00")
        .args(["entry", "09:00"])
        .assert()
        .success();

    rwd_at(&db_path, &cfg, "09:05")
        .args(["settings", "--office-duration", "99999999999h"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));

    rwd_at(&db_path, &cfg, "09:05")
        .args(["settings", "--safe-exit", "25h"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));

    rwd_at(&db_path, &cfg, "09:10")
        .arg("status")
        .assert()
        .success()
        .stdout(contains("17:00"))
        .stdout(contains("18:00"));
}
