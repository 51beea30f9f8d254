use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::geofence::{GeofenceLogic, GeofenceOutcome};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::coordinate::Coordinate;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_local_datetime;
use chrono::{DateTime, Local};
use std::io::{self, BufRead};

/// One feed line: `lat,lon` or `lat,lon,YYYY-MM-DD HH:MM`.
fn parse_feed_line(line: &str, now: &DateTime<Local>) -> AppResult<(Coordinate, DateTime<Local>)> {
    let mut parts = line.splitn(3, ',');
    let (Some(lat), Some(lon)) = (parts.next(), parts.next()) else {
        return Err(AppError::InvalidCoordinate(line.to_string()));
    };

    let pos = Coordinate::parse(&format!("{},{}", lat, lon))?;
    let at = match parts.next() {
        Some(ts) => parse_local_datetime(ts).ok_or_else(|| AppError::InvalidDate(ts.to_string()))?,
        None => *now,
    };

    Ok((pos, at))
}

fn report(outcome: &GeofenceOutcome) {
    match outcome {
        GeofenceOutcome::Disabled => {
            info("Geofence is disabled (set geofence.enabled in the configuration).")
        }
        GeofenceOutcome::AlreadyRecorded(entry) => {
            info(format!("Entry time already recorded at {}.", entry.clock()))
        }
        GeofenceOutcome::Outside {
            distance,
            cancelled,
        } => {
            if *cancelled {
                warning(format!(
                    "Left the office area ({:.0} m away); arrival detection cancelled.",
                    distance
                ));
            } else {
                info(format!("Outside the office area ({:.0} m away).", distance));
            }
        }
        GeofenceOutcome::DwellStarted { distance } => info(format!(
            "Inside the office area ({:.0} m); confirming arrival…",
            distance
        )),
        GeofenceOutcome::Dwelling {
            distance,
            remaining_secs,
        } => info(format!(
            "Inside the office area ({:.0} m); arrival confirmed in {} s.",
            distance, remaining_secs
        )),
        GeofenceOutcome::Arrived(entry) => {
            success(format!("Arrival detected: entry time set to {}", entry.clock()))
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, now: &DateTime<Local>) -> AppResult<()> {
    if let Commands::Locate { lat, lon, feed } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if *feed {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let (pos, at) = parse_feed_line(line, now)?;
                let outcome = GeofenceLogic::on_location(&pool, cfg, &pos, &at)?;
                report(&outcome);
            }
            return Ok(());
        }

        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(AppError::InvalidCoordinate(
                "use --lat and --lon, or --feed".into(),
            ));
        };

        let pos = Coordinate::new(*lat, *lon)?;
        let outcome = GeofenceLogic::on_location(&pool, cfg, &pos, now)?;
        report(&outcome);
    }

    Ok(())
}
