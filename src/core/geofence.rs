//! Office arrival detection: distance threshold plus dwell confirmation.

use crate::config::{Config, GeofenceConfig};
use crate::core::calculator::distance::haversine_meters;
use crate::core::entry::EntryLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings::{self, keys};
use crate::errors::AppResult;
use crate::models::coordinate::Coordinate;
use crate::models::entry::{EntrySource, EntryTime};
use crate::utils::date::from_epoch_seconds;
use chrono::{DateTime, Local, TimeDelta};

/// What a single location update means for the dwell state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Outside the radius; any pending dwell is cancelled.
    Outside { distance: f64 },
    /// First update inside the radius; dwell starts now.
    Start { distance: f64 },
    /// Still inside, dwell not yet elapsed.
    Wait {
        distance: f64,
        since: DateTime<Local>,
        remaining_secs: i64,
    },
    /// Dwell elapsed: arrival is confirmed at `since`.
    Confirm {
        distance: f64,
        since: DateTime<Local>,
    },
}

/// Result of processing one location update.
#[derive(Debug, Clone, PartialEq)]
pub enum GeofenceOutcome {
    Disabled,
    AlreadyRecorded(EntryTime),
    Outside { distance: f64, cancelled: bool },
    DwellStarted { distance: f64 },
    Dwelling { distance: f64, remaining_secs: i64 },
    Arrived(EntryTime),
}

#[derive(Debug, Clone, Copy)]
pub struct GeofenceDetector {
    pub center: Coordinate,
    pub radius_meters: f64,
    pub dwell_seconds: i64,
}

impl GeofenceDetector {
    pub fn from_config(cfg: &GeofenceConfig) -> AppResult<Self> {
        Ok(Self {
            center: Coordinate::new(cfg.latitude, cfg.longitude)?,
            radius_meters: cfg.radius_meters.max(0.0),
            dwell_seconds: cfg.dwell_seconds.max(0),
        })
    }

    pub fn distance_to(&self, pos: &Coordinate) -> f64 {
        haversine_meters(&self.center, pos)
    }

    pub fn contains(&self, pos: &Coordinate) -> bool {
        self.distance_to(pos) <= self.radius_meters
    }

    /// Pure dwell state transition for one update.
    pub fn evaluate(
        &self,
        pos: &Coordinate,
        now: &DateTime<Local>,
        pending_since: Option<DateTime<Local>>,
    ) -> Decision {
        let distance = self.distance_to(pos);

        if distance > self.radius_meters {
            return Decision::Outside { distance };
        }

        let since = match pending_since {
            Some(s) if s <= *now => s,
            _ if self.dwell_seconds == 0 => {
                return Decision::Confirm {
                    distance,
                    since: *now,
                };
            }
            _ => return Decision::Start { distance },
        };

        let confirm_at = TimeDelta::try_seconds(self.dwell_seconds)
            .and_then(|d| since.checked_add_signed(d));
        let Some(confirm_at) = confirm_at else {
            // A dwell that cannot end keeps waiting.
            return Decision::Wait {
                distance,
                since,
                remaining_secs: self.dwell_seconds,
            };
        };
        if *now >= confirm_at {
            Decision::Confirm { distance, since }
        } else {
            Decision::Wait {
                distance,
                since,
                remaining_secs: (confirm_at - *now).num_seconds(),
            }
        }
    }
}

pub struct GeofenceLogic;

impl GeofenceLogic {
    /// Pending dwell start, dropped when it is not from today.
    fn pending_since(pool: &DbPool, now: &DateTime<Local>) -> AppResult<Option<DateTime<Local>>> {
        let pending = settings::get_i64(&pool.conn, keys::GEOFENCE_PENDING_SINCE)?
            .and_then(from_epoch_seconds);

        match pending {
            Some(ts) if ts.date_naive() == now.date_naive() => Ok(Some(ts)),
            Some(_) => {
                Self::cancel_pending(pool)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn cancel_pending(pool: &DbPool) -> AppResult<bool> {
        let existed = settings::get(&pool.conn, keys::GEOFENCE_PENDING_SINCE)?.is_some();
        settings::remove(&pool.conn, keys::GEOFENCE_PENDING_SINCE)?;
        Ok(existed)
    }

    /// Process one location update.
    pub fn on_location(
        pool: &DbPool,
        cfg: &Config,
        pos: &Coordinate,
        now: &DateTime<Local>,
    ) -> AppResult<GeofenceOutcome> {
        if !cfg.geofence.enabled {
            return Ok(GeofenceOutcome::Disabled);
        }

        if let Some(entry) = EntryLogic::load(pool, now)? {
            Self::cancel_pending(pool)?;
            return Ok(GeofenceOutcome::AlreadyRecorded(entry));
        }

        let detector = GeofenceDetector::from_config(&cfg.geofence)?;
        let pending = Self::pending_since(pool, now)?;

        match detector.evaluate(pos, now, pending) {
            Decision::Outside { distance } => {
                let cancelled = Self::cancel_pending(pool)?;
                if cancelled {
                    ttlog(
                        &pool.conn,
                        "geofence",
                        "cancel",
                        &format!("Left the office area ({:.0} m) before dwell elapsed", distance),
                    )?;
                }
                Ok(GeofenceOutcome::Outside {
                    distance,
                    cancelled,
                })
            }
            Decision::Start { distance } => {
                settings::set_i64(&pool.conn, keys::GEOFENCE_PENDING_SINCE, now.timestamp())?;
                ttlog(
                    &pool.conn,
                    "geofence",
                    "dwell",
                    &format!("Inside the office area ({:.0} m); dwell started", distance),
                )?;
                Ok(GeofenceOutcome::DwellStarted { distance })
            }
            Decision::Wait {
                distance,
                remaining_secs,
                ..
            } => Ok(GeofenceOutcome::Dwelling {
                distance,
                remaining_secs,
            }),
            Decision::Confirm { distance, since } => {
                Self::cancel_pending(pool)?;
                let entry = EntryLogic::set(pool, cfg, since, EntrySource::Geofence, now)?;
                ttlog(
                    &pool.conn,
                    "geofence",
                    "arrival",
                    &format!("Arrival confirmed at {} ({:.0} m)", entry.clock(), distance),
                )?;
                Ok(GeofenceOutcome::Arrived(entry))
            }
        }
    }
}
