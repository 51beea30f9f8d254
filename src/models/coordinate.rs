use crate::errors::{AppError, AppResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidCoordinate(format!(
                "latitude {} out of range [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidCoordinate(format!(
                "longitude {} out of range [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a `lat,lon` pair, as read from a location feed.
    pub fn parse(s: &str) -> AppResult<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| AppError::InvalidCoordinate(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinate(s.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinate(s.to_string()))?;
        Self::new(lat, lon)
    }
}
