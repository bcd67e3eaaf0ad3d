use geographiclib_rs::{Geodesic, InverseGeodesic};
use serde::Serialize;
use std::ops::Add;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Builds a point, rejecting NaN and out-of-range degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Shortest distance over the WGS-84 ellipsoid (Karney's algorithm).
    pub fn geodesic_distance(&self, other: &GeoPoint) -> Distance {
        let meters: f64 =
            wgs84().inverse(self.latitude, self.longitude, other.latitude, other.longitude);
        Distance::from_meters(meters)
    }
}

fn wgs84() -> &'static Geodesic {
    static WGS84: OnceLock<Geodesic> = OnceLock::new();
    WGS84.get_or_init(Geodesic::wgs84)
}

/// A length on the Earth's surface, stored in meters (PostGIS geography's native unit).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_km(km: f64) -> Self {
        Self(km * 1000.0)
    }

    pub fn meters(&self) -> f64 {
        self.0
    }

    pub fn km(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        Distance(self.0 + rhs.0)
    }
}
