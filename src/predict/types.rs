use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::constants::EARTH_RADIUS_KM;

/// One satellite's two-line element set, optionally preceded by a name line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSet {
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

/// ECI position and velocity of a satellite at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    pub at: DateTime<Utc>,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

impl StateVector {
    pub fn radius_km(&self) -> f64 {
        norm(self.position_km)
    }

    /// Height above the spherical Earth model.
    pub fn altitude_km(&self) -> f64 {
        self.radius_km() - EARTH_RADIUS_KM
    }

    pub fn speed_km_s(&self) -> f64 {
        norm(self.velocity_km_s)
    }
}

/// Result of a single visibility evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibilityReading {
    pub visible: bool,
    pub elevation_deg: f64,
    pub distance_km: f64,
}

/// A predicted satellite pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pass {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Sample instant with the highest elevation.
    pub tca: DateTime<Utc>,
    pub max_elevation_deg: f64,
    pub min_distance_km: f64,
}

impl Pass {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

pub(crate) fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
