use serde::Serialize;

use crate::predict::error::PredictError;
use crate::predict::frame::geodetic_to_cartesian;

/// Ground observer on the spherical Earth model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

impl Observer {
    /// Observer at sea level.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, PredictError> {
        Self::with_altitude(latitude_deg, longitude_deg, 0.0)
    }

    pub fn with_altitude(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    ) -> Result<Self, PredictError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(PredictError::InvalidObserver(format!(
                "latitude {} outside [-90, 90]",
                latitude_deg
            )));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(PredictError::InvalidObserver(format!(
                "longitude {} outside [-180, 180]",
                longitude_deg
            )));
        }
        if !altitude_km.is_finite() || altitude_km < 0.0 {
            return Err(PredictError::InvalidObserver(format!(
                "altitude {} km is not a finite height above the surface",
                altitude_km
            )));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        })
    }

    /// Parse `"lat, lon"` as written in the station configuration.
    pub fn from_coordinates(
        coordinates: &str,
        altitude_km: Option<f64>,
    ) -> Result<Self, PredictError> {
        let invalid =
            || PredictError::InvalidObserver(format!("bad coordinates '{}'", coordinates));
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let lat = parts[0].parse().map_err(|_| invalid())?;
        let lon = parts[1].parse().map_err(|_| invalid())?;
        Self::with_altitude(lat, lon, altitude_km.unwrap_or(0.0))
    }

    pub fn position_km(&self) -> [f64; 3] {
        geodetic_to_cartesian(self.latitude_deg, self.longitude_deg, self.altitude_km)
    }
}
