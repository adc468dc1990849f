use crate::predict::frame::topocentric;
use crate::predict::observer::Observer;
use crate::predict::types::VisibilityReading;

/// Geometric horizon, no refraction margin.
pub const HORIZON_ELEVATION_DEG: f64 = 0.0;

/// Evaluate whether a satellite at `position_km` is above the observer's
/// horizon.
pub fn evaluate(position_km: [f64; 3], observer: &Observer) -> VisibilityReading {
    let (elevation_deg, distance_km) = topocentric(observer.position_km(), position_km);
    VisibilityReading {
        visible: elevation_deg > HORIZON_ELEVATION_DEG,
        elevation_deg,
        distance_km,
    }
}
