use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSample {
    pub timestamp: DateTime<Utc>,
    pub visible: bool,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub range_rate_km_s: f64,
    pub relative_speed_km_s: f64,
    pub doppler_uplink_hz: Option<f64>,
    pub doppler_downlink_hz: Option<f64>,
}

/// Link figures for one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkMetrics {
    pub doppler_shift_hz: f64,
    pub received_power_ratio: f64,
    pub coverage_radius_km: f64,
}
