use std::f64::consts::PI;

use crate::constants::EARTH_RADIUS_KM;
use crate::link::error::{positive, LinkError};

/// Friis free-space transmission: `Pt·Gt·Gr·λ² / (4π·d)²`.
///
/// Wavelength and distance share a unit; gains are linear.
pub fn received_power(
    transmit_power: f64,
    gain_tx: f64,
    gain_rx: f64,
    wavelength_km: f64,
    distance_km: f64,
) -> Result<f64, LinkError> {
    let transmit_power = positive("transmit power", transmit_power)?;
    let gain_tx = positive("transmitter gain", gain_tx)?;
    let gain_rx = positive("receiver gain", gain_rx)?;
    let wavelength_km = positive("wavelength", wavelength_km)?;
    let distance_km = positive("distance", distance_km)?;

    Ok((transmit_power * gain_tx * gain_rx * wavelength_km.powi(2))
        / (4.0 * PI * distance_km).powi(2))
}

/// Horizon-limited footprint radius (km) for a satellite at `altitude_km`.
///
/// Only the altitude enters the circular-Earth formula; `position` is not
/// used to derive a local Earth radius.
pub fn coverage_radius(_position: [f64; 3], altitude_km: f64) -> Result<f64, LinkError> {
    if !altitude_km.is_finite() || altitude_km < 0.0 {
        return Err(LinkError::OutOfRange {
            quantity: "altitude",
            value: altitude_km,
        });
    }
    Ok(((altitude_km + EARTH_RADIUS_KM).powi(2) - EARTH_RADIUS_KM.powi(2)).sqrt())
}
