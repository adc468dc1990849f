use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::types::{norm, ElementSet, StateVector};

/// Anything able to produce an ECI state for an arbitrary instant.
///
/// Implementations must be pure: the same instant always yields the same
/// state.
pub trait Propagator {
    fn propagate(&self, at: DateTime<Utc>) -> Result<StateVector, PredictError>;
}

impl<P: Propagator + ?Sized> Propagator for &P {
    fn propagate(&self, at: DateTime<Utc>) -> Result<StateVector, PredictError> {
        (**self).propagate(at)
    }
}

/// SGP4 model initialized from one element set.
pub struct SatelliteModel {
    name: String,
    elements: Elements,
    constants: Constants,
}

impl SatelliteModel {
    pub fn new(set: &ElementSet) -> Result<Self, PredictError> {
        let origin = set.name.clone().unwrap_or_else(|| "element set".to_string());

        let elements = Elements::from_tle(
            set.name.clone(),
            set.line1.as_bytes(),
            set.line2.as_bytes(),
        )
        .map_err(|e| PredictError::format(&origin, e.to_string()))?;

        // WGS72 constants and AFSPC gravity terms, as used by the published element sets.
        let constants = Constants::from_elements_afspc_compatibility_mode(&elements)
            .map_err(|e| PredictError::format(&origin, e.to_string()))?;

        let name = set
            .name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        Ok(Self {
            name,
            elements,
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    /// Reference epoch of the element set.
    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }
}

impl Propagator for SatelliteModel {
    fn propagate(&self, at: DateTime<Utc>) -> Result<StateVector, PredictError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PredictError::Propagation(e.to_string()))?;

        let prediction = self.constants.propagate(minutes)?;

        let finite = prediction
            .position
            .iter()
            .chain(prediction.velocity.iter())
            .all(|v| v.is_finite());
        if !finite || norm(prediction.position) <= 0.0 {
            return Err(PredictError::Propagation(format!(
                "{} has no valid state at {}",
                self.name, at
            )));
        }

        Ok(StateVector {
            at,
            position_km: prediction.position,
            velocity_km_s: prediction.velocity,
        })
    }
}

impl std::fmt::Debug for SatelliteModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SatelliteModel")
            .field("name", &self.name)
            .field("norad_id", &self.elements.norad_id)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}
