//! Stateless link-budget formulas.
//!
//! Inputs are never clamped: out-of-range values are reported as
//! [`LinkError`].

mod budget;
mod doppler;
mod error;

pub use budget::{coverage_radius, received_power};
pub use doppler::{
    doppler_shift, downlink_frequency, observer_velocity, range_rate, relative_speed,
    uplink_frequency,
};
pub use error::LinkError;
