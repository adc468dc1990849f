//! Satellite pass prediction and link characterization from two-line
//! element sets.
//!
//! The crate is organized leaf-first:
//! - [`predict`] loads TLEs, propagates them with SGP4, evaluates visibility
//!   from a ground observer and searches for passes.
//! - [`link`] holds the stateless link-budget formulas.
//! - [`track`] combines both into per-instant samples.

pub mod config;
pub mod constants;
pub mod link;
pub mod predict;
pub mod track;

pub use constants::{EARTH_RADIUS_KM, EARTH_ROTATION_RAD_S, SPEED_OF_LIGHT_KM_S};
