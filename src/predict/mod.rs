mod error;
mod frame;
mod observer;
mod orbit;
mod pass_finder;
mod tle_loader;
mod types;
mod visibility;

pub use error::PredictError;
pub use frame::{geodetic_to_cartesian, topocentric};
pub use observer::Observer;
pub use orbit::{Propagator, SatelliteModel};
pub use pass_finder::{find_passes, PassSearch, SampleTimes, DEFAULT_STEP_SECONDS};
pub use tle_loader::{checksum, load_tle_file, parse_tle};
pub use types::{ElementSet, Pass, StateVector, VisibilityReading};
pub use visibility::{evaluate, HORIZON_ELEVATION_DEG};

pub(crate) use types::{dot, norm, sub};
