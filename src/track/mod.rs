//! Per-instant tracking samples built on top of [`crate::predict`] and
//! [`crate::link`].

mod error;
mod parsing;
mod sample;
mod trajectory;

pub use error::TrackError;
pub use parsing::parse_frequency_hz;
pub use sample::{LinkMetrics, TrackSample};
pub use trajectory::{
    build_frequency_plan, build_trajectory, link_metrics, track_sample, FrequencyPlan, LinkParams,
};
