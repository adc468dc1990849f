use thiserror::Error;

use crate::link::LinkError;
use crate::predict::PredictError;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("predict error: {0}")]
    Predict(#[from] PredictError),
    #[error("link error: {0}")]
    Link(#[from] LinkError),
    #[error("invalid frequency: {0}")]
    InvalidFrequency(String),
}
