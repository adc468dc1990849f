use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid TLE format in {origin}: {message}")]
    Format { origin: String, message: String },
    #[error("Propagation error: {0}")]
    Propagation(String),
    #[error("Invalid observer: {0}")]
    InvalidObserver(String),
    #[error("Invalid search window: {0}")]
    InvalidWindow(String),
}

impl PredictError {
    pub(crate) fn format(origin: impl Into<String>, message: impl Into<String>) -> Self {
        PredictError::Format {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

impl From<sgp4::Error> for PredictError {
    fn from(err: sgp4::Error) -> Self {
        PredictError::Propagation(err.to_string())
    }
}
