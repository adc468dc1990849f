use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::predict::{Observer, PassSearch, PredictError, DEFAULT_STEP_SECONDS};
use crate::track::{
    build_frequency_plan, parse_frequency_hz, FrequencyPlan, LinkParams, TrackError,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<PredictError> for ConfigError {
    fn from(e: PredictError) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}

impl From<TrackError> for ConfigError {
    fn from(e: TrackError) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub station: Option<StationConfig>,
    #[serde(default)]
    pub search: SearchConfig,
    pub radio: Option<RadioConfig>,
    pub link: Option<LinkConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
    #[serde(default)]
    pub altitude_km: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default)]
    pub refine: bool,
    #[serde(default)]
    pub min_elevation_deg: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            refine: false,
            min_elevation_deg: 0.0,
        }
    }
}

fn default_step() -> String {
    format!("{}s", DEFAULT_STEP_SECONDS)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RadioConfig {
    pub uplink: Option<String>,
    pub downlink: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    pub transmit_power_w: f64,
    #[serde(default = "unity_gain")]
    pub gain_tx: f64,
    #[serde(default = "unity_gain")]
    pub gain_rx: f64,
    pub frequency: String,
}

fn unity_gain() -> f64 {
    1.0
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn observer(&self) -> Result<Option<Observer>, ConfigError> {
        self.station
            .as_ref()
            .map(|s| Observer::from_coordinates(&s.coordinates, Some(s.altitude_km)))
            .transpose()
            .map_err(ConfigError::from)
    }

    pub fn station_name(&self) -> Option<&str> {
        self.station.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn pass_search(&self) -> Result<PassSearch, ConfigError> {
        Ok(PassSearch {
            step: parse_duration(&self.search.step)?,
            refine: self.search.refine,
            min_elevation_deg: self.search.min_elevation_deg,
        })
    }

    pub fn frequency_plan(&self) -> Result<FrequencyPlan, ConfigError> {
        let plan = match &self.radio {
            Some(radio) => {
                build_frequency_plan(radio.uplink.as_deref(), radio.downlink.as_deref())?
            }
            None => FrequencyPlan::default(),
        };
        Ok(plan)
    }

    pub fn link_params(&self) -> Result<Option<LinkParams>, ConfigError> {
        self.link
            .as_ref()
            .map(|link| {
                let frequency_hz = parse_frequency_hz(&link.frequency).ok_or_else(|| {
                    ConfigError::Invalid(format!("bad link frequency '{}'", link.frequency))
                })?;
                Ok(LinkParams {
                    transmit_power_w: link.transmit_power_w,
                    gain_tx: link.gain_tx,
                    gain_rx: link.gain_rx,
                    frequency_hz,
                })
            })
            .transpose()
    }
}

/// Parse a human-readable duration such as `"30s"` or `"1h 30m"`.
pub fn parse_duration(s: &str) -> Result<chrono::Duration, ConfigError> {
    humantime::parse_duration(s.trim())
        .map_err(|e| ConfigError::Invalid(format!("duration '{}': {}", s, e)))
        .and_then(|d| {
            chrono::Duration::from_std(d)
                .map_err(|e| ConfigError::Invalid(format!("duration '{}': {}", s, e)))
        })
}
