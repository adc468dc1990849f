use chrono::{DateTime, Duration, Utc};

use super::parsing::parse_frequency_hz;
use crate::constants::SPEED_OF_LIGHT_KM_S;
use crate::link::{
    coverage_radius, doppler_shift, downlink_frequency, observer_velocity, range_rate,
    received_power, relative_speed, uplink_frequency,
};
use crate::predict::{evaluate, Observer, Propagator, SampleTimes, StateVector};
use crate::track::{LinkMetrics, TrackError, TrackSample};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyPlan {
    pub uplink_hz: Option<f64>,
    pub downlink_hz: Option<f64>,
}

/// Transmitter and antenna figures for a received-power estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkParams {
    pub transmit_power_w: f64,
    pub gain_tx: f64,
    pub gain_rx: f64,
    pub frequency_hz: f64,
}

impl LinkParams {
    pub fn wavelength_km(&self) -> f64 {
        SPEED_OF_LIGHT_KM_S / self.frequency_hz
    }
}

pub fn build_frequency_plan(
    uplink: Option<&str>,
    downlink: Option<&str>,
) -> Result<FrequencyPlan, TrackError> {
    let parse = |value: Option<&str>| {
        value
            .map(|v| {
                parse_frequency_hz(v).ok_or_else(|| TrackError::InvalidFrequency(v.to_string()))
            })
            .transpose()
    };
    Ok(FrequencyPlan {
        uplink_hz: parse(uplink)?,
        downlink_hz: parse(downlink)?,
    })
}

pub fn build_trajectory<P: Propagator>(
    propagator: &P,
    observer: &Observer,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    frequencies: &FrequencyPlan,
    step: Duration,
) -> Result<Vec<TrackSample>, TrackError> {
    SampleTimes::new(start, end, step)
        .map(|at| -> Result<TrackSample, TrackError> {
            let state = propagator.propagate(at)?;
            Ok(track_sample(&state, observer, frequencies))
        })
        .collect()
}

pub fn track_sample(
    state: &StateVector,
    observer: &Observer,
    frequencies: &FrequencyPlan,
) -> TrackSample {
    let reading = evaluate(state.position_km, observer);
    let obs_vel = observer_velocity(observer.latitude_deg, observer.longitude_deg);
    let range_rate_km_s = range_rate(
        state.position_km,
        state.velocity_km_s,
        observer.position_km(),
        obs_vel,
    );

    TrackSample {
        timestamp: state.at,
        visible: reading.visible,
        elevation_deg: reading.elevation_deg,
        range_km: reading.distance_km,
        range_rate_km_s,
        relative_speed_km_s: relative_speed(state.velocity_km_s, obs_vel),
        doppler_uplink_hz: frequencies
            .uplink_hz
            .map(|f| uplink_frequency(f, range_rate_km_s)),
        doppler_downlink_hz: frequencies
            .downlink_hz
            .map(|f| downlink_frequency(f, range_rate_km_s)),
    }
}

/// Doppler shift from the relative speed, received power over the slant
/// range, and footprint radius at the current altitude.
pub fn link_metrics(
    state: &StateVector,
    observer: &Observer,
    params: &LinkParams,
) -> Result<LinkMetrics, TrackError> {
    let reading = evaluate(state.position_km, observer);
    let obs_vel = observer_velocity(observer.latitude_deg, observer.longitude_deg);
    let speed = relative_speed(state.velocity_km_s, obs_vel);

    Ok(LinkMetrics {
        doppler_shift_hz: doppler_shift(speed, params.frequency_hz)?,
        received_power_ratio: received_power(
            params.transmit_power_w,
            params.gain_tx,
            params.gain_rx,
            params.wavelength_km(),
            reading.distance_km,
        )?,
        coverage_radius_km: coverage_radius(state.position_km, state.altitude_km())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::{geodetic_to_cartesian, PredictError};
    use chrono::TimeZone;

    struct Fixed(StateVector);

    impl Propagator for Fixed {
        fn propagate(&self, at: DateTime<Utc>) -> Result<StateVector, PredictError> {
            Ok(StateVector { at, ..self.0 })
        }
    }

    fn overhead_state() -> (Observer, StateVector) {
        let observer = Observer::new(0.0, 180.0).unwrap();
        let state = StateVector {
            at: Utc.with_ymd_and_hms(2025, 7, 8, 1, 0, 0).unwrap(),
            position_km: geodetic_to_cartesian(0.0, 180.0, 700.0),
            velocity_km_s: [0.0, 7.5, 0.0],
        };
        (observer, state)
    }

    #[test]
    fn frequency_plan_parsing() {
        let plan = build_frequency_plan(Some("145.8MHz"), None).unwrap();
        assert_eq!(plan.uplink_hz, Some(145.8e6));
        assert_eq!(plan.downlink_hz, None);
        assert!(matches!(
            build_frequency_plan(None, Some("loud")),
            Err(TrackError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn overhead_sample() {
        let (observer, state) = overhead_state();
        let plan = FrequencyPlan {
            uplink_hz: Some(145.8e6),
            downlink_hz: Some(437.5e6),
        };
        let sample = track_sample(&state, &observer, &plan);
        assert!(sample.visible);
        assert!((sample.range_km - 700.0).abs() < 1e-9);
        // velocity is perpendicular to the line of sight overhead
        assert!(sample.range_rate_km_s.abs() < 1e-9);
        assert!(sample.relative_speed_km_s > 7.0);
        assert!((sample.doppler_downlink_hz.unwrap() - 437.5e6).abs() < 1e-3);
        assert!((sample.doppler_uplink_hz.unwrap() - 145.8e6).abs() < 1e-3);
    }

    #[test]
    fn trajectory_covers_window() {
        let (observer, state) = overhead_state();
        let start = state.at;
        let end = start + Duration::seconds(10);
        let samples = build_trajectory(
            &Fixed(state),
            &observer,
            start,
            end,
            &FrequencyPlan::default(),
            Duration::seconds(3),
        )
        .unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples.first().unwrap().timestamp, start);
        assert_eq!(samples.last().unwrap().timestamp, end);
        assert!(samples.iter().all(|s| s.doppler_downlink_hz.is_none()));
    }

    #[test]
    fn link_metrics_overhead() {
        let (observer, state) = overhead_state();
        let params = LinkParams {
            transmit_power_w: 2.0,
            gain_tx: 1.0,
            gain_rx: 20.0,
            frequency_hz: 437.5e6,
        };
        let metrics = link_metrics(&state, &observer, &params).unwrap();
        assert!(metrics.doppler_shift_hz > 0.0 && metrics.doppler_shift_hz < params.frequency_hz);
        assert!((0.0..1.0).contains(&metrics.received_power_ratio));
        let expected = ((700.0f64 + 6371.0).powi(2) - 6371.0f64.powi(2)).sqrt();
        assert!((metrics.coverage_radius_km - expected).abs() < 1e-6);
    }
}
