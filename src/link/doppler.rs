use crate::constants::{EARTH_ROTATION_RAD_S, SPEED_OF_LIGHT_KM_S};
use crate::link::error::{positive, LinkError};
use crate::predict::{dot, geodetic_to_cartesian, norm, sub};

/// Frequency offset (Hz) for a scalar relative velocity (km/s).
///
/// Positive velocities mean the endpoints move apart.
pub fn doppler_shift(relative_velocity_km_s: f64, frequency_hz: f64) -> Result<f64, LinkError> {
    if !relative_velocity_km_s.is_finite() {
        return Err(LinkError::OutOfRange {
            quantity: "relative velocity",
            value: relative_velocity_km_s,
        });
    }
    if relative_velocity_km_s.abs() >= SPEED_OF_LIGHT_KM_S {
        return Err(LinkError::SuperLuminal(relative_velocity_km_s));
    }
    let frequency_hz = positive("frequency", frequency_hz)?;
    Ok((frequency_hz * relative_velocity_km_s) / SPEED_OF_LIGHT_KM_S)
}

/// Magnitude of the velocity difference between satellite and observer.
///
/// This is the full relative speed, not its line-of-sight component; see
/// [`range_rate`] for the signed radial part.
pub fn relative_speed(satellite_velocity: [f64; 3], observer_velocity: [f64; 3]) -> f64 {
    norm(sub(satellite_velocity, observer_velocity))
}

/// Rate of change of the slant range (km/s), positive when receding.
pub fn range_rate(
    satellite_position: [f64; 3],
    satellite_velocity: [f64; 3],
    observer_position: [f64; 3],
    observer_velocity: [f64; 3],
) -> f64 {
    let los = sub(satellite_position, observer_position);
    let range = norm(los);
    if range == 0.0 {
        return 0.0;
    }
    dot(sub(satellite_velocity, observer_velocity), los) / range
}

/// Surface velocity (km/s) of a sea-level observer due to Earth rotation.
pub fn observer_velocity(lat_deg: f64, lon_deg: f64) -> [f64; 3] {
    let pos = geodetic_to_cartesian(lat_deg, lon_deg, 0.0);
    [
        -EARTH_ROTATION_RAD_S * pos[1],
        EARTH_ROTATION_RAD_S * pos[0],
        0.0,
    ]
}

/// Frequency received on the ground for a satellite transmitting `freq_hz`.
pub fn downlink_frequency(freq_hz: f64, range_rate_km_s: f64) -> f64 {
    freq_hz * (1.0 - range_rate_km_s / SPEED_OF_LIGHT_KM_S)
}

/// Frequency to transmit from the ground so the satellite receives `freq_hz`.
pub fn uplink_frequency(freq_hz: f64, range_rate_km_s: f64) -> f64 {
    freq_hz * (1.0 + range_rate_km_s / SPEED_OF_LIGHT_KM_S)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn doppler_shift_at_one_percent_of_c() {
        let relative_velocity = SPEED_OF_LIGHT_KM_S / 100.0;
        let frequency = 100.0;
        let doppler = doppler_shift(relative_velocity, frequency).unwrap();
        assert_eq!(doppler, (frequency * relative_velocity) / SPEED_OF_LIGHT_KM_S);
        assert!(doppler < frequency);
        assert!((doppler - 1.0).abs() < 1e-12);
    }

    #[test]
    fn doppler_shift_sign_follows_velocity() {
        let receding = doppler_shift(7.5, 437.5e6).unwrap();
        let approaching = doppler_shift(-7.5, 437.5e6).unwrap();
        assert!(receding > 0.0);
        assert_eq!(approaching, -receding);
        assert!((receding - 10_945.07).abs() < 0.01, "{}", receding);
    }

    #[test]
    fn doppler_shift_rejects_bad_inputs() {
        assert_eq!(
            doppler_shift(SPEED_OF_LIGHT_KM_S, 100.0),
            Err(LinkError::SuperLuminal(SPEED_OF_LIGHT_KM_S))
        );
        assert!(doppler_shift(-400_000.0, 100.0).is_err());
        assert!(doppler_shift(f64::NAN, 100.0).is_err());
        assert!(doppler_shift(1.0, 0.0).is_err());
        assert!(doppler_shift(1.0, -5.0).is_err());
    }

    #[test]
    fn relative_speed_is_difference_magnitude() {
        assert_eq!(relative_speed([1.0, 2.0, 3.0], [1.0, 2.0, 3.0]), 0.0);
        assert_eq!(relative_speed([3.0, 4.0, 0.0], [0.0, 0.0, 0.0]), 5.0);

        let mut rng = rand::thread_rng();
        let obs = observer_velocity(rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0));
        let speed = relative_speed([1.0, 2.0, 3.0], obs);
        assert!(speed >= 0.0 && speed < SPEED_OF_LIGHT_KM_S);
    }

    #[test]
    fn observer_velocity_follows_rotation() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let lat: f64 = rng.gen_range(-90.0..90.0);
            let lon: f64 = rng.gen_range(-180.0..180.0);
            let v = observer_velocity(lat, lon);
            let expected = EARTH_ROTATION_RAD_S * 6371.0 * lat.to_radians().cos();
            assert!((norm(v) - expected).abs() < 1e-9);
            assert_eq!(v[2], 0.0);
            // tangent to the surface
            assert!(dot(v, geodetic_to_cartesian(lat, lon, 0.0)).abs() < 1e-6);
        }
        let equator = observer_velocity(0.0, 0.0);
        assert!((norm(equator) - 0.4646).abs() < 1e-3);
    }

    #[test]
    fn range_rate_signs() {
        let obs = [6371.0, 0.0, 0.0];
        let still = [0.0, 0.0, 0.0];
        assert_eq!(range_rate([7000.0, 0.0, 0.0], [1.0, 0.0, 0.0], obs, still), 1.0);
        assert_eq!(range_rate([7000.0, 0.0, 0.0], [-2.0, 0.0, 0.0], obs, still), -2.0);
        assert_eq!(range_rate([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0], obs, still), 0.0);
        assert_eq!(range_rate(obs, [1.0, 1.0, 1.0], obs, still), 0.0);
    }

    #[test]
    fn corrected_frequencies() {
        let f = 145.8e6;
        assert_eq!(downlink_frequency(f, 0.0), f);
        assert!(downlink_frequency(f, -5.0) > f);
        assert!(uplink_frequency(f, -5.0) < f);
        let rr = 3.0;
        let shift = doppler_shift(rr, f).unwrap();
        assert!((downlink_frequency(f, rr) - (f - shift)).abs() < 1e-6);
    }
}
