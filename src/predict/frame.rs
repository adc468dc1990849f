use crate::constants::EARTH_RADIUS_KM;
use crate::predict::types::{dot, norm, sub};

/// Geodetic coordinates on a spherical Earth to Cartesian (km).
///
/// The zero meridian of the Cartesian frame sits 180° away from the
/// geodetic one, matching the propagator's frame.
pub fn geodetic_to_cartesian(lat_deg: f64, lon_deg: f64, altitude_km: f64) -> [f64; 3] {
    let corrected_lon = lon_deg - 180.0;
    let r = EARTH_RADIUS_KM + altitude_km;
    let lat = lat_deg.to_radians();
    let lon = corrected_lon.to_radians();
    let x = r * lat.cos() * lon.cos();
    let y = r * lat.cos() * lon.sin();
    let z = r * lat.sin();
    [x, y, z]
}

/// Elevation (deg) and slant range (km) of `target` seen from `observer`.
///
/// Elevation is measured from the plane normal to the observer's position
/// vector: 90° overhead, negative below the horizon.
pub fn topocentric(observer: [f64; 3], target: [f64; 3]) -> (f64, f64) {
    let los = sub(target, observer);
    let distance = norm(los);
    let zenith = norm(observer);
    if distance == 0.0 || zenith == 0.0 {
        return (0.0, distance);
    }

    let cos_zenith_angle = (dot(observer, los) / (zenith * distance)).clamp(-1.0, 1.0);
    let elevation = 90.0 - cos_zenith_angle.acos().to_degrees();
    (elevation, distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn matches_closed_form() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let lat: f64 = rng.gen_range(-90.0..90.0);
            let lon: f64 = rng.gen_range(-180.0..180.0);
            let altitude: f64 = rng.gen_range(0.0..2000.0);

            let [x, y, z] = geodetic_to_cartesian(lat, lon, altitude);
            let corrected_lon = lon - 180.0;
            let r = 6371.0 + altitude;
            assert_eq!(x, r * lat.to_radians().cos() * corrected_lon.to_radians().cos());
            assert_eq!(y, r * lat.to_radians().cos() * corrected_lon.to_radians().sin());
            assert_eq!(z, r * lat.to_radians().sin());
        }
    }

    #[test]
    fn zero_longitude_maps_to_negative_x() {
        let [x, y, z] = geodetic_to_cartesian(0.0, 0.0, 0.0);
        assert_eq!(x, -6371.0);
        assert!(y.abs() < 1e-9);
        assert_eq!(z, 0.0);

        let [x, _, _] = geodetic_to_cartesian(0.0, 180.0, 100.0);
        assert_eq!(x, 6471.0);
    }

    #[test]
    fn poles() {
        let [x, y, z] = geodetic_to_cartesian(90.0, 42.0, 0.0);
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
        assert_eq!(z, 6371.0);
    }

    #[test]
    fn overhead_target_is_at_zenith() {
        let observer = geodetic_to_cartesian(35.0, -120.0, 0.0);
        let target = geodetic_to_cartesian(35.0, -120.0, 800.0);
        let (elevation, distance) = topocentric(observer, target);
        assert!((elevation - 90.0).abs() < 1e-5, "{}", elevation);
        assert!((distance - 800.0).abs() < 1e-9);
    }

    #[test]
    fn antipodal_target_is_below_horizon() {
        let observer = geodetic_to_cartesian(10.0, 20.0, 0.0);
        let target = geodetic_to_cartesian(-10.0, -160.0, 500.0);
        let (elevation, distance) = topocentric(observer, target);
        assert!((elevation + 90.0).abs() < 1e-5, "{}", elevation);
        assert!((distance - (2.0 * 6371.0 + 500.0)).abs() < 1e-6);
    }

    #[test]
    fn tangent_target_is_on_horizon() {
        let observer = [6371.0, 0.0, 0.0];
        let (elevation, distance) = topocentric(observer, [6371.0, 1000.0, 0.0]);
        assert!(elevation.abs() < 1e-9);
        assert_eq!(distance, 1000.0);
    }

    #[test]
    fn coincident_points() {
        let p = geodetic_to_cartesian(1.0, 2.0, 0.0);
        assert_eq!(topocentric(p, p), (0.0, 0.0));
    }
}
