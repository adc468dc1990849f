/// Speed of light in vacuum (km/s).
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Mean radius of the spherical Earth model (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Sidereal rotation rate of the Earth (rad/s).
pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;
