//! Great-circle distance on a spherical Earth

/// Mean Earth radius in kilometers used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Precomputed constant: EARTH_RADIUS_KM in meters
const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

/// Calculate the haversine distance between two WGS84 coordinates
///
/// # Arguments
/// * `lat1`, `lon1` - First coordinate in degrees
/// * `lat2`, `lon2` - Second coordinate in degrees
///
/// # Returns
/// The surface distance in meters. Elevation is not taken into account.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just outside [0, 1] for near-antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Haversine distance between two `geo` points (x = longitude, y = latitude)
#[inline]
pub fn haversine_distance_points(p1: geo::Point<f64>, p2: geo::Point<f64>) -> f64 {
    haversine_distance(p1.y(), p1.x(), p2.y(), p2.x())
}
