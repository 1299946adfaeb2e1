use crate::models::Coordinate;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers to statute miles
const MILES_PER_KM: f64 = 0.621371;

/// Calculate the Haversine distance between two coordinates in kilometers
///
/// Returns exactly `0.0` for identical coordinates and the same value for
/// either argument order. The haversine term is clamped to `[0, 1]` so
/// rounding near the poles or across the antimeridian cannot push the
/// square roots out of their domain.
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance(a.lat(), a.lng(), b.lat(), b.lng())
}

/// Haversine distance on raw degree values
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Convert kilometers to miles for display
#[inline]
pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}
