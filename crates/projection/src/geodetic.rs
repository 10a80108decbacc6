//! Spherical-earth navigation.
//!
//! Great-circle formulas on a sphere of radius [`EARTH_RADIUS_KM`]. Inputs and
//! outputs are in degrees; distances in kilometers.

use std::f64::consts::PI;

/// Mean earth radius (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Wrap a longitude into `[-180, 180)`.
pub fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can land exactly on 360 for tiny negative inputs
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Destination point after travelling `distance_km` from `(lon, lat)` along
/// the initial bearing `azimuth` (degrees clockwise from north).
///
/// Returns `(lon, lat)` in degrees.
pub fn point_at(lon: f64, lat: f64, azimuth: f64, distance_km: f64) -> (f64, f64) {
    let phi = lat.to_radians();
    let lambda = lon.to_radians();
    let bearing = azimuth.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let sin_phi2 = (sin_phi * cos_delta + cos_phi * sin_delta * bearing.cos()).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let dlambda = (bearing.sin() * sin_delta * cos_phi).atan2(cos_delta - sin_phi * sin_phi2);

    (normalize_lon((lambda + dlambda) * 180.0 / PI), phi2.to_degrees())
}

/// Great-circle distance (km) between two `(lon, lat)` points (haversine).
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = phi2 - phi1;
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Initial bearing (degrees in `[0, 360)`) from the first point to the second.
pub fn azimuth(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}
