use crate::{constants::MEAN_EARTH_RADIUS, GeoPoint, GeodesyError};

/// Returns the point reached by travelling `distance_m` meters along
/// a great circle from `origin`, with initial bearing `bearing_rad`
/// (clockwise from north).
///
/// The resulting longitude is wrapped into `[-180, 180]`.
pub fn destination_point(
    origin: GeoPoint,
    distance_m: f64,
    bearing_rad: f64,
) -> Result<GeoPoint, GeodesyError> {
    if !distance_m.is_finite() {
        return Err(GeodesyError::NonFinite("distance"));
    }
    if !bearing_rad.is_finite() {
        return Err(GeodesyError::NonFinite("bearing"));
    }

    let lat1 = origin.latitude().to_radians();
    let lon1 = origin.longitude().to_radians();
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_brg, cos_brg) = bearing_rad.sin_cos();

    let angular = distance_m / MEAN_EARTH_RADIUS;
    let (sin_ang, cos_ang) = angular.sin_cos();

    let lat2 = (sin_lat1 * cos_ang + cos_lat1 * sin_ang * cos_brg)
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1 + (sin_brg * sin_ang * cos_lat1).atan2(cos_ang - sin_lat1 * lat2.sin());

    Ok(GeoPoint::normalized(lat2.to_degrees(), lon2.to_degrees()))
}
