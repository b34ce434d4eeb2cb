mod destination;
mod haversine;

pub use {
    destination::destination_point,
    haversine::{surface_distance, GreatCircleIter},
};

/// Converts degrees to radians.
pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}
