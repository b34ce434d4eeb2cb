//! # Geodesy
//!
//! Spherical-earth routines for projecting an observer's line of
//! sight along a great circle.

pub mod constants;
mod error;
mod math;
mod point;

pub use crate::{
    error::GeodesyError,
    math::{destination_point, surface_distance, to_degrees, to_radians, GreatCircleIter},
    point::GeoPoint,
};
pub use geo;
