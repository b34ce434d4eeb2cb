/// Mean earth radius, in meters, used for all projections and
/// distances.
///
/// Projection and distance must agree on this value, otherwise a
/// point projected `d` meters out will not measure `d` meters away.
pub const MEAN_EARTH_RADIUS: f64 = 6_367_444.7;
