//! Great-circle distance and interpolation.
//!
//! The interpolation routine follows [geo]'s
//! `haversine_intermediate`, reworked to emit a fixed number of
//! evenly spaced samples over [`GeoPoint`]s.
//!
//! [geo](https://github.com/georust/geo/blob/eb0cd98f3ccfa226631af23d94d66d214ea66488/geo/src/algorithm/haversine_intermediate.rs)

use crate::{constants::MEAN_EARTH_RADIUS, GeoPoint};

/// Returns the great-circle distance, in meters, between `a` and `b`.
pub fn surface_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    angular_distance(a, b) * MEAN_EARTH_RADIUS
}

fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (b.longitude() - a.longitude()).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

/// Yields `samples` evenly spaced points along the great circle from
/// `start` to `end`, both endpoints included.
pub struct GreatCircleIter {
    params: Option<HaversineParams>,
    start: GeoPoint,
    end: GeoPoint,
    total_points: usize,
    current_point: usize,
}

impl GreatCircleIter {
    pub fn new(start: GeoPoint, end: GeoPoint, samples: usize) -> Self {
        let params = get_params(start, end);
        Self {
            // Coincident endpoints have no defined great circle.
            params: (params.d > 0.0).then_some(params),
            start,
            end,
            total_points: samples,
            current_point: 0,
        }
    }

    /// Distance between consecutive samples, in meters.
    pub fn step_size_m(&self) -> f64 {
        match (&self.params, self.total_points) {
            (Some(params), n) if n > 1 => params.d * MEAN_EARTH_RADIUS / (n - 1) as f64,
            _ => 0.0,
        }
    }
}

impl Iterator for GreatCircleIter {
    type Item = GeoPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_point >= self.total_points {
            return None;
        }
        let idx = self.current_point;
        self.current_point += 1;

        let point = if idx == 0 {
            self.start
        } else if idx + 1 == self.total_points {
            self.end
        } else {
            match &self.params {
                Some(params) => {
                    let factor = idx as f64 / (self.total_points - 1) as f64;
                    get_point(params, factor)
                }
                None => self.start,
            }
        };
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_points - self.current_point;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GreatCircleIter {}

#[allow(clippy::many_single_char_names)]
struct HaversineParams {
    d: f64,
    n: f64,
    o: f64,
    p: f64,
    q: f64,
    r: f64,
    s: f64,
}

#[allow(clippy::many_single_char_names)]
fn get_point(params: &HaversineParams, f: f64) -> GeoPoint {
    let HaversineParams {
        d,
        n,
        o,
        p,
        q,
        r,
        s,
    } = *params;

    let a = ((1.0 - f) * d).sin() / d.sin();
    let b = (f * d).sin() / d.sin();

    let x = a * n + b * o;
    let y = a * p + b * q;
    let z = a * r + b * s;

    let lat = z.atan2(x.hypot(y));
    let lon = y.atan2(x);

    GeoPoint::normalized(lat.to_degrees(), lon.to_degrees())
}

fn get_params(p1: GeoPoint, p2: GeoPoint) -> HaversineParams {
    let lat1 = p1.latitude().to_radians();
    let lon1 = p1.longitude().to_radians();
    let lat2 = p2.latitude().to_radians();
    let lon2 = p2.longitude().to_radians();

    let (lat1_sin, lat1_cos) = lat1.sin_cos();
    let (lat2_sin, lat2_cos) = lat2.sin_cos();
    let (lon1_sin, lon1_cos) = lon1.sin_cos();
    let (lon2_sin, lon2_cos) = lon2.sin_cos();

    HaversineParams {
        d: angular_distance(p1, p2),
        n: lat1_cos * lon1_cos,
        o: lat2_cos * lon2_cos,
        p: lat1_cos * lon1_sin,
        q: lat2_cos * lon2_sin,
        r: lat1_sin,
        s: lat2_sin,
    }
}
