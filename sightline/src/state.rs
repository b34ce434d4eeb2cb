use crate::{
    walker::{DISTANCE_STEP, HEIGHT_TOLERANCE, SLOPE_FACTOR},
    Observer,
};
use elevation::ElevationSample;
use geodesy::GeoPoint;
use log::trace;

/// Mutable bookkeeping for one in-flight search.
pub(crate) struct SearchState {
    adjusted_altitude_m: f64,
    pitch_rad: f64,
    pitch_tan: f64,
    last_traveled_m: f64,
    last_elevation_m: f64,
    min_diff_m: f64,
    best_fallback: GeoPoint,
}

impl SearchState {
    pub(crate) fn new(observer: &Observer) -> Self {
        Self {
            adjusted_altitude_m: observer.adjusted_altitude_m(),
            pitch_rad: observer.pitch_rad(),
            pitch_tan: observer.pitch_rad().tan(),
            last_traveled_m: 0.0,
            // Unadjusted, unlike the sight line origin.
            last_elevation_m: observer.altitude_m(),
            min_diff_m: f64::INFINITY,
            best_fallback: observer.position(),
        }
    }

    /// Feeds the next sample, `distance_m` from the observer.
    ///
    /// Returns the sample's location if the sight line meets the
    /// terrain there. Samples not beyond the previous one are ignored.
    pub(crate) fn observe(&mut self, sample: &ElevationSample, distance_m: f64) -> Option<GeoPoint> {
        if distance_m <= self.last_traveled_m {
            trace!("skipping sample; distance: {distance_m}, last: {}", self.last_traveled_m);
            return None;
        }
        self.last_traveled_m = distance_m;

        let estimate = self.adjusted_altitude_m + distance_m * self.pitch_tan;
        let actual = sample.elevation_m;
        let diff = estimate - actual;
        let slope = ((actual - self.last_elevation_m) / DISTANCE_STEP).tan();

        trace!(
            "distance: {distance_m}, estimate: {estimate}, actual: {actual}, diff: {diff}, slope: {slope}"
        );

        if is_intersection(actual, diff, slope, self.pitch_rad) {
            return Some(sample.location);
        }

        self.last_elevation_m = actual;
        if diff.abs() < self.min_diff_m {
            self.min_diff_m = diff.abs();
            self.best_fallback = sample.location;
        }
        None
    }

    /// Sample nearest the sight line so far, or the observer's own
    /// position if nothing has been observed.
    pub(crate) fn fallback(&self) -> GeoPoint {
        self.best_fallback
    }
}

/// Decides whether a sample counts as the sight line meeting the
/// terrain.
///
/// Elevation noise makes `diff` alone unreliable when the terrain runs
/// nearly parallel to the sight line, so a crossing also needs either
/// a slope steeper than the pitch or a large deficit.
pub(crate) fn is_intersection(elevation_m: f64, diff_m: f64, slope: f64, pitch_rad: f64) -> bool {
    elevation_m >= 0.0
        && diff_m < HEIGHT_TOLERANCE
        && (slope - pitch_rad > SLOPE_FACTOR || diff_m < 4.0 * HEIGHT_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::{is_intersection, SearchState};
    use crate::Observer;
    use elevation::ElevationSample;
    use geodesy::{destination_point, GeoPoint};

    fn observer() -> Observer {
        Observer::builder()
            .position(GeoPoint::new(0.0, 0.0).unwrap())
            .altitude(100.0)
            .bearing(0.0)
            .build()
            .unwrap()
    }

    fn sample_at(distance_m: f64, elevation_m: f64) -> ElevationSample {
        ElevationSample {
            location: destination_point(observer().position(), distance_m, 0.0).unwrap(),
            elevation_m,
        }
    }

    #[test]
    fn test_intersection_rule() {
        // Below sea level never counts.
        assert!(!is_intersection(-1.0, -100.0, 5.0, 0.0));
        // Terrain not far enough above the sight line.
        assert!(!is_intersection(50.0, -9.0, 5.0, 0.0));
        // Steep enough.
        assert!(is_intersection(50.0, -11.0, 0.03, 0.0));
        // Near parallel and shallow deficit.
        assert!(!is_intersection(50.0, -11.0, 0.01, 0.0));
        // Near parallel but deep deficit.
        assert!(is_intersection(50.0, -41.0, 0.01, 0.0));
        // Slope is measured relative to pitch.
        assert!(!is_intersection(50.0, -11.0, 0.03, 0.02));
        assert!(is_intersection(0.0, -11.0, 0.03, -0.5));
    }

    #[test]
    fn test_fallback_tracks_prefix_minimum() {
        // Level sight line at 100 m; none of these reach 110 m.
        let elevations = [50.0, 80.0, 95.0, 70.0, 99.0, 105.0, 20.0, 101.0];
        let samples: Vec<ElevationSample> = elevations
            .iter()
            .enumerate()
            .map(|(idx, elev)| sample_at(20.0 + 10.0 * idx as f64, *elev))
            .collect();

        let mut state = SearchState::new(&observer());
        for (idx, sample) in samples.iter().enumerate() {
            let distance = 20.0 + 10.0 * idx as f64;
            assert_eq!(state.observe(sample, distance), None);

            let expected = samples[..=idx]
                .iter()
                .fold((f64::INFINITY, None), |(best, loc), s| {
                    let diff = (100.0 - s.elevation_m).abs();
                    if diff < best {
                        (diff, Some(s.location))
                    } else {
                        (best, loc)
                    }
                })
                .1
                .unwrap();
            assert_eq!(state.fallback(), expected, "prefix ending at {idx}");
        }
        assert_eq!(state.fallback(), samples[4].location);
    }

    #[test]
    fn test_fallback_defaults_to_observer() {
        let state = SearchState::new(&observer());
        assert_eq!(state.fallback(), observer().position());
    }

    #[test]
    fn test_skips_repeated_distance() {
        let mut state = SearchState::new(&observer());
        assert_eq!(state.observe(&sample_at(100.0, 99.0), 100.0), None);
        // Would qualify if it were not a repeat.
        let repeat = sample_at(100.0, 150.0);
        assert_eq!(state.observe(&repeat, 100.0), None);
        assert_eq!(state.observe(&repeat, 90.0), None);
        let ahead = sample_at(110.0, 150.0);
        assert_eq!(state.observe(&ahead, 110.0), Some(ahead.location));
    }

    #[test]
    fn test_first_slope_uses_observer_altitude() {
        let mut state = SearchState::new(&observer());
        // The first slope is measured from the observer's altitude.
        let hill = sample_at(20.0, 112.0);
        assert_eq!(state.observe(&hill, 20.0), Some(hill.location));
    }
}
