//! Outward line-of-sight search.
//!
//! The walk starts [`MIN_DISTANCE`] meters out and fetches the terrain
//! in chunks of [`CHUNK_SAMPLES`] samples, [`DISTANCE_STEP`] meters
//! apart, until a sample qualifies as an intersection or the chunk
//! edge passes [`MAX_DISTANCE`].

use crate::{state::SearchState, CancelToken, Observer, SearchError, SearchOutcome};
use elevation::ElevationProvider;
use geodesy::{destination_point, surface_distance, GeoPoint};
use log::{debug, info};

/// How far (meters) the terrain must rise above the sight line before
/// it counts as a crossing. Negative: terrain above the line.
pub const HEIGHT_TOLERANCE: f64 = -10.0;

/// Search range limit, in meters.
pub const MAX_DISTANCE: f64 = 50_000.0;

/// Where the first chunk starts, in meters.
pub const MIN_DISTANCE: f64 = 20.0;

/// Requested spacing between samples, in meters.
pub const DISTANCE_STEP: f64 = 10.0;

/// Minimum terrain slope, relative to the pitch, for a shallow
/// crossing to count.
pub const SLOPE_FACTOR: f64 = 0.02;

/// Samples per chunk; also the provider's path query limit.
pub const CHUNK_SAMPLES: usize = elevation::MAX_PATH_SAMPLES;

/// Length of one chunk, in meters.
#[allow(clippy::cast_precision_loss)]
pub const CHUNK_LENGTH: f64 = DISTANCE_STEP * CHUNK_SAMPLES as f64;

/// Runs sight line searches against an elevation provider.
pub struct Walker<P> {
    provider: P,
}

impl<P: ElevationProvider> Walker<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves a height above ground at `position` to an altitude
    /// above mean sea level.
    pub fn ground_altitude(
        &self,
        position: GeoPoint,
        above_ground_m: f64,
    ) -> Result<f64, SearchError> {
        let ground = self
            .provider
            .point_elevation(position)
            .map_err(SearchError::ElevationUnavailable)?;
        Ok(ground + above_ground_m)
    }

    /// Searches outward from `observer` for the first point where its
    /// line of sight meets the terrain.
    ///
    /// `cancel` is polled around each chunk fetch.
    pub fn search(&self, observer: &Observer, cancel: &CancelToken) -> SearchOutcome {
        let outcome = SearchOutcome::from(self.walk(observer, cancel));
        match &outcome {
            SearchOutcome::Intersection(point) => info!("intersection at {point}"),
            SearchOutcome::Fallback(point) => info!("no intersection, falling back to {point}"),
            SearchOutcome::Failed(err) => info!("search failed: {err}"),
        }
        outcome
    }

    fn walk(&self, observer: &Observer, cancel: &CancelToken) -> Result<SearchOutcome, SearchError> {
        let origin = observer.position();
        let bearing = observer.bearing_rad();
        debug!(
            "walk; origin: {origin}, altitude: {}, pitch: {}, bearing: {bearing}",
            observer.adjusted_altitude_m(),
            observer.pitch_rad(),
        );

        let mut state = SearchState::new(observer);
        let mut near_m = MIN_DISTANCE;
        let mut far_m = CHUNK_LENGTH;

        while far_m < MAX_DISTANCE {
            let from = destination_point(origin, near_m, bearing)?;
            let to = destination_point(origin, far_m, bearing)?;

            cancel.check()?;
            let (path, fetch_runtime) = {
                let now = std::time::Instant::now();
                let path = self
                    .provider
                    .path_elevation(from, to, DISTANCE_STEP)
                    .map_err(SearchError::ElevationUnavailable)?;
                (path, now.elapsed())
            };
            cancel.check()?;

            debug!(
                "chunk; range: {near_m}..{far_m}, len: {}, fetch_exec: {fetch_runtime:?}",
                path.len()
            );

            for sample in &path {
                let distance_m = surface_distance(origin, sample.location);
                if let Some(hit) = state.observe(sample, distance_m) {
                    return Ok(SearchOutcome::Intersection(hit));
                }
            }

            near_m = far_m;
            far_m += CHUNK_LENGTH;
        }

        Ok(SearchOutcome::Fallback(state.fallback()))
    }
}
