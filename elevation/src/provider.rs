use crate::ProviderError;
use geodesy::{surface_distance, GeoPoint};
use std::sync::Arc;

/// Most samples a single path query may request.
pub const MAX_PATH_SAMPLES: usize = 512;

/// Ground elevation at a single location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSample {
    pub location: GeoPoint,

    /// Meters above mean sea level (negative below).
    pub elevation_m: f64,
}

/// A source of terrain elevation.
///
/// Implementations handle transient conditions (rate limiting)
/// internally; any error they return is final.
pub trait ElevationProvider {
    /// Returns the ground elevation at `point`, in meters.
    fn point_elevation(&self, point: GeoPoint) -> Result<f64, ProviderError>;

    /// Returns evenly spaced samples along the great circle from `from`
    /// to `to`, ordered by increasing distance from `from`.
    ///
    /// The number of samples is given by [`path_sample_count`].
    fn path_elevation(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        sample_spacing_m: f64,
    ) -> Result<Vec<ElevationSample>, ProviderError>;
}

impl<P: ElevationProvider + ?Sized> ElevationProvider for &P {
    fn point_elevation(&self, point: GeoPoint) -> Result<f64, ProviderError> {
        (**self).point_elevation(point)
    }

    fn path_elevation(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        sample_spacing_m: f64,
    ) -> Result<Vec<ElevationSample>, ProviderError> {
        (**self).path_elevation(from, to, sample_spacing_m)
    }
}

impl<P: ElevationProvider + ?Sized> ElevationProvider for Arc<P> {
    fn point_elevation(&self, point: GeoPoint) -> Result<f64, ProviderError> {
        (**self).point_elevation(point)
    }

    fn path_elevation(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        sample_spacing_m: f64,
    ) -> Result<Vec<ElevationSample>, ProviderError> {
        (**self).path_elevation(from, to, sample_spacing_m)
    }
}

/// Returns how many samples a path query from `from` to `to` at
/// `sample_spacing_m` asks for.
///
/// The count is `floor(distance / spacing)`, but never less than two
/// so that both endpoints are covered. Counts over
/// [`MAX_PATH_SAMPLES`] are rejected.
pub fn path_sample_count(
    from: GeoPoint,
    to: GeoPoint,
    sample_spacing_m: f64,
) -> Result<usize, ProviderError> {
    if !(sample_spacing_m.is_finite() && sample_spacing_m > 0.0) {
        return Err(ProviderError::InvalidSpacing(sample_spacing_m));
    }
    let samples = (surface_distance(from, to) / sample_spacing_m).floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let requested = samples as usize;
    if requested > MAX_PATH_SAMPLES {
        Err(ProviderError::PathTooLong {
            requested,
            max: MAX_PATH_SAMPLES,
        })
    } else {
        Ok(requested.max(2))
    }
}
