use crate::{path_sample_count, ElevationProvider, ElevationSample, ProviderError};
use geodesy::{surface_distance, GeoPoint, GreatCircleIter};

/// Synthetic terrain whose elevation depends only on the great-circle
/// distance from an anchor point.
///
/// Useful for exercising searches without a network: a flat plain is
/// `RadialTerrain::new(anchor, |_| 0.0)`, a ramp is
/// `RadialTerrain::new(anchor, |d| d * 0.02)`.
pub struct RadialTerrain<F> {
    anchor: GeoPoint,
    profile: F,
}

impl<F> RadialTerrain<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(anchor: GeoPoint, profile: F) -> Self {
        Self { anchor, profile }
    }

    fn sample(&self, location: GeoPoint) -> ElevationSample {
        ElevationSample {
            location,
            elevation_m: (self.profile)(surface_distance(self.anchor, location)),
        }
    }
}

impl<F> ElevationProvider for RadialTerrain<F>
where
    F: Fn(f64) -> f64,
{
    fn point_elevation(&self, point: GeoPoint) -> Result<f64, ProviderError> {
        Ok(self.sample(point).elevation_m)
    }

    fn path_elevation(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        sample_spacing_m: f64,
    ) -> Result<Vec<ElevationSample>, ProviderError> {
        let samples = path_sample_count(from, to, sample_spacing_m)?;
        Ok(GreatCircleIter::new(from, to, samples)
            .map(|location| self.sample(location))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::RadialTerrain;
    use crate::{ElevationProvider, ProviderError};
    use approx::assert_relative_eq;
    use geodesy::{destination_point, surface_distance, GeoPoint};

    fn anchor() -> GeoPoint {
        GeoPoint::new(0.0, 0.0).unwrap()
    }

    #[test]
    fn test_point_follows_profile() {
        let ramp = RadialTerrain::new(anchor(), |d| d * 0.02);
        let at = destination_point(anchor(), 5_000.0, 1.0).unwrap();
        assert_relative_eq!(ramp.point_elevation(at).unwrap(), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_path_is_ordered_and_spaced() {
        let ramp = RadialTerrain::new(anchor(), |d| d * 0.02);
        let from = destination_point(anchor(), 20.0, 0.0).unwrap();
        let to = destination_point(anchor(), 5_125.0, 0.0).unwrap();
        let path = ramp.path_elevation(from, to, 10.0).unwrap();

        assert_eq!(path.len(), 510);
        assert_eq!(path[0].location, from);
        assert_eq!(path[509].location, to);
        let distances: Vec<f64> = path
            .iter()
            .map(|s| surface_distance(anchor(), s.location))
            .collect();
        assert!(distances.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(path[509].elevation_m, 102.5, epsilon = 1e-6);
    }

    #[test]
    fn test_path_respects_sample_limit() {
        let flat = RadialTerrain::new(anchor(), |_| 0.0);
        let to = destination_point(anchor(), 10_000.0, 0.0).unwrap();
        assert!(matches!(
            flat.path_elevation(anchor(), to, 10.0),
            Err(ProviderError::PathTooLong { .. })
        ));
    }
}
