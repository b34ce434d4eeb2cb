use crate::SearchError;
use geodesy::GeoPoint;
use std::f64::consts::FRAC_PI_2;

/// Where the line of sight starts and which way it points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    position: GeoPoint,

    /// Meters above mean sea level.
    altitude_m: f64,

    /// Always stored as a non-negative magnitude.
    vertical_uncertainty_m: f64,

    /// Radians above the horizontal.
    pitch_rad: f64,

    /// Radians clockwise from north.
    bearing_rad: f64,
}

impl Observer {
    pub fn builder() -> ObserverBuilder {
        ObserverBuilder {
            position: None,
            altitude_m: None,
            vertical_uncertainty_m: 0.0,
            pitch_rad: 0.0,
            bearing_rad: None,
        }
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn altitude_m(&self) -> f64 {
        self.altitude_m
    }

    pub fn vertical_uncertainty_m(&self) -> f64 {
        self.vertical_uncertainty_m
    }

    pub fn pitch_rad(&self) -> f64 {
        self.pitch_rad
    }

    pub fn bearing_rad(&self) -> f64 {
        self.bearing_rad
    }

    /// Altitude the sight line starts from: the reported altitude
    /// raised by the vertical uncertainty.
    pub fn adjusted_altitude_m(&self) -> f64 {
        self.altitude_m + self.vertical_uncertainty_m
    }
}

pub struct ObserverBuilder {
    /// Observer location (required).
    position: Option<GeoPoint>,

    /// Meters above mean sea level (required).
    altitude_m: Option<f64>,

    /// Meters, sign ignored (defaults to 0).
    vertical_uncertainty_m: f64,

    /// Radians, positive up (defaults to 0).
    pitch_rad: f64,

    /// Radians clockwise from north (required).
    bearing_rad: Option<f64>,
}

impl ObserverBuilder {
    /// Observer location (required).
    #[must_use]
    pub fn position(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }

    /// Meters above mean sea level (required).
    #[must_use]
    pub fn altitude(mut self, meters: f64) -> Self {
        self.altitude_m = Some(meters);
        self
    }

    /// Vertical accuracy of `altitude`, in meters (defaults to 0).
    ///
    /// Only the magnitude is used.
    #[must_use]
    pub fn vertical_uncertainty(mut self, meters: f64) -> Self {
        self.vertical_uncertainty_m = meters;
        self
    }

    /// Line of sight angle above horizontal, in radians (defaults to
    /// 0). Must lie strictly between -π/2 and π/2.
    #[must_use]
    pub fn pitch(mut self, radians: f64) -> Self {
        self.pitch_rad = radians;
        self
    }

    /// Compass direction in radians, 0 = north, clockwise (required).
    #[must_use]
    pub fn bearing(mut self, radians: f64) -> Self {
        self.bearing_rad = Some(radians);
        self
    }

    pub fn build(&self) -> Result<Observer, SearchError> {
        let position = self.position.ok_or(SearchError::Builder("position"))?;
        let altitude_m = self.altitude_m.ok_or(SearchError::Builder("altitude"))?;
        let bearing_rad = self.bearing_rad.ok_or(SearchError::Builder("bearing"))?;

        if !altitude_m.is_finite() {
            return Err(SearchError::InvalidObserver("altitude"));
        }
        if !self.vertical_uncertainty_m.is_finite() {
            return Err(SearchError::InvalidObserver("vertical_uncertainty"));
        }
        if !bearing_rad.is_finite() {
            return Err(SearchError::InvalidObserver("bearing"));
        }
        if self.pitch_rad.is_nan() || self.pitch_rad.abs() >= FRAC_PI_2 {
            return Err(SearchError::InvalidObserver("pitch"));
        }

        Ok(Observer {
            position,
            altitude_m,
            vertical_uncertainty_m: self.vertical_uncertainty_m.abs(),
            pitch_rad: self.pitch_rad,
            bearing_rad,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Observer, SearchError};
    use approx::assert_relative_eq;
    use geodesy::GeoPoint;

    fn origin() -> GeoPoint {
        GeoPoint::new(0.0, 0.0).unwrap()
    }

    #[test]
    fn test_required_fields() {
        let err = Observer::builder().altitude(1.0).bearing(0.0).build();
        assert!(matches!(err, Err(SearchError::Builder("position"))));
        let err = Observer::builder().position(origin()).bearing(0.0).build();
        assert!(matches!(err, Err(SearchError::Builder("altitude"))));
        let err = Observer::builder().position(origin()).altitude(1.0).build();
        assert!(matches!(err, Err(SearchError::Builder("bearing"))));
    }

    #[test]
    fn test_defaults() {
        let observer = Observer::builder()
            .position(origin())
            .altitude(100.0)
            .bearing(1.0)
            .build()
            .unwrap();
        assert_relative_eq!(observer.pitch_rad(), 0.0);
        assert_relative_eq!(observer.adjusted_altitude_m(), 100.0);
    }

    #[test]
    fn test_uncertainty_sign_is_ignored() {
        let observer = Observer::builder()
            .position(origin())
            .altitude(100.0)
            .vertical_uncertainty(-15.0)
            .bearing(0.0)
            .build()
            .unwrap();
        assert_relative_eq!(observer.vertical_uncertainty_m(), 15.0);
        assert_relative_eq!(observer.adjusted_altitude_m(), 115.0);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let base = || {
            Observer::builder()
                .position(origin())
                .altitude(100.0)
                .bearing(0.0)
        };
        assert!(matches!(
            base().pitch(std::f64::consts::FRAC_PI_2).build(),
            Err(SearchError::InvalidObserver("pitch"))
        ));
        assert!(matches!(
            base().pitch(f64::NAN).build(),
            Err(SearchError::InvalidObserver("pitch"))
        ));
        assert!(matches!(
            base().altitude(f64::INFINITY).build(),
            Err(SearchError::InvalidObserver("altitude"))
        ));
        assert!(matches!(
            base().bearing(f64::NAN).build(),
            Err(SearchError::InvalidObserver("bearing"))
        ));
    }
}
