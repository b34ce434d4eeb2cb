use crate::GeodesyError;
use geo::geometry::{Coord, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated latitude/longitude pair, in degrees.
///
/// Construction fails for anything outside `|lat| <= 90` and
/// `|lon| <= 180` (including NaN); out of range values are never
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeodesyError> {
        if latitude.abs() <= 90.0 && longitude.abs() <= 180.0 {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(GeodesyError::InvalidCoordinate {
                lat: latitude,
                lon: longitude,
            })
        }
    }

    /// Builds a point from computed (not user supplied) angles.
    ///
    /// Longitude is wrapped into `[-180, 180]`; latitude only absorbs
    /// rounding past the poles.
    pub(crate) fn normalized(latitude: f64, longitude: f64) -> Self {
        let longitude = if longitude.abs() > 180.0 {
            (longitude + 540.0).rem_euclid(360.0) - 180.0
        } else {
            longitude
        };
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude,
        }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Point::new(point.longitude, point.latitude)
    }
}

impl TryFrom<Point<f64>> for GeoPoint {
    type Error = GeodesyError;

    fn try_from(point: Point<f64>) -> Result<Self, Self::Error> {
        Self::new(point.y(), point.x())
    }
}

impl TryFrom<Coord<f64>> for GeoPoint {
    type Error = GeodesyError;

    fn try_from(Coord { x, y }: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(y, x)
    }
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeodesyError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}
