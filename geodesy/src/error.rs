use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeodesyError {
    #[error("invalid coordinate lat: {lat}, lon: {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("non-finite value for '{0}'")]
    NonFinite(&'static str),
}
