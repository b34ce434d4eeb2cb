use geodesy::GeodesyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    InvalidCoordinate(#[from] GeodesyError),

    #[error("path requests {requested} samples, limit is {max}")]
    PathTooLong { requested: usize, max: usize },

    #[error("invalid sample spacing {0} m")]
    InvalidSpacing(f64),

    #[error("provider returned no samples")]
    NoData,

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("still rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
