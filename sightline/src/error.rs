use elevation::ProviderError;
use geodesy::GeodesyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("invalid observer parameter '{0}'")]
    InvalidObserver(&'static str),

    #[error("{0}")]
    InvalidCoordinate(#[from] GeodesyError),

    #[error("elevation unavailable: {0}")]
    ElevationUnavailable(#[source] ProviderError),

    #[error("search cancelled")]
    Cancelled,
}
