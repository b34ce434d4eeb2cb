//! # Elevation
//!
//! `elevation` provides terrain height lookups for single points and
//! for evenly sampled great-circle paths.

mod error;
mod google;
mod http;
mod provider;
mod radial;
mod retry;

pub use crate::{
    error::ProviderError,
    google::{ElevationConfig, GoogleElevation, DEFAULT_BASE_URL},
    http::{HttpClient, HttpResponse, ReqwestClient},
    provider::{path_sample_count, ElevationProvider, ElevationSample, MAX_PATH_SAMPLES},
    radial::RadialTerrain,
    retry::RetryPolicy,
};
pub use geodesy;
