//! Google Maps Elevation API client.

use crate::{
    http::{HttpClient, ReqwestClient},
    path_sample_count,
    retry::{Attempt, RetryPolicy},
    ElevationProvider, ElevationSample, ProviderError,
};
use geodesy::{GeoPoint, GeodesyError};
use log::debug;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/elevation";

/// Settings for [`GoogleElevation`].
#[derive(Clone)]
pub struct ElevationConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ElevationConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }

    /// Endpoint prefix; `/json` is appended to it (defaults to
    /// [`DEFAULT_BASE_URL`]).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout (defaults to 30 s).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Rate-limit handling (defaults to [`RetryPolicy::default`]).
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for ElevationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevationConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// [`ElevationProvider`] backed by the Google Maps Elevation API.
pub struct GoogleElevation<H = ReqwestClient> {
    config: ElevationConfig,
    client: H,
}

impl GoogleElevation<ReqwestClient> {
    pub fn new(config: ElevationConfig) -> Result<Self, ProviderError> {
        let client = ReqwestClient::new(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl<H: HttpClient> GoogleElevation<H> {
    pub fn with_client(config: ElevationConfig, client: H) -> Self {
        Self { config, client }
    }

    fn url(&self, query: &[(&str, String)]) -> Result<Url, ProviderError> {
        let endpoint = format!("{}/json", self.config.base_url.trim_end_matches('/'));
        let params = std::iter::once(("key", self.config.api_key.as_str()))
            .chain(query.iter().map(|(k, v)| (*k, v.as_str())));
        Url::parse_with_params(&endpoint, params)
            .map_err(|e| ProviderError::Unavailable(format!("invalid endpoint {endpoint}: {e}")))
    }

    /// Issues `url`, retrying while the service reports a rate limit.
    fn fetch(&self, url: &Url) -> Result<Vec<ElevationSample>, ProviderError> {
        self.config.retry.run(|| self.fetch_once(url))
    }

    fn fetch_once(&self, url: &Url) -> Result<Attempt<Vec<ElevationSample>>, ProviderError> {
        let response = self.client.get(url.as_str())?;
        if response.status == 429 {
            return Ok(Attempt::RateLimited);
        }
        if !(200..300).contains(&response.status) {
            return Err(ProviderError::Unavailable(format!(
                "HTTP {}",
                response.status
            )));
        }
        if response.body.is_empty() {
            return Err(ProviderError::NoData);
        }

        let ElevationResponse {
            status,
            results,
            error_message,
        } = serde_json::from_slice(&response.body)?;

        match status.as_str() {
            "OK" => results
                .into_iter()
                .map(|ElevationResult { elevation, location }| {
                    GeoPoint::new(location.lat, location.lng).map(|location| ElevationSample {
                        location,
                        elevation_m: elevation,
                    })
                })
                .collect::<Result<Vec<_>, GeodesyError>>()
                .map_err(ProviderError::from)
                .map(Attempt::Ready),
            "OVER_QUERY_LIMIT" => Ok(Attempt::RateLimited),
            _ => Err(ProviderError::Unavailable(match error_message {
                Some(msg) => format!("{status}: {msg}"),
                None => status,
            })),
        }
    }
}

impl<H: HttpClient> ElevationProvider for GoogleElevation<H> {
    fn point_elevation(&self, point: GeoPoint) -> Result<f64, ProviderError> {
        let url = self.url(&[("locations", point.to_string())])?;
        debug!("point elevation; location: {point}");
        self.fetch(&url)?
            .first()
            .map(|sample| sample.elevation_m)
            .ok_or(ProviderError::NoData)
    }

    fn path_elevation(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        sample_spacing_m: f64,
    ) -> Result<Vec<ElevationSample>, ProviderError> {
        let samples = path_sample_count(from, to, sample_spacing_m)?;
        let url = self.url(&[
            ("path", format!("{from}|{to}")),
            ("samples", samples.to_string()),
        ])?;
        debug!("path elevation; from: {from}, to: {to}, samples: {samples}");
        let path = self.fetch(&url)?;
        if path.is_empty() {
            Err(ProviderError::NoData)
        } else {
            Ok(path)
        }
    }
}

#[derive(Deserialize)]
struct ElevationResponse {
    status: String,
    #[serde(default)]
    results: Vec<ElevationResult>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct ElevationResult {
    elevation: f64,
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}
