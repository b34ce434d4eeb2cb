//! HTTP transport seam.

use crate::ProviderError;
use std::time::Duration;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Blocking HTTP GET.
///
/// Lets [`GoogleElevation`](crate::GoogleElevation) be driven by a
/// scripted client in tests.
pub trait HttpClient: Send + Sync {
    /// Performs a GET on `url`.
    ///
    /// Only failures to complete the exchange are errors; non-2xx
    /// statuses are returned in the response.
    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError>;
}

/// [`HttpClient`] backed by `reqwest`'s blocking client.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("seethere/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProviderError::Unavailable(format!("request failed: {}", e.without_url())))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| ProviderError::Unavailable(format!("failed to read response: {e}")))?
            .to_vec();
        Ok(HttpResponse { status, body })
    }
}
