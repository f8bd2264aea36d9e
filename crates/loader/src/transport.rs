//! HTTP transport used to download the spec

use gc_validator_gen_common::{GeneratorError, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

/// The parts of an HTTP response the loader looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs a single GET without following redirects
#[cfg_attr(test, mockall::automock)]
pub trait SpecTransport {
    fn get(&self, url: &Url, timeout: Duration) -> Result<TransportResponse>;
}

/// [`SpecTransport`] backed by a blocking `reqwest` client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .user_agent(concat!("gc-validator-gen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeneratorError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl SpecTransport for ReqwestTransport {
    fn get(&self, url: &Url, timeout: Duration) -> Result<TransportResponse> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .map_err(|e| GeneratorError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let location = header_value(response.headers(), LOCATION);
        let content_type = header_value(response.headers(), CONTENT_TYPE);
        let body = response
            .bytes()
            .map_err(|e| GeneratorError::Transport(format!("Failed to read response body: {}", e)))?
            .to_vec();

        Ok(TransportResponse {
            status,
            location,
            content_type,
            body,
        })
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
