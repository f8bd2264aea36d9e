//! Download of the platform API spec

use crate::region::Region;
use crate::transport::{ReqwestTransport, SpecTransport, TransportResponse};
use gc_validator_gen_common::{GeneratorError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default timeout of each HTTP request
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Default cap on the number of requests spent following redirects
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Path of the Swagger document on a region's API server
pub const SPEC_PATH: &str = "/api/v2/docs/swagger";

/// Loader settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Timeout of each HTTP request
    pub timeout: Duration,
    /// Maximum number of requests, redirects included
    pub max_redirects: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl LoaderConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(GeneratorError::TimeoutOutOfBounds);
        }
        Ok(())
    }
}

/// Downloads the platform API Swagger document of a region
///
/// # Example
/// ```no_run
/// use gc_validator_gen_loader::{LoaderConfig, Region, SpecLoader};
///
/// let loader = SpecLoader::new(LoaderConfig::default()).unwrap();
/// let spec = loader.load(Region::UsEast1).unwrap();
/// assert!(spec.get("definitions").is_some());
/// ```
pub struct SpecLoader<T: SpecTransport = ReqwestTransport> {
    transport: T,
    config: LoaderConfig,
}

impl SpecLoader<ReqwestTransport> {
    /// Loader backed by a real HTTP client
    pub fn new(config: LoaderConfig) -> Result<Self> {
        Self::with_transport(ReqwestTransport::new()?, config)
    }
}

impl<T: SpecTransport> SpecLoader<T> {
    pub fn with_transport(transport: T, config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// URL of the Swagger document for a region
    pub fn spec_url(region: Region) -> Result<Url> {
        let api = region.urls()?.api;
        api.join(SPEC_PATH)
            .map_err(|e| GeneratorError::Parse(format!("Invalid spec URL: {}", e)))
    }

    /// Fetch the spec of a region
    pub fn load(&self, region: Region) -> Result<Value> {
        info!(region = %region, "loading platform API specification");
        self.load_from_url(Self::spec_url(region)?)
    }

    /// Fetch the spec from an explicit URL, following `301` redirects
    pub fn load_from_url(&self, url: Url) -> Result<Value> {
        let mut url = url;

        for _ in 0..self.config.max_redirects {
            debug!(url = %url, "requesting specification");
            let response = self.transport.get(&url, self.config.timeout)?;

            match response.status {
                301 => {
                    let location = response.location.as_deref().ok_or_else(|| {
                        GeneratorError::Protocol(
                            "No location specified in the HTTP response headers".to_string(),
                        )
                    })?;
                    let next = url.join(location).map_err(|e| {
                        GeneratorError::Protocol(format!(
                            "Invalid redirect location {}: {}",
                            location, e
                        ))
                    })?;
                    info!(from = %url, to = %next, "following redirect");
                    url = next;
                },
                200 => return parse_spec_response(&response),
                status => {
                    return Err(GeneratorError::Protocol(format!(
                        "Unexpected HTTP response status code {}",
                        status
                    )))
                },
            }
        }

        Err(GeneratorError::Protocol(
            "Too many HTTP response redirections".to_string(),
        ))
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

fn parse_spec_response(response: &TransportResponse) -> Result<Value> {
    let content_type = response.content_type.as_deref().ok_or_else(|| {
        GeneratorError::Protocol("No content type specified in the HTTP response headers".to_string())
    })?;

    if !content_type
        .trim()
        .to_lowercase()
        .contains("application/json")
    {
        return Err(GeneratorError::Protocol(format!(
            "Invalid HTTP response content type {}, expected \"application/json\"",
            content_type
        )));
    }

    let spec: Value = serde_json::from_slice(&response.body).map_err(|e| {
        GeneratorError::Protocol(format!("Could not parse HTTP response body as JSON: {}", e))
    })?;

    for key in ["paths", "definitions"] {
        if spec.get(key).is_none() {
            return Err(GeneratorError::Protocol(format!(
                "The platform API specification is missing the \"{}\" property",
                key
            )));
        }
    }

    Ok(spec)
}
