//! Spec acquisition for gc-validator-gen
//!
//! Resolves Genesys Cloud regions to their base URLs and downloads the
//! platform API Swagger document from a region's API server.
//!
//! # Examples
//!
//! ```no_run
//! use gc_validator_gen_loader::{LoaderConfig, Region, SpecLoader};
//! use std::time::Duration;
//!
//! let region: Region = "eu-west-1".parse().expect("known region");
//! let loader = SpecLoader::new(LoaderConfig::default().with_timeout(Duration::from_secs(30)))
//!     .expect("HTTP client");
//! let spec = loader.load(region).expect("spec download");
//!
//! println!("{} definitions", spec["definitions"].as_object().map_or(0, |d| d.len()));
//! ```

mod loader;
mod region;
mod transport;

pub use loader::{
    LoaderConfig, SpecLoader, DEFAULT_HTTP_TIMEOUT, DEFAULT_MAX_REDIRECTS, SPEC_PATH,
};
pub use region::{Region, RegionUrls};
pub use transport::{ReqwestTransport, SpecTransport, TransportResponse};
