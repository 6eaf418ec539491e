//! Where listing pages come from: the blocking HTTP client, or anything else that
//! can answer a URL with a [`Listing`].

use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::MirrorError;
use crate::utils::config::HttpConsts;

use super::listing::Listing;

/// Fetches one listing page per call. Implementations must not retry.
pub trait MetadataSource {
    fn fetch(&self, url: &str) -> Result<Listing, MirrorError>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn fetch(&self, url: &str) -> Result<Listing, MirrorError> {
        (**self).fetch(url)
    }
}

/// Storage API over HTTPS. Unauthenticated; one GET per page.
pub struct HttpSource {
    client: Client,
}

// Map transport / status errors to a short reason string.
fn describe_http_error(error: &reqwest::Error) -> String {
    if let Some(status) = error.status() {
        format!("HTTP status {status}")
    } else if error.is_timeout() {
        format!("request timeout: {error}")
    } else if error.is_connect() {
        format!("connection error: {error}")
    } else {
        format!("HTTP error: {error}")
    }
}

impl HttpSource {
    pub fn new(timeout_secs: u64) -> Result<Self, MirrorError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(HttpConsts::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MirrorError::remote("<client>", format!("build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl MetadataSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Listing, MirrorError> {
        debug!("GET {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| MirrorError::remote(url, describe_http_error(&e)))?;
        Listing::from_json(url, &body)
    }
}
