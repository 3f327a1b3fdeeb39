//! Connection parameters shared by every call of a client

use crate::constants::{
    DEFAULT_NODE_URL, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_UPLOAD_TIMEOUT_SECS,
};
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// `timeout` is capped at [`MAX_TIMEOUT_SECS`]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: timeout.min(Duration::from_secs(MAX_TIMEOUT_SECS)),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout applied to every call that does not override it
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Timeout for uploads: twice the default, never below two minutes
    pub fn upload_timeout(&self) -> Duration {
        self.timeout
            .saturating_mul(2)
            .max(Duration::from_secs(MIN_UPLOAD_TIMEOUT_SECS))
    }

    /// Absolute URL for an endpoint path, each segment percent-encoded
    pub fn url_for(&self, endpoint: &str) -> String {
        let path = endpoint.trim_start_matches('/');
        let mut url = match Url::parse(&self.base_url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            // Left for the transport to reject
            _ => return format!("{}/{}", self.base_url, path),
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
        }
        url.to_string()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}
