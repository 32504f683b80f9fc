//! Client configuration.

use crate::envelope::EnvelopePolicy;

/// Where the clinic server listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin without a trailing slash, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub envelope: EnvelopePolicy,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            envelope: EnvelopePolicy::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
