//! Product service (enrichment) configuration types.

use serde::Deserialize;

/// Product service endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProductServiceConfig {
    /// Base URL of the product service.
    pub base_url: String,
    /// Timeout for the bulk lookup round trip, in seconds.
    pub timeout_secs: u64,
}

impl Default for ProductServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://product:8001".to_string(),
            timeout_secs: 10,
        }
    }
}
