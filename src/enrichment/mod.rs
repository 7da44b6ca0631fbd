//! Product enrichment client.
//!
//! Bulk-fetches product/brand snapshots from the product service in a
//! single bounded round trip. Any downstream failure is translated into
//! [`LookupError::Upstream`] with a short cause string; partial results
//! (ids missing from the payload) are not an error.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProductServiceConfig;
use crate::interfaces::{LookupError, ProductLookup};
use crate::model::ProductSnapshot;

pub mod mock;

pub use mock::MockProductLookup;

#[derive(Serialize)]
struct BulkRequest<'a> {
    product_ids: &'a [i64],
}

#[derive(Deserialize)]
struct BulkResponse {
    #[serde(default)]
    products: Vec<ProductSnapshot>,
}

/// HTTP implementation of [`ProductLookup`].
///
/// One `POST {base_url}/products/bulk` per read, no retries. The reqwest
/// client is built once and reused across requests.
pub struct HttpProductLookup {
    client: reqwest::Client,
    bulk_url: String,
}

impl HttpProductLookup {
    /// Build the client from configuration.
    pub fn new(config: &ProductServiceConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            bulk_url: format!(
                "{}/products/bulk",
                config.base_url.trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl ProductLookup for HttpProductLookup {
    async fn bulk_fetch(
        &self,
        product_ids: &[i64],
    ) -> Result<HashMap<i64, ProductSnapshot>, LookupError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        debug!(count = product_ids.len(), "Bulk product lookup");

        let response = self
            .client
            .post(&self.bulk_url)
            .json(&BulkRequest { product_ids })
            .send()
            .await
            .map_err(|e| LookupError::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| LookupError::Upstream(e.to_string()))?;

        let body: BulkResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Upstream(e.to_string()))?;

        Ok(body.products.into_iter().map(|p| (p.id, p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProductServiceConfig {
        ProductServiceConfig {
            // Unroutable on purpose: nothing below may touch the network
            base_url: "http://127.0.0.1:1/".to_string(),
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_empty_id_set_short_circuits() {
        let lookup = HttpProductLookup::new(&config()).unwrap();
        let snapshots = lookup.bulk_fetch(&[]).await.unwrap();
        assert!(snapshots.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_upstream_error() {
        let lookup = HttpProductLookup::new(&config()).unwrap();
        let err = lookup.bulk_fetch(&[1]).await.unwrap_err();
        assert!(matches!(err, LookupError::Upstream(_)));
    }

    #[test]
    fn test_bulk_url_normalizes_trailing_slash() {
        let lookup = HttpProductLookup::new(&config()).unwrap();
        assert_eq!(lookup.bulk_url, "http://127.0.0.1:1/products/bulk");
    }
}
