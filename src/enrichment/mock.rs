//! Mock product lookup for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::interfaces::{LookupError, ProductLookup};
use crate::model::ProductSnapshot;

/// Mock lookup serving snapshots from memory.
///
/// Records every requested id set so tests can assert fan-out behavior.
#[derive(Default)]
pub struct MockProductLookup {
    products: RwLock<HashMap<i64, ProductSnapshot>>,
    fail: RwLock<bool>,
    requests: RwLock<Vec<Vec<i64>>>,
}

impl MockProductLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, snapshot: ProductSnapshot) {
        self.products.write().await.insert(snapshot.id, snapshot);
    }

    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    /// Id sets requested so far, in call order.
    pub async fn requests(&self) -> Vec<Vec<i64>> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl ProductLookup for MockProductLookup {
    async fn bulk_fetch(
        &self,
        product_ids: &[i64],
    ) -> Result<HashMap<i64, ProductSnapshot>, LookupError> {
        if *self.fail.read().await {
            return Err(LookupError::Upstream("injected lookup failure".to_string()));
        }

        self.requests.write().await.push(product_ids.to_vec());

        let products = self.products.read().await;
        Ok(product_ids
            .iter()
            .filter_map(|id| products.get(id).map(|p| (*id, p.clone())))
            .collect())
    }
}
