//! ProductLookup trait definition.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::ProductSnapshot;

/// Errors surfaced by the product lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network failure, non-success status, or malformed payload from the
    /// product service. Carries a short cause string only.
    #[error("{0}")]
    Upstream(String),
}

/// Read-time join against the product service.
///
/// Implementations:
/// - `HttpProductLookup`: bulk HTTP lookup against the product service
/// - `MockProductLookup`: in-memory fake for testing
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Resolve a set of product ids to snapshots in one round trip.
    ///
    /// Ids absent from the upstream payload are simply missing from the
    /// returned map; the caller substitutes defaults. An empty id set must
    /// short-circuit without a network call.
    async fn bulk_fetch(
        &self,
        product_ids: &[i64],
    ) -> std::result::Result<HashMap<i64, ProductSnapshot>, LookupError>;
}
