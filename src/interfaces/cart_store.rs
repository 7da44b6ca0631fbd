//! CartStore trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Cart, LineItem};

/// Errors surfaced by cart persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cart already exists: user_id={0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Interface for cart persistence.
///
/// One document per `user_id`; every operation is single-document atomic.
/// Insert-or-merge semantics live in the orchestrator, not here: `insert`
/// fails with [`StorageError::Conflict`] when a document already exists.
///
/// Implementations:
/// - `MongoCartStore`: MongoDB storage
/// - `MockCartStore`: In-memory mock for testing
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Fetch the cart document for a user, if any.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Cart>>;

    /// Insert a fresh cart document.
    ///
    /// Fails with [`StorageError::Conflict`] if a document for this user
    /// already exists (unique index on `user_id`).
    async fn insert(&self, cart: &Cart) -> Result<()>;

    /// Replace the full item list and `updated_at` in one atomic write.
    ///
    /// Returns whether a document matched.
    async fn replace_items(
        &self,
        user_id: &str,
        items: &[LineItem],
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Atomically strip all items with the given product id.
    ///
    /// Returns whether the document was modified (i.e. something was
    /// actually removed).
    async fn remove_items_matching(&self, user_id: &str, product_id: i64) -> Result<bool>;

    /// Atomic single-field quantity update on a matching line item.
    ///
    /// Returns whether a document with that user and item matched. Never
    /// creates a cart or an item.
    async fn set_item_quantity(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Delete the whole cart document. Returns the number deleted.
    async fn delete_by_user(&self, user_id: &str) -> Result<u64>;
}
