//! MongoDB CartStore implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{doc, to_bson};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use crate::interfaces::{CartStore, Result, StorageError};
use crate::model::{Cart, LineItem};

/// MongoDB implementation of CartStore.
///
/// One document per user in a single collection; serde maps [`Cart`]
/// directly onto the document shape.
pub struct MongoCartStore {
    carts: Collection<Cart>,
}

impl MongoCartStore {
    /// Create a new MongoDB cart store.
    pub async fn new(client: &Client, database_name: &str, collection_name: &str) -> Result<Self> {
        let carts = client.database(database_name).collection(collection_name);

        let store = Self { carts };
        store.init().await?;

        Ok(store)
    }

    /// Initialize indexes.
    ///
    /// The unique index on `user_id` is what makes insert-conflict
    /// semantics real: a racing first insert surfaces duplicate-key 11000
    /// instead of a second document.
    async fn init(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.carts.create_index(index).await?;

        Ok(())
    }
}

#[async_trait]
impl CartStore for MongoCartStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Cart>> {
        Ok(self.carts.find_one(doc! { "user_id": user_id }).await?)
    }

    async fn insert(&self, cart: &Cart) -> Result<()> {
        self.carts.insert_one(cart).await.map_err(|e| {
            if let mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(
                ref write_err,
            )) = *e.kind
            {
                if write_err.code == 11000 {
                    // Duplicate key - a concurrent first add won the race
                    return StorageError::Conflict(cart.user_id.clone());
                }
            }
            StorageError::from(e)
        })?;

        Ok(())
    }

    async fn replace_items(
        &self,
        user_id: &str,
        items: &[LineItem],
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = self
            .carts
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": { "items": to_bson(&items)?, "updated_at": to_bson(&updated_at)? } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn remove_items_matching(&self, user_id: &str, product_id: i64) -> Result<bool> {
        let result = self
            .carts
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$pull": { "items": { "product_id": product_id } } },
            )
            .await?;

        Ok(result.modified_count > 0)
    }

    async fn set_item_quantity(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        // Positional update: matches the cart and the item in one filter,
        // so a missing item means matched_count == 0.
        let result = self
            .carts
            .update_one(
                doc! { "user_id": user_id, "items.product_id": product_id },
                doc! { "$set": {
                    "items.$.quantity": quantity as i64,
                    "updated_at": to_bson(&updated_at)?,
                } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let result = self.carts.delete_many(doc! { "user_id": user_id }).await?;

        Ok(result.deleted_count)
    }
}
