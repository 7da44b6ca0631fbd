//! Mock storage implementation for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::interfaces::{CartStore, Result, StorageError};
use crate::merge;
use crate::model::{Cart, LineItem};

/// Mock cart store that keeps documents in memory.
///
/// Failure toggles simulate an unreachable store; `stage_racing_insert`
/// simulates losing the first-add race to a concurrent writer.
#[derive(Default)]
pub struct MockCartStore {
    carts: RwLock<HashMap<String, Cart>>,
    fail_on_read: RwLock<bool>,
    fail_on_write: RwLock<bool>,
    racing_insert: RwLock<Option<Cart>>,
}

impl MockCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_read(&self, fail: bool) {
        *self.fail_on_read.write().await = fail;
    }

    pub async fn set_fail_on_write(&self, fail: bool) {
        *self.fail_on_write.write().await = fail;
    }

    /// Stage a cart that a concurrent writer inserts "between" this
    /// store's find and insert: the next `insert` call commits the staged
    /// cart and reports a conflict to the caller.
    pub async fn stage_racing_insert(&self, cart: Cart) {
        *self.racing_insert.write().await = Some(cart);
    }

    /// Direct read of the stored document, bypassing failure toggles.
    pub async fn stored(&self, user_id: &str) -> Option<Cart> {
        self.carts.read().await.get(user_id).cloned()
    }

    async fn check_read(&self) -> Result<()> {
        if *self.fail_on_read.read().await {
            return Err(StorageError::Unavailable("injected read failure".to_string()));
        }
        Ok(())
    }

    async fn check_write(&self) -> Result<()> {
        if *self.fail_on_write.read().await {
            return Err(StorageError::Unavailable("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CartStore for MockCartStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Cart>> {
        self.check_read().await?;
        Ok(self.carts.read().await.get(user_id).cloned())
    }

    async fn insert(&self, cart: &Cart) -> Result<()> {
        self.check_write().await?;

        let mut carts = self.carts.write().await;

        if let Some(staged) = self.racing_insert.write().await.take() {
            let user_id = staged.user_id.clone();
            carts.insert(user_id.clone(), staged);
            return Err(StorageError::Conflict(user_id));
        }

        if carts.contains_key(&cart.user_id) {
            return Err(StorageError::Conflict(cart.user_id.clone()));
        }
        carts.insert(cart.user_id.clone(), cart.clone());
        Ok(())
    }

    async fn replace_items(
        &self,
        user_id: &str,
        items: &[LineItem],
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.check_write().await?;
        let mut carts = self.carts.write().await;
        match carts.get_mut(user_id) {
            Some(cart) => {
                cart.items = items.to_vec();
                cart.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_items_matching(&self, user_id: &str, product_id: i64) -> Result<bool> {
        self.check_write().await?;
        let mut carts = self.carts.write().await;
        match carts.get_mut(user_id) {
            Some(cart) => {
                let before = cart.items.len();
                cart.items.retain(|item| item.product_id != product_id);
                Ok(cart.items.len() < before)
            }
            None => Ok(false),
        }
    }

    async fn set_item_quantity(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.check_write().await?;
        let mut carts = self.carts.write().await;
        let Some(cart) = carts.get_mut(user_id) else {
            return Ok(false);
        };
        match merge::set_quantity(&cart.items, product_id, quantity) {
            Some(items) => {
                cart.items = items;
                cart.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        self.check_write().await?;
        let mut carts = self.carts.write().await;
        Ok(u64::from(carts.remove(user_id).is_some()))
    }
}

#[cfg(test)]
mod tests;
