//! Cart service orchestrator.
//!
//! Composes the cart store, merge engine, and product lookup. Mutations go
//! through the store only; enrichment decorates read responses and is never
//! written back.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::interfaces::{CartStore, LookupError, ProductLookup, StorageError};
use crate::merge;
use crate::model::{Cart, EnrichedCart, LineItem};

const CART_NOT_FOUND: &str = "Cart not found";
const ITEM_NOT_FOUND: &str = "Cart item not found";

/// Public error taxonomy, translated from store and lookup errors at this
/// boundary. Only short cause strings cross it.
#[derive(Debug, Error)]
pub enum CartError {
    /// 400-class: malformed input, non-positive quantity.
    #[error("{0}")]
    Validation(String),

    /// 404-class: cart or item absent. Terminal, not logged loudly.
    #[error("{0}")]
    NotFound(&'static str),

    /// 502-class: enrichment failed; reads fail closed rather than
    /// returning partial prices.
    #[error("Failed to fetch product details: {0}")]
    Upstream(String),

    /// 500-class: persistence layer failure.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<StorageError> for CartError {
    fn from(err: StorageError) -> Self {
        CartError::Storage(err.to_string())
    }
}

impl From<LookupError> for CartError {
    fn from(err: LookupError) -> Self {
        let LookupError::Upstream(cause) = err;
        CartError::Upstream(cause)
    }
}

fn validate_quantity(quantity: i64) -> Result<u32, CartError> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| {
            CartError::Validation(format!(
                "quantity must be a positive integer, got {quantity}"
            ))
        })
}

/// Orchestrator for cart operations. Stateless per request; all shared
/// state lives behind the injected store and lookup.
pub struct CartService {
    store: Arc<dyn CartStore>,
    products: Arc<dyn ProductLookup>,
}

impl CartService {
    pub fn new(store: Arc<dyn CartStore>, products: Arc<dyn ProductLookup>) -> Self {
        Self { store, products }
    }

    /// Add an item: create the cart on first add, otherwise merge
    /// (accumulating quantity on a product match). Returns the canonical
    /// un-enriched cart.
    ///
    /// The load-merge-write here is not serializable per user; two
    /// concurrent adds can lose an update (see DESIGN.md).
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        let quantity = validate_quantity(quantity)?;
        let item = LineItem {
            product_id,
            quantity,
        };
        let now = Utc::now();

        let existing = match self.store.find_by_user(user_id).await? {
            Some(cart) => cart,
            None => {
                let cart = Cart::new(user_id.to_string(), item.clone(), now);
                match self.store.insert(&cart).await {
                    Ok(()) => return Ok(cart),
                    Err(StorageError::Conflict(_)) => {
                        // A concurrent first add won; merge into its cart
                        debug!(user_id, "Insert conflict, retrying as merge");
                        self.store
                            .find_by_user(user_id)
                            .await?
                            .ok_or_else(|| CartError::Storage("cart vanished after insert conflict".to_string()))?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        let items = merge::merge(&existing.items, item);
        let matched = self.store.replace_items(user_id, &items, now).await?;
        if !matched {
            return Err(CartError::Storage("cart vanished during merge".to_string()));
        }

        Ok(Cart {
            user_id: existing.user_id,
            items,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Fetch the enriched cart. Fails closed on lookup errors; never
    /// writes.
    pub async fn get_cart(&self, user_id: &str) -> Result<EnrichedCart, CartError> {
        let cart = self
            .store
            .find_by_user(user_id)
            .await?
            .ok_or(CartError::NotFound(CART_NOT_FOUND))?;

        self.enrich(cart).await
    }

    /// Replace the quantity of an existing item, then return the enriched
    /// cart. Never creates a cart or an item.
    pub async fn set_item_quantity(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<EnrichedCart, CartError> {
        let quantity = validate_quantity(quantity)?;

        let matched = self
            .store
            .set_item_quantity(user_id, product_id, quantity, Utc::now())
            .await?;
        if !matched {
            return Err(CartError::NotFound(ITEM_NOT_FOUND));
        }

        let cart = self
            .store
            .find_by_user(user_id)
            .await?
            .ok_or(CartError::NotFound(CART_NOT_FOUND))?;

        self.enrich(cart).await
    }

    /// Remove all items with the given product id. The document survives
    /// even when the last item goes; only [`Self::delete_cart`] drops it.
    pub async fn remove_item(&self, user_id: &str, product_id: i64) -> Result<(), CartError> {
        let modified = self.store.remove_items_matching(user_id, product_id).await?;
        if !modified {
            return Err(CartError::NotFound(ITEM_NOT_FOUND));
        }
        Ok(())
    }

    /// Delete the whole cart document.
    pub async fn delete_cart(&self, user_id: &str) -> Result<(), CartError> {
        let deleted = self.store.delete_by_user(user_id).await?;
        if deleted == 0 {
            return Err(CartError::NotFound(CART_NOT_FOUND));
        }
        Ok(())
    }

    async fn enrich(&self, cart: Cart) -> Result<EnrichedCart, CartError> {
        // Items are unique per product id, so this is already distinct
        let ids: Vec<i64> = cart.items.iter().map(|item| item.product_id).collect();
        let snapshots = self.products.bulk_fetch(&ids).await?;

        Ok(EnrichedCart::decorate(cart, &snapshots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_bounds() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(9000).unwrap(), 9000);
        assert!(matches!(validate_quantity(0), Err(CartError::Validation(_))));
        assert!(matches!(validate_quantity(-3), Err(CartError::Validation(_))));
        assert!(matches!(
            validate_quantity(i64::MAX),
            Err(CartError::Validation(_))
        ));
    }
}
