//! Domain types: persisted cart documents and the read-time enriched view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A (product, quantity) pair within a cart.
///
/// Only these two fields are persisted; everything else a client sees on a
/// line item is read-time decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// External product reference. No foreign-key enforcement; the product
    /// service is consulted at read time.
    pub product_id: i64,
    /// Always >= 1. Non-positive quantities are rejected at the boundary.
    pub quantity: u32,
}

/// Per-user cart document, one per `user_id`.
///
/// Item order is first-seen order of product ids. At most one item per
/// distinct `product_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<LineItem>,
    /// Set once at first insert.
    pub created_at: DateTime<Utc>,
    /// Set on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create a fresh cart holding a single item.
    pub fn new(user_id: String, item: LineItem, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            items: vec![item],
            created_at: now,
            updated_at: now,
        }
    }
}

/// Product/brand attributes returned by the product service bulk lookup.
///
/// Transient: decorates line items during a read, never persisted. All
/// fields default so a sparse upstream payload still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSnapshot {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub discounted_price: i64,
    pub discount: i64,
    pub img_url: String,
    pub brand_id: i64,
    pub brand_kor: String,
    pub brand_eng: String,
    pub brand_like_count: i64,
}

/// A line item decorated with product/brand attributes. Response-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedItem {
    pub product_id: i64,
    pub quantity: u32,
    pub name: String,
    pub price: i64,
    pub discounted_price: i64,
    pub discount: i64,
    pub img_url: String,
    pub brand_id: i64,
    pub brand_kor: String,
    pub brand_eng: String,
    pub brand_like_count: i64,
}

impl EnrichedItem {
    /// Decorate a line item with a snapshot, or defensive defaults when the
    /// product service did not return one for this id.
    pub fn decorate(item: &LineItem, snapshot: Option<&ProductSnapshot>) -> Self {
        let snapshot = snapshot.cloned().unwrap_or_default();
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            name: snapshot.name,
            price: snapshot.price,
            discounted_price: snapshot.discounted_price,
            discount: snapshot.discount,
            img_url: snapshot.img_url,
            brand_id: snapshot.brand_id,
            brand_kor: snapshot.brand_kor,
            brand_eng: snapshot.brand_eng,
            brand_like_count: snapshot.brand_like_count,
        }
    }
}

/// The enriched read view of a cart. Response-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCart {
    pub user_id: String,
    pub items: Vec<EnrichedItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EnrichedCart {
    /// Join a cart against a snapshot map, decorating every item.
    ///
    /// Items whose product id is absent from the map get defaults rather
    /// than being dropped.
    pub fn decorate(cart: Cart, snapshots: &HashMap<i64, ProductSnapshot>) -> Self {
        let items = cart
            .items
            .iter()
            .map(|item| EnrichedItem::decorate(item, snapshots.get(&item.product_id)))
            .collect();
        Self {
            user_id: cart.user_id,
            items,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate_unknown_product_gets_defaults() {
        let item = LineItem {
            product_id: 7,
            quantity: 3,
        };
        let enriched = EnrichedItem::decorate(&item, None);
        assert_eq!(enriched.product_id, 7);
        assert_eq!(enriched.quantity, 3);
        assert_eq!(enriched.name, "");
        assert_eq!(enriched.price, 0);
        assert_eq!(enriched.brand_like_count, 0);
    }

    #[test]
    fn test_decorate_carries_snapshot_fields() {
        let item = LineItem {
            product_id: 7,
            quantity: 1,
        };
        let snapshot = ProductSnapshot {
            id: 7,
            name: "candle".to_string(),
            price: 1200,
            discounted_price: 1000,
            discount: 200,
            img_url: "http://img/7".to_string(),
            brand_id: 2,
            brand_kor: "브랜드".to_string(),
            brand_eng: "brand".to_string(),
            brand_like_count: 41,
        };
        let enriched = EnrichedItem::decorate(&item, Some(&snapshot));
        assert_eq!(enriched.name, "candle");
        assert_eq!(enriched.discounted_price, 1000);
        assert_eq!(enriched.brand_eng, "brand");
    }
}
