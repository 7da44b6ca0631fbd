//! Merge engine: pure reconciliation of incoming items against a cart.
//!
//! Both functions preserve input order. Quantity validation happens at the
//! service boundary before these run; the functions themselves are total.

use crate::model::LineItem;

/// Add-to-cart semantics: if an item with the same product id exists, its
/// quantity is incremented by the incoming quantity; otherwise the incoming
/// item is appended last.
pub fn merge(existing: &[LineItem], incoming: LineItem) -> Vec<LineItem> {
    let mut items = existing.to_vec();
    match items
        .iter_mut()
        .find(|item| item.product_id == incoming.product_id)
    {
        Some(item) => item.quantity = item.quantity.saturating_add(incoming.quantity),
        None => items.push(incoming),
    }
    items
}

/// Explicit quantity update: replaces (never increments) the quantity of the
/// matching item. Returns `None` when no item has that product id; it never
/// creates one.
pub fn set_quantity(existing: &[LineItem], product_id: i64, quantity: u32) -> Option<Vec<LineItem>> {
    let mut items = existing.to_vec();
    let item = items.iter_mut().find(|item| item.product_id == product_id)?;
    item.quantity = quantity;
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i64, quantity: u32) -> LineItem {
        LineItem {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_merge_appends_new_product() {
        let items = merge(&[item(1, 2)], item(2, 1));
        assert_eq!(items, vec![item(1, 2), item(2, 1)]);
    }

    #[test]
    fn test_merge_accumulates_quantity() {
        let items = merge(&[item(1, 2), item(2, 1)], item(1, 3));
        assert_eq!(items, vec![item(1, 5), item(2, 1)]);
    }

    #[test]
    fn test_merge_into_empty() {
        let items = merge(&[], item(9, 4));
        assert_eq!(items, vec![item(9, 4)]);
    }

    #[test]
    fn test_merge_preserves_order_and_uniqueness() {
        let mut items = Vec::new();
        for incoming in [item(3, 1), item(1, 1), item(3, 2), item(2, 1), item(1, 1)] {
            items = merge(&items, incoming);
        }
        let ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[1].quantity, 2);
    }

    #[test]
    fn test_merge_saturates_instead_of_overflowing() {
        let items = merge(&[item(1, u32::MAX - 1)], item(1, 5));
        assert_eq!(items[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let items = set_quantity(&[item(1, 2), item(2, 7)], 2, 1).unwrap();
        assert_eq!(items, vec![item(1, 2), item(2, 1)]);
    }

    #[test]
    fn test_set_quantity_missing_product() {
        assert!(set_quantity(&[item(1, 2)], 99, 1).is_none());
        assert!(set_quantity(&[], 1, 1).is_none());
    }
}
