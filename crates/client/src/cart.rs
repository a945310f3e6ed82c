//! Shopping cart.
//!
//! Line items are keyed by `(product id, selected size)`. The cart count and
//! total are always recomputed from the line items.
//!
//! Every mutation writes the item list and count to storage. A failed write
//! is logged and does not undo the mutation.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use soleverse_core::{OrderItemRequest, Product, ProductId};

use crate::storage::{self, Storage, StorageError, keys};

/// Errors raised before a product reaches the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// No size was chosen.
    #[error("Please select a size")]
    SizeRequired,

    /// The product is not offered in the chosen size.
    #[error("{name} is not available in size {size}")]
    SizeUnavailable { name: String, size: u32 },

    /// No product with this id is in the catalog.
    #[error("Product not found")]
    ProductNotFound(ProductId),

    /// Persisted cart could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One product/size combination in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    #[serde(default)]
    pub selected_size: Option<u32>,
    pub quantity: u32,
}

impl LineItem {
    /// `price × quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Check a size choice against what the product is offered in.
///
/// # Errors
///
/// Returns `CartError::SizeRequired` if no size was chosen, or
/// `CartError::SizeUnavailable` if the product does not come in it.
pub fn select_size(product: &Product, size: Option<u32>) -> Result<u32, CartError> {
    let size = size.ok_or(CartError::SizeRequired)?;
    if product.has_size(size) {
        Ok(size)
    } else {
        Err(CartError::SizeUnavailable {
            name: product.name.clone(),
            size,
        })
    }
}

/// The shopper's cart, written through to storage.
pub struct CartStore {
    storage: Arc<dyn Storage>,
    items: Vec<LineItem>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Rehydrate the cart from storage. A missing key is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored cart cannot be read or decoded.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        let items = storage::load(storage.as_ref(), keys::CART_ITEMS)?.unwrap_or_default();
        Ok(Self { storage, items })
    }

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price × quantity`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// `{id, quantity}` for every line item, as create-order expects.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItemRequest> {
        self.items
            .iter()
            .map(|item| OrderItemRequest {
                id: item.id,
                quantity: i64::from(item.quantity),
            })
            .collect()
    }

    /// Add one unit of `product` in `selected_size`.
    ///
    /// Increments the matching line item or appends a new one. Ignored when
    /// the product id is unset.
    pub fn add_to_cart(&mut self, product: &Product, selected_size: Option<u32>) {
        if product.id.is_unset() {
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.id == product.id && item.selected_size == selected_size)
        {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem {
                id: product.id,
                name: product.name.clone(),
                price: product.price,
                image: product.image.clone(),
                selected_size,
                quantity: 1,
            });
        }

        self.persist();
    }

    /// Remove every line item of `product_id`, whatever its size.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        if product_id.is_unset() {
            return;
        }

        self.items.retain(|item| item.id != product_id);
        self.persist();
    }

    /// Set the quantity of every line item of `product_id`.
    ///
    /// Negative quantities are ignored. Line items left at zero are removed.
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) {
        if product_id.is_unset() || new_quantity < 0 {
            return;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        for item in self.items.iter_mut().filter(|item| item.id == product_id) {
            item.quantity = quantity;
        }
        self.items.retain(|item| item.quantity > 0);
        self.persist();
    }

    /// Empty the cart and drop both persisted cart keys.
    pub fn clear_cart(&mut self) {
        self.items.clear();

        for key in [keys::CART_ITEMS, keys::CART_COUNT] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(error = %e, key, "Failed to remove persisted cart key");
            }
        }
    }

    fn persist(&self) {
        let result = storage::save(self.storage.as_ref(), keys::CART_ITEMS, &self.items)
            .and_then(|()| storage::save(self.storage.as_ref(), keys::CART_COUNT, &self.count()));

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Shoe {id}"),
            price: Decimal::from(price),
            image: format!("https://img.example/{id}.jpg"),
            description: String::new(),
            sizes: (6..=11).collect::<BTreeSet<_>>(),
        }
    }

    fn empty_cart() -> (Arc<MemoryStorage>, CartStore) {
        let storage = Arc::new(MemoryStorage::new());
        let cart = CartStore::load(storage.clone()).unwrap();
        (storage, cart)
    }

    #[test]
    fn test_repeated_add_accumulates_one_line() {
        let (_, mut cart) = empty_cart();
        let shoe = product(1, 16499);

        for _ in 0..4 {
            cart.add_to_cart(&shoe, Some(9));
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().map(|i| i.quantity), Some(4));
        assert_eq!(cart.count(), 4);
    }

    #[test]
    fn test_sizes_are_separate_lines() {
        let (_, mut cart) = empty_cart();
        let shoe = product(1, 16499);
        cart.add_to_cart(&shoe, Some(8));
        cart.add_to_cart(&shoe, Some(9));
        cart.add_to_cart(&shoe, None);

        assert_eq!(cart.items().len(), 3);
    }

    #[test]
    fn test_unset_product_id_is_ignored() {
        let (storage, mut cart) = empty_cart();
        cart.add_to_cart(&product(0, 100), Some(9));

        assert!(cart.is_empty());
        assert!(!storage.contains(keys::CART_ITEMS));
    }

    #[test]
    fn test_remove_ignores_size() {
        let (_, mut cart) = empty_cart();
        let shoe = product(1, 16499);
        let other = product(2, 14999);
        cart.add_to_cart(&shoe, Some(8));
        cart.add_to_cart(&shoe, Some(10));
        cart.add_to_cart(&other, Some(8));

        cart.remove_from_cart(ProductId::new(1));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().map(|i| i.id), Some(ProductId::new(2)));
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let (_, mut cart) = empty_cart();
        cart.add_to_cart(&product(1, 100), Some(9));
        cart.update_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_is_noop() {
        let (_, mut cart) = empty_cart();
        cart.add_to_cart(&product(1, 100), Some(9));
        let before = cart.items().to_vec();

        cart.update_quantity(ProductId::new(1), -3);
        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_update_quantity_applies_to_every_size() {
        let (_, mut cart) = empty_cart();
        let shoe = product(1, 100);
        cart.add_to_cart(&shoe, Some(8));
        cart.add_to_cart(&shoe, Some(9));

        cart.update_quantity(ProductId::new(1), 5);
        assert!(cart.items().iter().all(|i| i.quantity == 5));
        assert_eq!(cart.count(), 10);
    }

    #[test]
    fn test_total_and_count_track_items() {
        let (_, mut cart) = empty_cart();
        cart.add_to_cart(&product(1, 16499), Some(9));
        cart.add_to_cart(&product(1, 16499), Some(9));
        cart.add_to_cart(&product(4, 10999), Some(7));

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), Decimal::from(16499 * 2 + 10999));

        cart.update_quantity(ProductId::new(4), 3);
        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total(), Decimal::from(16499 * 2 + 10999 * 3));
    }

    #[test]
    fn test_cart_survives_reload() {
        let (storage, mut cart) = empty_cart();
        cart.add_to_cart(&product(3, 13299), Some(12));
        cart.add_to_cart(&product(3, 13299), Some(12));

        let reloaded = CartStore::load(storage.clone()).unwrap();
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(
            storage::load::<u64>(storage.as_ref(), keys::CART_COUNT).unwrap(),
            Some(2)
        );
    }

    #[test]
    fn test_clear_cart_removes_persisted_keys() {
        let (storage, mut cart) = empty_cart();
        cart.add_to_cart(&product(1, 100), Some(9));
        assert!(storage.contains(keys::CART_ITEMS));

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert!(!storage.contains(keys::CART_ITEMS));
        assert!(!storage.contains(keys::CART_COUNT));
    }

    #[test]
    fn test_order_items() {
        let (_, mut cart) = empty_cart();
        cart.add_to_cart(&product(2, 100), Some(6));
        cart.add_to_cart(&product(2, 100), Some(6));

        let items = cart.order_items();
        assert_eq!(
            items,
            vec![OrderItemRequest {
                id: ProductId::new(2),
                quantity: 2
            }]
        );
    }

    #[test]
    fn test_select_size() {
        let shoe = product(1, 100);
        assert_eq!(select_size(&shoe, Some(9)).unwrap(), 9);
        assert!(matches!(
            select_size(&shoe, None),
            Err(CartError::SizeRequired)
        ));
        assert!(matches!(
            select_size(&shoe, Some(14)),
            Err(CartError::SizeUnavailable { size: 14, .. })
        ));
    }
}
