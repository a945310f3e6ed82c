//! Catalog product.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A purchasable product.
///
/// Products are reference data: seeded once when the storefront starts and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    pub description: String,
    /// Shoe sizes this product is offered in, ascending.
    pub sizes: BTreeSet<u32>,
}

impl Product {
    /// Whether the product is offered in `size`.
    #[must_use]
    pub fn has_size(&self, size: u32) -> bool {
        self.sizes.contains(&size)
    }
}
