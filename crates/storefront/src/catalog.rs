//! Product catalog.
//!
//! The catalog is seeded once at start-up and shared read-only between
//! handlers. Prices are in the store currency.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use soleverse_core::{CurrencyCode, Price, Product, ProductId};

/// Immutable product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    currency: CurrencyCode,
}

impl Catalog {
    /// Create a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>, currency: CurrencyCode) -> Self {
        Self { products, currency }
    }

    /// The SoleVerse collection.
    #[must_use]
    pub fn seeded(currency: CurrencyCode) -> Self {
        let products = vec![
            seed(
                1,
                "Air Max Supreme",
                16499,
                "https://images.unsplash.com/photo-1542291026-7eec264c27ff",
                "Premium comfort with stylish design",
                7..=11,
            ),
            seed(
                2,
                "Ultra Boost X",
                14999,
                "https://images.unsplash.com/photo-1608231387042-66d1773070a5",
                "Revolutionary cushioning technology",
                6..=10,
            ),
            seed(
                3,
                "Cloud Runner",
                13299,
                "https://images.unsplash.com/photo-1606107557195-0e29a4b5b4aa",
                "Lightweight and breathable design",
                7..=12,
            ),
            seed(
                4,
                "Street Legend",
                10999,
                "https://images.unsplash.com/photo-1595950653106-6c9ebd614d3a",
                "Urban style meets comfort",
                6..=11,
            ),
            seed(
                5,
                "Sprint Elite",
                13999,
                "https://images.unsplash.com/photo-1605348532760-6753d2c43329",
                "Designed for peak performance",
                7..=11,
            ),
            seed(
                6,
                "Flex Trainer",
                12499,
                "https://images.unsplash.com/photo-1605408499391-6368c628ef42",
                "Versatile training shoe",
                6..=10,
            ),
        ];

        Self::new(products, currency)
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Currency the catalog is priced in.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Unit price of a product as a currency-tagged [`Price`].
    #[must_use]
    pub const fn price_of(&self, product: &Product) -> Price {
        Price::new(product.price, self.currency)
    }
}

fn seed(
    id: i32,
    name: &str,
    price: i64,
    image: &str,
    description: &str,
    sizes: std::ops::RangeInclusive<u32>,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::from(price),
        image: image.to_owned(),
        description: description.to_owned(),
        sizes: sizes.collect::<BTreeSet<_>>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_has_six_products() {
        let catalog = Catalog::seeded(CurrencyCode::INR);
        assert_eq!(catalog.all().len(), 6);
        let ids: Vec<i32> = catalog.all().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::seeded(CurrencyCode::INR);
        let product = catalog.get(ProductId::new(3));
        assert_eq!(product.map(|p| p.name.as_str()), Some("Cloud Runner"));
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_sizes_are_ordered_ranges() {
        let catalog = Catalog::seeded(CurrencyCode::INR);
        let cloud_runner = catalog.get(ProductId::new(3));
        let sizes: Vec<u32> = cloud_runner
            .map(|p| p.sizes.iter().copied().collect())
            .unwrap_or_default();
        assert_eq!(sizes, vec![7, 8, 9, 10, 11, 12]);
        assert!(cloud_runner.is_some_and(|p| p.has_size(12) && !p.has_size(6)));
    }

    #[test]
    fn test_price_of_uses_catalog_currency() {
        let catalog = Catalog::seeded(CurrencyCode::USD);
        let price = catalog
            .get(ProductId::new(4))
            .map(|p| catalog.price_of(p).display());
        assert_eq!(price.as_deref(), Some("$10999.00"));
    }
}
