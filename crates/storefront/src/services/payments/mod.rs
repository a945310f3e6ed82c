//! Payment orders.
//!
//! Pricing is done here against the catalog ([`quote`]); creating and
//! capturing the order is delegated to a [`PaymentProvider`]. The only
//! provider today is [`MockPaymentProvider`], which approves everything.

mod mock;

pub use mock::MockPaymentProvider;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use soleverse_core::{
    Amount, AmountBreakdown, CapturedOrder, OrderItemRequest, OrderLine, PaymentOrder, Price,
    ProductId, PurchaseUnit,
};

use crate::catalog::Catalog;

/// Errors that can occur while creating or capturing an order.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Item list missing or empty.
    #[error("Invalid items data")]
    InvalidItems,

    /// An item references a product that is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The computed total is zero or negative.
    #[error("Invalid total amount")]
    InvalidAmount,

    /// The payment provider failed.
    #[error("payment provider error: {0}")]
    Provider(String),
}

/// A priced line of a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedLine {
    pub name: String,
    pub unit_price: Price,
    pub quantity: i64,
}

/// Catalog-validated order contents and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuote {
    pub lines: Vec<QuotedLine>,
    pub total: Price,
}

impl OrderQuote {
    /// The quote as a provider purchase unit.
    #[must_use]
    pub fn to_purchase_unit(&self) -> PurchaseUnit {
        let total = self.total.to_money();

        PurchaseUnit {
            amount: Amount {
                currency_code: total.currency_code,
                value: total.value.clone(),
                breakdown: AmountBreakdown { item_total: total },
            },
            items: self
                .lines
                .iter()
                .map(|line| OrderLine {
                    name: line.name.clone(),
                    unit_amount: line.unit_price.to_money(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// Price a list of `{id, quantity}` items against the catalog.
///
/// The whole request fails on the first unknown product; no partial quote is
/// produced.
///
/// # Errors
///
/// Returns `PaymentError::InvalidItems` if `items` is missing or empty.
/// Returns `PaymentError::ProductNotFound` if an id is not in the catalog.
/// Returns `PaymentError::InvalidAmount` if the total is not positive.
pub fn quote(
    catalog: &Catalog,
    items: Option<&[OrderItemRequest]>,
) -> Result<OrderQuote, PaymentError> {
    let items = items
        .filter(|items| !items.is_empty())
        .ok_or(PaymentError::InvalidItems)?;

    let lines = items
        .iter()
        .map(|item| {
            let product = catalog
                .get(item.id)
                .ok_or(PaymentError::ProductNotFound(item.id))?;
            Ok(QuotedLine {
                name: product.name.clone(),
                unit_price: catalog.price_of(product),
                quantity: item.quantity,
            })
        })
        .collect::<Result<Vec<_>, PaymentError>>()?;

    let amount: Decimal = lines
        .iter()
        .map(|line| line.unit_price.times(line.quantity).amount)
        .sum();

    if amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount);
    }

    Ok(OrderQuote {
        lines,
        total: Price::new(amount, catalog.currency()),
    })
}

/// An external payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Open an order for a quote. The returned order is `CREATED`.
    async fn create_order(&self, quote: &OrderQuote) -> Result<PaymentOrder, PaymentError>;

    /// Capture a previously created order. The returned order is `COMPLETED`.
    async fn capture_order(&self, order_id: &str) -> Result<CapturedOrder, PaymentError>;
}

/// Payment service combining the catalog with a provider.
#[derive(Clone)]
pub struct PaymentService {
    catalog: Arc<Catalog>,
    provider: Arc<dyn PaymentProvider>,
}

impl PaymentService {
    /// Create a new payment service.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { catalog, provider }
    }

    /// Quote the items and open an order with the provider.
    ///
    /// # Errors
    ///
    /// Returns any error from [`quote`] or from the provider.
    #[instrument(skip(self, items))]
    pub async fn create_order(
        &self,
        items: Option<&[OrderItemRequest]>,
    ) -> Result<PaymentOrder, PaymentError> {
        let quote = quote(&self.catalog, items)?;
        let order = self.provider.create_order(&quote).await?;

        tracing::info!(
            order_id = %order.id,
            total = %quote.total.display(),
            lines = quote.lines.len(),
            "Payment order created"
        );
        Ok(order)
    }

    /// Capture an order.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Provider` if the provider fails.
    #[instrument(skip(self))]
    pub async fn capture_order(&self, order_id: &str) -> Result<CapturedOrder, PaymentError> {
        let captured = self.provider.capture_order(order_id).await?;
        tracing::info!(order_id = %captured.id, status = %captured.status, "Payment order captured");
        Ok(captured)
    }
}
