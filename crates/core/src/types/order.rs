//! Payment-provider order bodies.
//!
//! These mirror the shape of a hosted-checkout provider's order API
//! (`purchase_units`, `currency_code`, `unit_amount`, ...), so field names are
//! snake_case on the wire, except for `orderID` which the checkout button
//! posts verbatim.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::CurrencyCode;
use super::status::OrderStatus;

/// One `{id, quantity}` entry of a create-order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub id: ProductId,
    pub quantity: i64,
}

/// Body of `POST /api/create-paypal-order`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Option<Vec<OrderItemRequest>>,
}

impl CreateOrderRequest {
    /// Build a request for the given items.
    #[must_use]
    pub const fn new(items: Vec<OrderItemRequest>) -> Self {
        Self { items: Some(items) }
    }
}

/// Body of `POST /api/capture-paypal-order`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOrderRequest {
    #[serde(rename = "orderID", default)]
    pub order_id: String,
}

/// A currency-tagged amount with two decimal places, as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency_code: CurrencyCode,
    pub value: String,
}

/// Breakdown of an order amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBreakdown {
    pub item_total: Money,
}

/// Total amount of a purchase unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency_code: CurrencyCode,
    pub value: String,
    pub breakdown: AmountBreakdown,
}

/// A priced line inside a purchase unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub unit_amount: Money,
    pub quantity: i64,
}

/// The purchase unit of an order. SoleVerse always creates exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub amount: Amount,
    pub items: Vec<OrderLine>,
}

/// An order as returned by create-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub status: OrderStatus,
    pub purchase_units: Vec<PurchaseUnit>,
}

impl PaymentOrder {
    /// Total value of the first purchase unit, if any.
    #[must_use]
    pub fn total_value(&self) -> Option<&str> {
        self.purchase_units
            .first()
            .map(|unit| unit.amount.value.as_str())
    }
}

/// Who paid for a captured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub email_address: String,
}

/// Result of capturing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedOrder {
    pub id: String,
    pub status: OrderStatus,
    pub payer: Payer,
}
