//! Core types for SoleVerse.
//!
//! This module provides type-safe wrappers for domain concepts and the JSON
//! bodies exchanged between the storefront API and its clients.

pub mod credential;
pub mod customer;
pub mod email;
pub mod envelope;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use credential::PasswordDigest;
pub use customer::{Address, CustomerRecord, NewCustomer};
pub use email::{Email, EmailError};
pub use envelope::ApiResponse;
pub use id::*;
pub use order::{
    Amount, AmountBreakdown, CaptureOrderRequest, CapturedOrder, CreateOrderRequest, Money,
    OrderItemRequest, OrderLine, Payer, PaymentOrder, PurchaseUnit,
};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::OrderStatus;
