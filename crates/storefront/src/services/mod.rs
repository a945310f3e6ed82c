//! Business logic services for storefront.
//!
//! # Services
//!
//! - `customers` - Checkout customer records (validation, duplicate detection)
//! - `payments` - Catalog pricing and the payment provider seam

pub mod customers;
pub mod payments;

pub use customers::{CustomerError, CustomerService};
pub use payments::{MockPaymentProvider, PaymentError, PaymentProvider, PaymentService};
