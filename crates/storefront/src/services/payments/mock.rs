//! Mock payment provider.

use async_trait::async_trait;
use uuid::Uuid;

use soleverse_core::{CapturedOrder, OrderStatus, Payer, PaymentOrder};

use super::{OrderQuote, PaymentError, PaymentProvider};

/// Provider that accepts every order and approves every capture.
///
/// Nothing is remembered between calls: capture does not check that the
/// order was created, re-check the amount, or guard against double capture.
#[derive(Debug, Clone)]
pub struct MockPaymentProvider {
    payer_email: String,
}

impl MockPaymentProvider {
    /// Create a mock provider reporting `payer_email` on every capture.
    #[must_use]
    pub fn new(payer_email: impl Into<String>) -> Self {
        Self {
            payer_email: payer_email.into(),
        }
    }
}

/// `ORDER_` followed by an upper-case hex UUID.
fn order_id() -> String {
    format!("ORDER_{}", Uuid::new_v4().simple().to_string().to_uppercase())
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_order(&self, quote: &OrderQuote) -> Result<PaymentOrder, PaymentError> {
        Ok(PaymentOrder {
            id: order_id(),
            status: OrderStatus::Created,
            purchase_units: vec![quote.to_purchase_unit()],
        })
    }

    async fn capture_order(&self, order_id: &str) -> Result<CapturedOrder, PaymentError> {
        Ok(CapturedOrder {
            id: order_id.to_owned(),
            status: OrderStatus::Completed,
            payer: Payer {
                email_address: self.payer_email.clone(),
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_format() {
        let id = order_id();
        let hex = id.strip_prefix("ORDER_").unwrap();
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_ne!(order_id(), id);
    }

    #[tokio::test]
    async fn test_capture_accepts_any_order_id() {
        let provider = MockPaymentProvider::new("customer@example.com");
        for id in ["ORDER_ABC", "", "never-created"] {
            let captured = provider.capture_order(id).await.unwrap();
            assert_eq!(captured.id, id);
            assert_eq!(captured.status, OrderStatus::Completed);
            assert_eq!(captured.payer.email_address, "customer@example.com");
        }
    }
}
