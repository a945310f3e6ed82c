//! Checkout customer records.
//!
//! JSON field names are camelCase to match what the checkout form posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::CustomerId;

/// Shipping address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

/// Body of `POST /api/customer`.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a domain error rather than a deserialization failure. The email stays
/// a raw string here; it is parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// A persisted customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: String,
    pub address: Address,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_accepts_partial_body() {
        let body: NewCustomer =
            serde_json::from_str(r#"{"firstName":"Asha","address":{"city":"Pune"}}"#).unwrap();
        assert_eq!(body.first_name.as_deref(), Some("Asha"));
        assert!(body.email.is_none());
        assert_eq!(body.address.unwrap().city, "Pune");
    }

    #[test]
    fn test_address_uses_camel_case() {
        let address = Address {
            zip_code: "411001".to_owned(),
            ..Address::default()
        };
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["zipCode"], "411001");
    }
}
