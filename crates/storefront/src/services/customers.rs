//! Customer record service.
//!
//! Validates checkout submissions and stores them through a
//! [`CustomerRepository`].

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use soleverse_core::{Address, CustomerRecord, Email, NewCustomer};

use crate::db::{CustomerDraft, CustomerRepository, RepositoryError};

/// Errors that can occur while creating a customer.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// A required field is absent or blank.
    #[error("Please provide all required fields")]
    MissingField,

    /// One or more fields are present but malformed.
    #[error("Validation Error")]
    Validation(Vec<String>),

    /// A customer with the same email already exists.
    #[error("Customer with this email already exists")]
    DuplicateEmail,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[source] RepositoryError),
}

impl From<RepositoryError> for CustomerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::DuplicateEmail,
            other => Self::Repository(other),
        }
    }
}

/// Customer record service.
#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    /// Create a new customer service.
    #[must_use]
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    /// Validate and store a new customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::MissingField` if any required field is absent or blank.
    /// Returns `CustomerError::Validation` if the email or address is malformed.
    /// Returns `CustomerError::DuplicateEmail` if the email is already registered.
    /// Returns `CustomerError::Repository` for other storage failures.
    #[instrument(skip(self, input))]
    pub async fn create_customer(&self, input: NewCustomer) -> Result<CustomerRecord, CustomerError> {
        let draft = validate(input)?;

        // Check-then-insert is not atomic; the repository's unique
        // constraint catches the concurrent case and maps to DuplicateEmail.
        if self.customers.exists_by_email(&draft.email).await? {
            return Err(CustomerError::DuplicateEmail);
        }

        let record = self.customers.create(draft).await?;
        tracing::info!(customer_id = %record.id, "Customer created");

        Ok(record)
    }
}

/// Turn a raw submission into a draft, or explain what is wrong with it.
fn validate(input: NewCustomer) -> Result<CustomerDraft, CustomerError> {
    let NewCustomer {
        first_name,
        last_name,
        email,
        phone_number,
        address,
    } = input;

    let (Some(first_name), Some(last_name), Some(email), Some(phone_number), Some(address)) = (
        present(first_name),
        present(last_name),
        present(email),
        present(phone_number),
        address,
    ) else {
        return Err(CustomerError::MissingField);
    };

    let mut errors = Vec::new();

    let email = match Email::parse(&email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push("Please enter a valid email address".to_owned());
            None
        }
    };

    let address = normalize_address(address);
    for (value, message) in [
        (&address.street, "Street is required"),
        (&address.city, "City is required"),
        (&address.state, "State is required"),
        (&address.zip_code, "Zip code is required"),
    ] {
        if value.is_empty() {
            errors.push(message.to_owned());
        }
    }

    match email {
        Some(email) if errors.is_empty() => Ok(CustomerDraft {
            first_name,
            last_name,
            email,
            phone_number,
            address,
        }),
        _ => Err(CustomerError::Validation(errors)),
    }
}

/// Trimmed value, or `None` when absent or blank.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn normalize_address(address: Address) -> Address {
    Address {
        street: address.street.trim().to_owned(),
        city: address.city.trim().to_owned(),
        state: address.state.trim().to_owned(),
        zip_code: address.zip_code.trim().to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::InMemoryCustomerRepository;

    fn submission(email: &str) -> NewCustomer {
        NewCustomer {
            first_name: Some("Asha".to_owned()),
            last_name: Some("Rao".to_owned()),
            email: Some(email.to_owned()),
            phone_number: Some("9876543210".to_owned()),
            address: Some(Address {
                street: "12 MG Road".to_owned(),
                city: "Pune".to_owned(),
                state: "MH".to_owned(),
                zip_code: "411001".to_owned(),
            }),
        }
    }

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryCustomerRepository::new()))
    }

    #[tokio::test]
    async fn test_create_customer_succeeds() {
        let record = service()
            .create_customer(submission("asha@soleverse.in"))
            .await
            .unwrap();
        assert_eq!(record.email.as_str(), "asha@soleverse.in");
        assert_eq!(record.address.city, "Pune");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_second_time() {
        let service = service();
        service
            .create_customer(submission("asha@soleverse.in"))
            .await
            .unwrap();

        let err = service
            .create_customer(submission("asha@soleverse.in"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::DuplicateEmail));
        assert_eq!(err.to_string(), "Customer with this email already exists");
    }

    #[tokio::test]
    async fn test_missing_field() {
        let mut input = submission("asha@soleverse.in");
        input.phone_number = None;
        let err = service().create_customer(input).await.unwrap_err();
        assert!(matches!(err, CustomerError::MissingField));
    }

    #[tokio::test]
    async fn test_blank_field_counts_as_missing() {
        let mut input = submission("asha@soleverse.in");
        input.first_name = Some("   ".to_owned());
        let err = service().create_customer(input).await.unwrap_err();
        assert!(matches!(err, CustomerError::MissingField));
    }

    #[tokio::test]
    async fn test_missing_address_is_missing_field() {
        let mut input = submission("asha@soleverse.in");
        input.address = None;
        let err = service().create_customer(input).await.unwrap_err();
        assert!(matches!(err, CustomerError::MissingField));
    }

    #[tokio::test]
    async fn test_validation_collects_field_errors() {
        let mut input = submission("not-an-email");
        input.address = Some(Address {
            city: "Pune".to_owned(),
            ..Address::default()
        });

        let err = service().create_customer(input).await.unwrap_err();
        let CustomerError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            errors,
            vec![
                "Please enter a valid email address",
                "Street is required",
                "State is required",
                "Zip code is required",
            ]
        );
    }

    #[test]
    fn test_repository_conflict_maps_to_duplicate() {
        let err = CustomerError::from(RepositoryError::Conflict("email".to_owned()));
        assert!(matches!(err, CustomerError::DuplicateEmail));

        let err = CustomerError::from(RepositoryError::DataCorruption("bad".to_owned()));
        assert!(matches!(err, CustomerError::Repository(_)));
    }
}
