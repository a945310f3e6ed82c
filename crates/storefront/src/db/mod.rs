//! Customer persistence.
//!
//! # Database: `soleverse`
//!
//! ## Tables
//!
//! - `storefront.customers` - Checkout customer records (unique email)
//!
//! Products are seeded in memory and never stored; payment orders are not
//! persisted at all.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p soleverse-cli -- migrate
//! ```
//!
//! When no database URL is configured the storefront falls back to
//! [`InMemoryCustomerRepository`].

pub mod customers;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use soleverse_core::{Address, CustomerRecord, Email};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use customers::{InMemoryCustomerRepository, PgCustomerRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Validated input for a new customer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: String,
    pub address: Address,
}

/// Storage for checkout customer records.
///
/// Only creation and an existence check by email are exposed; records are
/// never updated or deleted.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Whether a customer with exactly this email exists.
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Insert a new customer.
    ///
    /// Implementations must reject a duplicate email with
    /// [`RepositoryError::Conflict`].
    async fn create(&self, draft: CustomerDraft) -> Result<CustomerRecord, RepositoryError>;

    /// Check the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
