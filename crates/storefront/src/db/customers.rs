//! Customer repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;

use soleverse_core::{Address, CustomerId, CustomerRecord, Email};

use super::{CustomerDraft, CustomerRepository, RepositoryError};

// =============================================================================
// PostgreSQL
// =============================================================================

/// Customer repository backed by the `storefront.customers` table.
#[derive(Debug, Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for CustomerRecord {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            phone_number: row.phone_number,
            address: Address {
                street: row.street,
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
            },
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM storefront.customers WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create(&self, draft: CustomerDraft) -> Result<CustomerRecord, RepositoryError> {
        let row: CustomerRow = sqlx::query_as(
            r"
            INSERT INTO storefront.customers
                (first_name, last_name, email, phone_number, street, city, state, zip_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, email, phone_number,
                      street, city, state, zip_code, created_at
            ",
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(draft.email.as_str())
        .bind(&draft.phone_number)
        .bind(&draft.address.street)
        .bind(&draft.address.city)
        .bind(&draft.address.state)
        .bind(&draft.address.zip_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Customer repository held in process memory.
///
/// Used when no database is configured and by tests. Records are lost on
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    records: RwLock<Vec<CustomerRecord>>,
}

impl InMemoryCustomerRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no customers are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        Ok(self.records.read().await.iter().any(|c| &c.email == email))
    }

    async fn create(&self, draft: CustomerDraft) -> Result<CustomerRecord, RepositoryError> {
        let mut records = self.records.write().await;

        // Same guarantee as the unique index on the SQL table.
        if records.iter().any(|c| c.email == draft.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let next_id = i32::try_from(records.len() + 1).map_err(|_| {
            RepositoryError::DataCorruption("customer id space exhausted".to_owned())
        })?;

        let record = CustomerRecord {
            id: CustomerId::new(next_id),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone_number: draft.phone_number,
            address: draft.address,
            created_at: Utc::now(),
        };
        records.push(record.clone());

        Ok(record)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
