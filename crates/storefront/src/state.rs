//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::db::{self, CustomerRepository, InMemoryCustomerRepository, PgCustomerRepository};
use crate::services::{CustomerService, MockPaymentProvider, PaymentProvider, PaymentService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog, configuration and services.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    customers: Arc<dyn CustomerRepository>,
    customer_service: CustomerService,
    payment_service: PaymentService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `customers` - Customer repository (Postgres or in-memory)
    /// * `provider` - Payment provider
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        customers: Arc<dyn CustomerRepository>,
        provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        let catalog = Arc::new(Catalog::seeded(config.currency));
        let customer_service = CustomerService::new(Arc::clone(&customers));
        let payment_service = PaymentService::new(Arc::clone(&catalog), provider);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                customers,
                customer_service,
                payment_service,
            }),
        }
    }

    /// Build state from configuration.
    ///
    /// Connects to `PostgreSQL` when a database URL is configured and keeps
    /// customers in memory otherwise. Payments always use the mock provider.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the database pool cannot be created.
    pub async fn from_config(config: StorefrontConfig) -> Result<Self, sqlx::Error> {
        let Some(database_url) = config.database_url.clone() else {
            tracing::warn!("No database configured, customers are kept in memory");
            return Ok(Self::in_memory(config));
        };

        let pool = db::create_pool(&database_url).await?;
        tracing::info!("Database pool created");

        let provider = Arc::new(MockPaymentProvider::new(config.payer_email.clone()));
        Ok(Self::new(
            config,
            Arc::new(PgCustomerRepository::new(pool)),
            provider,
        ))
    }

    /// State with an in-memory customer repository and the mock provider.
    #[must_use]
    pub fn in_memory(config: StorefrontConfig) -> Self {
        let provider = Arc::new(MockPaymentProvider::new(config.payer_email.clone()));
        Self::new(
            config,
            Arc::new(InMemoryCustomerRepository::new()),
            provider,
        )
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the customer repository.
    #[must_use]
    pub fn customers(&self) -> &dyn CustomerRepository {
        self.inner.customers.as_ref()
    }

    /// Get a reference to the customer service.
    #[must_use]
    pub fn customer_service(&self) -> &CustomerService {
        &self.inner.customer_service
    }

    /// Get a reference to the payment service.
    #[must_use]
    pub fn payment_service(&self) -> &PaymentService {
        &self.inner.payment_service
    }
}
