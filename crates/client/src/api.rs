//! Storefront API client.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use soleverse_core::{
    ApiResponse, CaptureOrderRequest, CapturedOrder, CreateOrderRequest, CustomerRecord,
    NewCustomer, OrderItemRequest, PaymentOrder, Product,
};

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A success envelope arrived without data.
    #[error("response contained no data")]
    MissingData,

    /// An endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the storefront JSON API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StorefrontApi {
    inner: Arc<StorefrontApiInner>,
}

struct StorefrontApiInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for StorefrontApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApi")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl StorefrontApi {
    /// Create a client for the API rooted at `base_url` (e.g. `http://localhost:5000/api`).
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        // Joining relative paths keeps the last segment only with a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            inner: Arc::new(StorefrontApiInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// The API base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Fetch the product catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("products")?)
            .send()
            .await?;

        let envelope: ApiResponse<Vec<Product>> = read_json(response).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Submit checkout customer details.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's message for missing
    /// fields, validation failures or a duplicate email.
    #[instrument(skip_all)]
    pub async fn create_customer(&self, customer: &NewCustomer) -> Result<CustomerRecord, ApiError> {
        let envelope: ApiResponse<CustomerRecord> = self.post("customer", customer).await?;
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Open a payment order for `items`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for empty items or unknown products.
    #[instrument(skip_all, fields(lines = items.len()))]
    pub async fn create_order(&self, items: &[OrderItemRequest]) -> Result<PaymentOrder, ApiError> {
        self.post(
            "create-paypal-order",
            &CreateOrderRequest::new(items.to_vec()),
        )
        .await
    }

    /// Capture a payment order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn capture_order(&self, order_id: &str) -> Result<CapturedOrder, ApiError> {
        self.post(
            "capture-paypal-order",
            &CaptureOrderRequest {
                order_id: order_id.to_owned(),
            },
        )
        .await
    }

    /// Download an image and return its size in bytes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the URL is invalid, unreachable or not a success.
    #[instrument(skip(self))]
    pub async fn fetch_image(&self, url: &str) -> Result<usize, ApiError> {
        let url = Url::parse(url)?;
        let response = self.inner.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
                errors: Vec::new(),
            });
        }

        Ok(response.bytes().await?.len())
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Decode a success body, or turn an error body into `ApiError::Rejected`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    // Get response body as text first for better error diagnostics
    let text = response.text().await?;

    if !status.is_success() {
        let envelope = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text).ok();
        let (message, errors) = envelope
            .map(|e| (e.message, e.errors))
            .unwrap_or_default();

        tracing::debug!(status = %status, "Storefront API rejected request");
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| format!("HTTP {status}")),
            errors: errors.unwrap_or_default(),
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse storefront response"
        );
        ApiError::Decode(e)
    })
}
