//! Integration tests for SoleVerse.
//!
//! Each test boots its own storefront on an ephemeral port with the
//! in-memory customer repository, then drives it over HTTP through the
//! client library.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p soleverse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - Catalog, health and request-id behaviour
//! - `payment_flow` - Create-order and capture through `pay_for_cart`
//! - `checkout_flow` - Customer submission through `submit_checkout`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{Router, extract::Path, http::StatusCode, routing::get};
use soleverse_client::{CartStore, MemoryStorage, StorefrontApi};
use soleverse_core::Product;
use soleverse_storefront::{config::StorefrontConfig, state::AppState};
use tokio::net::TcpListener;
use url::Url;

/// Image files served by every [`TestServer`] under `/images/{name}`.
pub const TEST_IMAGES: &[(&str, &[u8])] = &[
    ("air-max-supreme.jpg", b"\xFF\xD8\xFF\xE0air-max-supreme"),
    ("trail-runner.jpg", b"\xFF\xD8\xFF\xE0trail-runner-x"),
];

/// A storefront running in the background for the duration of a test.
pub struct TestServer {
    /// Server root, e.g. `http://127.0.0.1:41234`.
    pub root: Url,
    /// Client for the `/api` routes.
    pub api: StorefrontApi,
}

impl TestServer {
    /// Start a storefront with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::start_with(StorefrontConfig::default()).await
    }

    /// Start a storefront with `config`. Host and port are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start_with(config: StorefrontConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = Router::new()
            .route("/images/{name}", get(serve_image))
            .merge(soleverse_storefront::app(AppState::in_memory(config)));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server failed");
        });

        let root = Url::parse(&format!("http://{addr}")).expect("Invalid server address");
        let api = StorefrontApi::new(root.join("api").expect("Invalid API path"));

        Self { root, api }
    }

    /// Absolute URL for a path under the server root.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid relative URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.root.join(path).expect("Invalid test path")
    }

    /// Absolute URL of an image in [`TEST_IMAGES`] (or a missing one).
    #[must_use]
    pub fn image_url(&self, name: &str) -> String {
        self.url(&format!("/images/{name}")).into()
    }
}

async fn serve_image(Path(name): Path<String>) -> Result<&'static [u8], StatusCode> {
    TEST_IMAGES
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, bytes)| *bytes)
        .ok_or(StatusCode::NOT_FOUND)
}

/// An empty cart over throwaway storage.
///
/// # Panics
///
/// Never in practice: empty memory storage always loads.
#[must_use]
pub fn empty_cart() -> CartStore {
    CartStore::load(Arc::new(MemoryStorage::new())).expect("Empty storage always loads")
}

/// Look up a catalog product by name.
///
/// # Panics
///
/// Panics if the product is not in `products`.
#[must_use]
pub fn product_named<'a>(products: &'a [Product], name: &str) -> &'a Product {
    products
        .iter()
        .find(|p| p.name == name)
        .expect("Product missing from catalog")
}
