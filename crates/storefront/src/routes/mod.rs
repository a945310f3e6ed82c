//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (customer repository)
//!
//! # API (JSON)
//! GET  /api/products                - Product catalog
//! POST /api/customer                - Record checkout customer
//! POST /api/create-paypal-order     - Create payment order
//! POST /api/capture-paypal-order    - Capture payment order
//! ```

pub mod customers;
pub mod health;
pub mod payments;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/customer", post(customers::create))
        .route("/create-paypal-order", post(payments::create_order))
        .route("/capture-paypal-order", post(payments::capture_order))
        .fallback(not_found)
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_owned())
}
