//! Payment order route handlers.
//!
//! The paths keep the names the hosted checkout button is wired to.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::instrument;

use soleverse_core::{CaptureOrderRequest, CapturedOrder, CreateOrderRequest, PaymentOrder};

use crate::error::Result;
use crate::state::AppState;

/// Price the submitted items and open a payment order.
///
/// POST /api/create-paypal-order
///
/// # Errors
///
/// Returns 400 for empty items, unknown products or a non-positive total.
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<PaymentOrder>> {
    let Json(request) = payload?;
    let order = state
        .payment_service()
        .create_order(request.items.as_deref())
        .await?;
    Ok(Json(order))
}

/// Capture a payment order.
///
/// POST /api/capture-paypal-order
///
/// # Errors
///
/// Returns 500 if the provider fails.
#[instrument(skip_all)]
pub async fn capture_order(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CaptureOrderRequest>, JsonRejection>,
) -> Result<Json<CapturedOrder>> {
    let Json(request) = payload?;
    let captured = state
        .payment_service()
        .capture_order(&request.order_id)
        .await?;
    Ok(Json(captured))
}
