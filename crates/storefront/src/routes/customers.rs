//! Customer route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use soleverse_core::{ApiResponse, CustomerRecord, NewCustomer};

use crate::error::Result;
use crate::state::AppState;

/// Record the customer submitted at checkout.
///
/// POST /api/customer
///
/// # Errors
///
/// Returns 400 for missing fields, validation failures and duplicate emails,
/// and 500 if the repository fails.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewCustomer>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerRecord>>)> {
    let Json(input) = payload?;
    let record = state.customer_service().create_customer(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "Customer created successfully",
            record,
        )),
    ))
}
