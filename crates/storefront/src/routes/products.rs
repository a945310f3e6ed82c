//! Product route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use soleverse_core::{ApiResponse, Product};

use crate::state::AppState;

/// List the catalog.
///
/// GET /api/products
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::ok(state.catalog().all().to_vec()))
}
