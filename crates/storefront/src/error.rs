//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Every error is rendered as the JSON envelope `{success: false, message, errors?}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use soleverse_core::ApiResponse;

use crate::services::{CustomerError, PaymentError};

/// Prefix axum puts in front of a JSON body that parsed but did not fit the target type.
const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Customer operation failed.
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    /// Payment operation failed.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Well-formed JSON whose fields have the wrong shape.
    #[error("Validation Error")]
    InvalidBody(Vec<String>),

    /// Request body could not be read as JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                Self::InvalidBody(vec![data_error_detail(&e.body_text())])
            }
            other => Self::BadRequest(other.body_text()),
        }
    }
}

/// `"<field path>: <reason>"` from axum's data-error text, without the
/// generic prefix or the line/column suffix.
fn data_error_detail(text: &str) -> String {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);
    let detail = detail
        .rfind(" at line ")
        .map_or(detail, |at| detail.get(..at).unwrap_or(detail));
    detail.to_owned()
}

impl AppError {
    /// Whether this is a server-side failure (logged, captured, and hidden from clients).
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Customer(CustomerError::Repository(_)) | Self::Payment(PaymentError::Provider(_))
        )
    }

    fn status(&self) -> StatusCode {
        if self.is_server_error() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match self {
            Self::Customer(CustomerError::Repository(_)) => {
                ApiResponse::failure("Error creating customer")
            }
            Self::Payment(PaymentError::Provider(_)) => {
                ApiResponse::failure("Payment provider error")
            }
            Self::Customer(CustomerError::Validation(errors)) | Self::InvalidBody(errors) => {
                ApiResponse::invalid("Validation Error", errors)
            }
            Self::Customer(err) => ApiResponse::failure(err.to_string()),
            Self::Payment(err) => ApiResponse::failure(err.to_string()),
            Self::BadRequest(msg) | Self::NotFound(msg) => ApiResponse::failure(msg),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use soleverse_core::ProductId;

    use crate::db::RepositoryError;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Customer(CustomerError::DuplicateEmail)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Payment(PaymentError::ProductNotFound(
                ProductId::new(9)
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Payment(PaymentError::Provider("down".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::InvalidBody(vec!["address: bad".to_string()])),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_missing_field_envelope() {
        let (status, body) = render(AppError::Customer(CustomerError::MissingField)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "message": "Please provide all required fields"})
        );
    }

    #[tokio::test]
    async fn test_validation_envelope_carries_errors() {
        let err = CustomerError::Validation(vec!["City is required".to_string()]);
        let (status, body) = render(AppError::Customer(err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(body["errors"], serde_json::json!(["City is required"]));
    }

    #[tokio::test]
    async fn test_server_error_details_hidden() {
        let err = CustomerError::Repository(RepositoryError::DataCorruption(
            "secret detail".to_string(),
        ));
        let (status, body) = render(AppError::Customer(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error creating customer");
        assert!(!body.to_string().contains("secret detail"));
    }

    #[test]
    fn test_data_error_detail_keeps_path_and_reason() {
        let text = "Failed to deserialize the JSON body into the target type: \
                    address: invalid type: string \"12 MG Road\", expected struct Address \
                    at line 1 column 89";
        assert_eq!(
            data_error_detail(text),
            "address: invalid type: string \"12 MG Road\", expected struct Address"
        );
        assert_eq!(data_error_detail("items: oops"), "items: oops");
    }
}
