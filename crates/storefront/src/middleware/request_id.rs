//! Request ID middleware for request tracing and correlation.
//!
//! Reuses the caller's `x-request-id` when it is a valid header value and
//! generates a UUID v4 otherwise. The ID is:
//! - Written back onto the request so handlers and inner layers see it
//! - Recorded in the current tracing span
//! - Added to the Sentry scope for error correlation
//! - Returned in the response headers

use axum::{
    extract::Request,
    http::{HeaderValue, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that ensures every request and response carries a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);

    let request_id = request
        .headers()
        .get(&header)
        .filter(|h| !h.is_empty())
        .cloned()
        .unwrap_or_else(new_request_id);

    request.headers_mut().insert(header.clone(), request_id.clone());

    if let Ok(id) = request_id.to_str() {
        Span::current().record("request_id", id);
        sentry::configure_scope(|scope| {
            scope.set_tag("request_id", id);
        });
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(header, request_id);
    response
}

fn new_request_id() -> HeaderValue {
    // A hyphenated UUID is always a valid header value.
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
}
