//! Request ID middleware for request correlation.
//!
//! Each request gets an ID: the inbound `x-request-id` header when a proxy set
//! a usable one, otherwise a fresh UUID v4. The ID is recorded on the request
//! span, tagged on the Sentry scope, and echoed back in the response headers.
//!
//! An inbound value is reused only when it is non-empty printable ASCII of at
//! most [`MAX_REQUEST_ID_LEN`] bytes.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound request ID that is reused as-is.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Attach a request ID to the request span, Sentry scope, and response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Reuse the inbound request ID if it is acceptable, otherwise mint one.
#[must_use]
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN && id.bytes().all(|b| b.is_ascii_graphic())
}
