//! HTTP middleware stack for the review service.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors and transactions)
//! 2. `TraceLayer` (`http_request` span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request, recorded on the span)

pub mod request_id;
pub mod trace;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use trace::http_trace_layer;
