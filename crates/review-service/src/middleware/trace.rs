//! Request tracing layer.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response},
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultOnRequest, DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

type MakeHttpSpan = fn(&Request<Body>) -> Span;
type OnHttpResponse = fn(&Response<Body>, Duration, &Span);

/// `TraceLayer` configured with the service's span layout.
pub type HttpTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeHttpSpan, DefaultOnRequest, OnHttpResponse>;

/// Build the HTTP tracing layer.
///
/// Every request runs inside an `http_request` span. `request_id` is filled in
/// by the request ID middleware; `status` and `latency_ms` on response.
#[must_use]
pub fn http_trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeHttpSpan)
        .on_response(on_response as OnHttpResponse)
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    )
}

fn on_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status", response.status().as_u16());
    span.record(
        "latency_ms",
        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
    );
    DefaultOnResponse::default().on_response(response, latency, span);
}
