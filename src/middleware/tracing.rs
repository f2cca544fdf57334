use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Wrap each request in a span carrying the route and a fresh request id,
/// then log status and latency once the handler finishes.
pub async fn request_tracing(matched_path: MatchedPath, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = matched_path.as_str().to_string();

    let span = info_span!(
        "http_request",
        method = %method,
        route = %route,
        request_id = %uuid::Uuid::now_v7(),
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span).await;

    info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
