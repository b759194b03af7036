use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

/// Wraps each request in an `http_request` span and logs status and latency.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let start_time = Instant::now();

    let span = info_span!("http_request", method = %method, uri = %uri, route = %route);
    let response = next.run(request).instrument(span).await;

    let status = response.status().as_u16();
    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    if status >= 500 {
        warn!(%method, %route, status, elapsed_ms, "Request failed");
    } else {
        info!(%method, %route, status, elapsed_ms, "Request completed");
    }

    response
}
