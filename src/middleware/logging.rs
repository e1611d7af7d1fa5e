use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, warn};
use uuid::Uuid;

pub async fn logging_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    // Span on the route template so item names stay out of the label set
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| path.clone());

    let span = tracing::info_span!(
        "gateway_request",
        request_id = %request_id,
        method = %method,
        route = %route,
        path = %path,
    );

    async move {
        let start = Instant::now();

        let response = next.run(request).await;

        let duration = start.elapsed();
        let status = response.status();

        if status.is_server_error() {
            // 502s here mean the hub call behind this request failed
            warn!(
                status = %status,
                duration_ms = duration.as_millis(),
                "Hub-facing request failed"
            );
        } else if status.is_client_error() {
            info!(
                status = %status,
                duration_ms = duration.as_millis(),
                "Request rejected"
            );
        } else {
            info!(
                status = %status,
                duration_ms = duration.as_millis(),
                "Request completed"
            );
        }

        Ok(response)
    }
    .instrument(span)
    .await
}
