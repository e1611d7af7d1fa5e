use crate::state::AppState;
use axum::{body::Body, extract::Request, extract::State, middleware::Next, response::Response};

pub async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Scrapes of the exposition endpoint would inflate the request counter
    if request.uri().path() != "/metrics" {
        state.metrics.requests_total.inc();
    }
    state.metrics.active_connections.inc();

    let response = next.run(request).await;

    state.metrics.active_connections.dec();

    response
}
