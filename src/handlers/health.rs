use crate::{error::GatewayError, state::AppState};
use axum::{Json, extract::State};
use serde_json::json;

pub async fn hello() -> &'static str {
    "Hello World!"
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, GatewayError> {
    // Check hub connectivity
    let hub_status = match state.hub.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::error!("Hub health check failed: {e}");
            "unhealthy"
        }
    };

    Ok(Json(json!({
        "status": hub_status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "checks": [{
            "component": "hub",
            "status": hub_status,
            "url": state.hub.base_url()
        }],
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn metrics_handler() -> Result<String, GatewayError> {
    use prometheus::{Encoder, TextEncoder};

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| GatewayError::InternalError(format!("Failed to encode metrics: {e}")))?;

    String::from_utf8(buffer).map_err(|e| {
        GatewayError::InternalError(format!("Failed to convert metrics to string: {e}"))
    })
}
