use crate::{error::GatewayError, state::AppState};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

/// Toggle an item: read its state, write the opposite. One read and at most
/// one write against the hub per request.
pub async fn toggle_item(
    State(state): State<AppState>,
    Path(item): Path<String>,
) -> impl IntoResponse {
    let timer = state.metrics.request_duration.start_timer();
    state.metrics.toggle_requests_total.inc();

    let result = toggle_item_inner(&state, &item).await;
    timer.stop_and_record();

    match result {
        Ok(body) => body.into_response(),
        Err(e) => {
            error!("Toggle request for {item} failed: {e}");

            match &e {
                GatewayError::ItemNotFound(_) => state.metrics.items_not_found_total.inc(),
                GatewayError::HubUnreachable(_) | GatewayError::HubStatus { .. } => {
                    state.metrics.hub_errors_total.inc()
                }
                _ => {}
            }

            e.into_response()
        }
    }
}

async fn toggle_item_inner(state: &AppState, item: &str) -> Result<String, GatewayError> {
    if item.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "Missing item name".to_string(),
        ));
    }

    let current = state.hub.item_state(item).await?;

    // NULL means the item does not exist upstream; never write to it
    let Some(command) = current.toggle() else {
        return Err(GatewayError::ItemNotFound(item.to_string()));
    };

    info!("State of {item} is {current}");
    state.hub.send_command(item, command).await?;

    Ok(format!("{item} is {current}. Turning it {command}"))
}

/// Relay the hub's item list byte-for-byte, keeping its content type.
pub async fn list_items(State(state): State<AppState>) -> Result<Response, GatewayError> {
    let (content_type, body) = state.hub.list_items().await.inspect_err(|_| {
        state.metrics.hub_errors_total.inc();
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .map_err(|e| GatewayError::InternalError(format!("Response build error: {e}")))
}
