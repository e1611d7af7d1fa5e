pub mod blink;
pub mod health;
pub mod items;

use crate::state::AppState;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new()
        // Hub item endpoints
        .route("/items", get(items::list_items))
        .route("/items/:item", get(items::toggle_item))
        .route("/blink", get(blink::blink))
        // Health and monitoring
        .route("/", get(health::hello))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics_handler))
}
