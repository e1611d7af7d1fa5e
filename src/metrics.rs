use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};
use std::sync::OnceLock;

// The default prometheus registry rejects duplicate collector names, so the
// metrics set is created once per process and shared by every AppState.
static GLOBAL_METRICS: OnceLock<AppMetrics> = OnceLock::new();

#[derive(Clone)]
pub struct AppMetrics {
    pub requests_total: Counter,
    pub toggle_requests_total: Counter,
    pub blink_sequences_total: Counter,
    pub items_not_found_total: Counter,
    pub hub_errors_total: Counter,
    pub request_duration: Histogram,
    pub active_connections: Gauge,
}

impl Default for AppMetrics {
    fn default() -> Self {
        GLOBAL_METRICS.get_or_init(AppMetrics::new).clone()
    }
}

impl AppMetrics {
    fn new() -> Self {
        Self {
            requests_total: register_counter!(
                "gateway_requests_total",
                "Total number of requests handled by the gateway"
            )
            .unwrap(),
            toggle_requests_total: register_counter!(
                "gateway_toggle_requests_total",
                "Total number of item toggle requests"
            )
            .unwrap(),
            blink_sequences_total: register_counter!(
                "gateway_blink_sequences_total",
                "Total number of completed blink sequences"
            )
            .unwrap(),
            items_not_found_total: register_counter!(
                "gateway_items_not_found_total",
                "Total number of toggle requests for nonexistent items"
            )
            .unwrap(),
            hub_errors_total: register_counter!(
                "gateway_hub_errors_total",
                "Total number of failed hub calls"
            )
            .unwrap(),
            request_duration: register_histogram!(
                "gateway_request_duration_seconds",
                "Duration of gateway request processing"
            )
            .unwrap(),
            active_connections: register_gauge!(
                "gateway_active_connections",
                "Number of in-flight requests"
            )
            .unwrap(),
        }
    }
}
