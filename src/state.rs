use crate::{config::AppConfig, hub::HubClient, metrics::AppMetrics};

#[derive(Clone)]
pub struct AppState {
    pub hub: HubClient,
    pub config: AppConfig,
    pub metrics: AppMetrics,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        // Shared HTTP client for all hub requests
        let http_client = create_http_client(&config)?;
        let hub = HubClient::new(http_client, &config);

        let metrics = AppMetrics::default();

        Ok(Self {
            hub,
            config,
            metrics,
        })
    }
}

fn create_http_client(config: &AppConfig) -> anyhow::Result<reqwest::Client> {
    let mut client_builder = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .tcp_keepalive(std::time::Duration::from_secs(60))
        .tcp_nodelay(true)
        .user_agent("openhab-gateway/1.0")
        .danger_accept_invalid_certs(config.debug_mode); // Only in debug mode

    // Configure proxy if needed
    if let Ok(proxy_url) = std::env::var("HTTP_PROXY") {
        client_builder = client_builder.proxy(reqwest::Proxy::http(proxy_url)?);
    }
    if let Ok(proxy_url) = std::env::var("HTTPS_PROXY") {
        client_builder = client_builder.proxy(reqwest::Proxy::https(proxy_url)?);
    }

    Ok(client_builder.build()?)
}
