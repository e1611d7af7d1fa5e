use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BLINK_ITEMS: [&str; 4] = ["Kitchen", "Livingroom", "VinnisPlug", "MainHallway"];

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AppConfig {
    // Server configuration
    pub listen_addr: String,
    pub request_timeout: Duration,

    // Hub connection
    pub hub_host: String,
    pub username: String,
    pub password: String,

    /// Suffix appended to the item name on reads only. Hubs that expose a
    /// `_Power` child item per device set this to `_Power`; writes always go
    /// to the bare item name.
    pub item_read_suffix: String,

    // Blink sequence
    pub blink_items: Vec<String>,
    pub blink_phase_delay: Duration,

    // Operational configuration
    pub metrics_enabled: bool,
    pub debug_mode: bool,
    pub log_format: LogFormat,
    pub log_level: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Default,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            request_timeout: Duration::from_secs(30),
            hub_host: String::new(),
            username: String::new(),
            password: String::new(),
            item_read_suffix: String::new(),
            blink_items: DEFAULT_BLINK_ITEMS.iter().map(|s| s.to_string()).collect(),
            blink_phase_delay: Duration::from_millis(2000),
            metrics_enabled: true,
            debug_mode: false,
            log_format: LogFormat::Default,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        // Server configuration
        if let Ok(port) = std::env::var("PORT") {
            let port: u16 = port.parse()?;
            config.listen_addr = format!("0.0.0.0:{port}");
        }

        // LISTEN_ADDR wins over PORT when both are set
        if let Ok(addr) = std::env::var("LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(timeout) = std::env::var("REQUEST_TIMEOUT") {
            config.request_timeout = Duration::from_secs(timeout.parse()?);
        }

        // Hub connection
        if let Ok(host) = std::env::var("OPENHAB_HOST") {
            config.hub_host = host;
        }

        if let Ok(username) = std::env::var("USERNAME") {
            config.username = username;
        }

        if let Ok(password) = std::env::var("PASSWORD") {
            config.password = password;
        }

        if let Ok(suffix) = std::env::var("ITEM_READ_SUFFIX") {
            config.item_read_suffix = suffix;
        }

        // Blink sequence
        if let Ok(items) = std::env::var("BLINK_ITEMS") {
            let items: Vec<String> = items
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();

            if !items.is_empty() {
                config.blink_items = items;
            }
        }

        if let Ok(delay) = std::env::var("BLINK_DELAY_MS") {
            config.blink_phase_delay = Duration::from_millis(delay.parse()?);
        }

        // Operational configuration
        if let Ok(enabled) = std::env::var("METRICS_ENABLED") {
            config.metrics_enabled = enabled.parse()?;
        }

        if let Ok(debug) = std::env::var("GATEWAY_DEBUG") {
            config.debug_mode = debug.parse()?;
        }

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.log_format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Default,
            };
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.hub_host.trim().is_empty() {
            bail!("OPENHAB_HOST must be set to the hub's host");
        }

        if self.blink_items.is_empty() {
            bail!("Blink item set must not be empty");
        }

        if self.blink_phase_delay.is_zero() {
            bail!("BLINK_DELAY_MS must be greater than zero");
        }

        Ok(())
    }

    /// Base URL for hub requests. `OPENHAB_HOST` may carry its own scheme
    /// (useful for plain-HTTP hubs on a LAN); otherwise HTTPS is assumed.
    pub fn hub_base_url(&self) -> String {
        let host = self.hub_host.trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.blink_items.len(), 4);
        assert_eq!(config.blink_phase_delay, Duration::from_millis(2000));
        assert!(config.item_read_suffix.is_empty());
    }

    #[test]
    fn test_validation_requires_hub_host() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());

        let config = AppConfig {
            hub_host: "openhab.local".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_blink_set() {
        let config = AppConfig {
            hub_host: "openhab.local".to_string(),
            blink_items: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hub_base_url_scheme_handling() {
        let mut config = AppConfig {
            hub_host: "openhab.local".to_string(),
            ..Default::default()
        };
        assert_eq!(config.hub_base_url(), "https://openhab.local");

        config.hub_host = "http://192.168.1.10:8080/".to_string();
        assert_eq!(config.hub_base_url(), "http://192.168.1.10:8080");
    }
}
