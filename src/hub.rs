use crate::{config::AppConfig, error::GatewayError};
use axum::http::header;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, error, info};

/// Cookie openHAB expects on authenticated item commands.
const AUTH_COOKIE: &str = "X-OPENHAB-AUTH-HEADER=true;";

/// State of an item as reported by the hub. "NULL" is the hub's marker for an
/// item that does not exist (or has never been initialized).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemState {
    On,
    Off,
    Null,
    Other(String),
}

impl ItemState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ON" => ItemState::On,
            "OFF" => ItemState::Off,
            "NULL" => ItemState::Null,
            other => ItemState::Other(other.to_string()),
        }
    }

    /// Command that flips this state: OFF turns ON, anything else turns OFF.
    /// NULL yields no command; a nonexistent item must never be written.
    pub fn toggle(&self) -> Option<Command> {
        match self {
            ItemState::Null => None,
            ItemState::Off => Some(Command::On),
            _ => Some(Command::Off),
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemState::On => f.write_str("ON"),
            ItemState::Off => f.write_str("OFF"),
            ItemState::Null => f.write_str("NULL"),
            ItemState::Other(raw) => f.write_str(raw),
        }
    }
}

/// Write-side value for an item, sent as a plain-text command body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    On,
    Off,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::On => "ON",
            Command::Off => "OFF",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ItemStatus {
    state: String,
}

/// Client for the hub's item REST API. Cheap to clone; all clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct HubClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    read_suffix: String,
}

impl HubClient {
    pub fn new(client: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            client,
            base_url: config.hub_base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
            read_suffix: config.item_read_suffix.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn read_url(&self, item: &str) -> String {
        format!("{}/items/{}{}", self.base_url, item, self.read_suffix)
    }

    fn write_url(&self, item: &str) -> String {
        format!("{}/items/{}", self.base_url, item)
    }

    /// Fetch the current state of a single item.
    pub async fn item_state(&self, item: &str) -> Result<ItemState, GatewayError> {
        let url = self.read_url(item);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| {
                error!("Hub read for {item} failed: {e}");
                GatewayError::HubUnreachable(e.to_string())
            })?;

        let response = check_hub_status(response).await?;

        let status: ItemStatus = response.json().await.map_err(|e| {
            error!("Hub returned malformed item payload for {item}: {e}");
            GatewayError::HubUnreachable(e.to_string())
        })?;

        let state = ItemState::parse(&status.state);
        debug!("State of {item} is {state}");
        Ok(state)
    }

    /// Send an ON/OFF command to a single item.
    pub async fn send_command(&self, item: &str, command: Command) -> Result<(), GatewayError> {
        info!("Turning {item} {command}");

        let response = self
            .client
            .post(self.write_url(item))
            .basic_auth(&self.username, Some(&self.password))
            .header(header::CONTENT_TYPE, "text/plain")
            .header(header::COOKIE, AUTH_COOKIE)
            .body(command.as_str())
            .send()
            .await
            .map_err(|e| {
                error!("Hub write for {item} failed: {e}");
                GatewayError::HubUnreachable(e.to_string())
            })?;

        check_hub_status(response).await?;
        debug!("{item} turned {command}");
        Ok(())
    }

    /// Send the same command to every item, without waiting for the writes to
    /// land. Failures are logged and dropped; the caller's phase timing must
    /// not depend on slow or dead items.
    pub fn send_command_all(&self, items: &[String], command: Command) {
        info!("Turning all {command}");

        for item in items {
            let hub = self.clone();
            let item = item.clone();
            tokio::spawn(async move {
                if let Err(e) = hub.send_command(&item, command).await {
                    error!("Failed to turn {item} {command}: {e}");
                }
            });
        }
    }

    /// Cheap connectivity probe with its own short timeout, independent of
    /// the configured request timeout.
    pub async fn ping(&self) -> Result<(), GatewayError> {
        let url = format!("{}/items", self.base_url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| GatewayError::HubUnreachable(e.to_string()))?;

        check_hub_status(response).await?;
        Ok(())
    }

    /// Fetch the hub's full item list, untouched. Returns the upstream
    /// content type alongside the raw body so the caller can relay both.
    pub async fn list_items(&self) -> Result<(String, Vec<u8>), GatewayError> {
        let url = format!("{}/items", self.base_url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| {
                error!("Hub item-list request failed: {e}");
                GatewayError::HubUnreachable(e.to_string())
            })?;

        let response = check_hub_status(response).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read hub item-list body: {e}");
            GatewayError::HubUnreachable(e.to_string())
        })?;

        Ok((content_type, body.to_vec()))
    }
}

async fn check_hub_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!("Hub returned {status}: {body}");
    Err(GatewayError::HubStatus {
        status: status.as_u16(),
        body,
    })
}
