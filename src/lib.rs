pub mod config;
pub mod error;
pub mod handlers;
pub mod hub;
pub mod metrics;
pub mod middleware;
pub mod state;

pub use config::AppConfig;
pub use error::GatewayError;
pub use hub::{Command, HubClient, ItemState};
pub use state::AppState;
