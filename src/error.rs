use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} does not exist.")]
    ItemNotFound(String),

    #[error("Hub request failed: {0}")]
    HubUnreachable(String),

    #[error("Hub returned {status}: {body}")]
    HubStatus { status: u16, body: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::HubUnreachable(_) | GatewayError::HubStatus { .. } => {
                StatusCode::BAD_GATEWAY
            }
            GatewayError::ConfigurationError(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Responses on this surface are plain text throughout, errors included
        (status, self.to_string()).into_response()
    }
}
