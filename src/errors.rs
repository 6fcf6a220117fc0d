use astra::Response;
// errors.rs
use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors originating from either the server logic
/// (routing, request validation, etc.) or the persistence gateway.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    /// Rejected before reaching the gateway.
    #[error("{0}")]
    BadRequest(String),

    /// A stored procedure call failed. `error` is the stable message shown to
    /// clients, `details` carries the gateway's own text.
    #[error("{error}: {details}")]
    Operation { error: String, details: String },

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn operation(error: impl Into<String>, source: GatewayError) -> Self {
        ServerError::Operation {
            error: error.into(),
            details: source.to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Operation { .. } | ServerError::Internal(_) => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
