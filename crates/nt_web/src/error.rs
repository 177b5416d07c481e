use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nt_core::ValidationError;
use thiserror::Error;
use tracing::error;

/// Every way a news request can fail, and the status it maps to.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing id parameter")]
    MissingId,

    #[error("invalid id format: {0}")]
    InvalidId(String),

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("failed to decode request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    // Not-found is reported the same way as any other backend fault.
    #[error("failed to {action}: {source}")]
    Storage {
        action: &'static str,
        source: nt_core::Error,
    },
}

impl ApiError {
    pub fn storage(action: &'static str) -> impl FnOnce(nt_core::Error) -> Self {
        move |source| Self::Storage { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Text sent to the client. Decode and storage details stay in the logs.
    fn client_message(&self) -> Option<String> {
        match self {
            Self::MissingId => Some("missing id parameter".to_string()),
            Self::InvalidId(_) => Some("invalid id format".to_string()),
            Self::Validation(e) => Some(format!("validation failed: {}", e)),
            Self::BodyRead(_) | Self::MalformedBody(_) | Self::Storage { .. } => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(error = %self, status = status.as_u16(), "request failed");
        match self.client_message() {
            Some(message) => (status, message).into_response(),
            None => status.into_response(),
        }
    }
}
