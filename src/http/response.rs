//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay upstream JSON bodies with status 200
//! - Map relay errors to the `{error, details}` envelope
//!
//! # Design Decisions
//! - Upstream bodies are forwarded byte-for-byte
//! - The upstream status is not relayed; non-2xx answers are logged by the caller
//! - `RelayError` is the only place a failure status is chosen

use std::error::Error as StdError;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::routing::MissingQuery;
use crate::upstream::{UpstreamError, UpstreamResponse};

/// JSON error envelope returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Every way a relayed request can fail.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A required query parameter was absent (400).
    #[error(transparent)]
    MissingQuery(#[from] MissingQuery),

    /// The upstream call failed (500). `message` is the route's failure text.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: UpstreamError,
    },

    /// No route matched the path (404).
    #[error("Not found")]
    NotFound { path: String },
}

impl RelayError {
    /// Status code sent to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingQuery(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Envelope sent to the client.
    pub fn body(&self) -> ErrorBody {
        let details = match self {
            RelayError::MissingQuery(_) => None,
            RelayError::Upstream { source, .. } => Some(error_chain(source)),
            RelayError::NotFound { path } => Some(path.clone()),
        };

        ErrorBody {
            error: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Relay a completed upstream exchange. Any JSON answer is a 200.
pub fn relay(upstream: UpstreamResponse) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response()
}

/// Flatten an error and its sources into one line.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
