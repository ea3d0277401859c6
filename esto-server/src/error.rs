//! Error handling for the HTTP surface.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use esto_types::{ErrorBody, StorageError};
use std::net::SocketAddr;
use thiserror::Error;
use tracing::error;

/// Failure of a remote procedure, rendered as an [`ErrorBody`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The storage engine failed.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Status code sent to the caller.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!(error = %self, %status, "request failed");

        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Errors that stop the service.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}")]
    Bind {
        /// Address that was requested
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}
