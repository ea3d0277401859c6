use thiserror::Error;

/// Errors returned by [`Client`](crate::Client) calls.
///
/// Transport failures are passed through unchanged; nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint could not be used as a base URL.
    #[error("invalid endpoint '{endpoint}': {detail}")]
    InvalidEndpoint {
        /// The endpoint as given
        endpoint: String,
        /// Why it was refused
        detail: String,
    },

    /// The HTTP transport failed or the reply could not be decoded.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The event payload could not be serialized to JSON text.
    #[error("failed to serialize event data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("call rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message from the service, or the raw body
        message: String,
    },
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;
