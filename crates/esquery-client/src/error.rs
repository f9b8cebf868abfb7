//! Error types for the search client.

use thiserror::Error;

/// Errors that can occur while talking to the search backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Query failed strict validation.
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] esquery::QueryError),

    /// The request could not be delivered (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("search backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// Response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Operation requires a connected client.
    #[error("client is not connected; call connect() first")]
    NotConnected,

    /// No index name configured.
    #[error("no index configured")]
    MissingIndex,
}

/// Result type for client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
