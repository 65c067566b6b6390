//! Error types for client operations.

use thiserror::Error;

use crate::core::storage::StorageError;
use crate::core::transport::TransportError;

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by the client API and session flow.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential storage failed.
    #[error("credential storage failed")]
    Storage {
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
    /// The request could not be sent.
    #[error("request could not be sent")]
    Transport {
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
    /// The request could not be built.
    #[error("request could not be built")]
    Request {
        /// Underlying HTTP builder error.
        #[source]
        source: http::Error,
    },
    /// The server answered with a non-success status.
    #[error("server returned an error status")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The request body could not be serialised.
    #[error("request body could not be encoded")]
    Encode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The response body could not be parsed.
    #[error("response body could not be decoded")]
    Decode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
