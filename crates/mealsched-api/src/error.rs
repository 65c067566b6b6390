//! Errors raised while hosting the API listener.

use std::net::SocketAddr;

use thiserror::Error;

/// Result alias for API server operations.
pub type ApiServerResult<T> = std::result::Result<T, ApiServerError>;

/// Listener lifecycle failures.
#[derive(Debug, Error)]
pub enum ApiServerError {
    /// The listener could not be bound, usually because the port is taken.
    #[error("failed to bind api listener")]
    Bind {
        /// Address attempted.
        addr: SocketAddr,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The accept loop stopped before a shutdown was requested.
    #[error("api server terminated unexpectedly")]
    Serve {
        /// Address the listener was serving.
        addr: SocketAddr,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl ApiServerError {
    /// Listener address involved in the failure.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        match self {
            Self::Bind { addr, .. } | Self::Serve { addr, .. } => *addr,
        }
    }
}
