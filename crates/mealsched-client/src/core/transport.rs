//! Outbound HTTP seam.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while sending a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("http request failed")]
    Network {
        /// Transport-specific description.
        detail: String,
    },
}

/// Sends a fully built request and returns the raw response.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Send `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response is received.
    async fn send(
        &self,
        request: http::Request<String>,
    ) -> Result<http::Response<String>, TransportError>;
}

#[async_trait(?Send)]
impl<T: HttpTransport + ?Sized> HttpTransport for std::rc::Rc<T> {
    async fn send(
        &self,
        request: http::Request<String>,
    ) -> Result<http::Response<String>, TransportError> {
        (**self).send(request).await
    }
}
