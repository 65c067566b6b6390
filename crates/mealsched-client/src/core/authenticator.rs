//! Bearer token attachment for outbound requests.
//!
//! # Design
//! - Reads the store on every request so a fresh login applies immediately.
//! - Never validates or refreshes tokens; the server is the authority.
//! - A failed store read is logged and the request proceeds without a credential.

use std::rc::Rc;

use async_trait::async_trait;
use http::{HeaderValue, header::AUTHORIZATION};
use tracing::warn;

use crate::core::storage::CredentialStore;
use crate::core::transport::{HttpTransport, TransportError};

/// Transport decorator that adds `Authorization: Bearer <token>` when a token is stored.
pub struct AuthenticatedTransport<T> {
    inner: T,
    store: Rc<dyn CredentialStore>,
}

impl<T> AuthenticatedTransport<T> {
    /// Wrap `inner`, reading tokens from `store`.
    pub fn new(inner: T, store: Rc<dyn CredentialStore>) -> Self {
        Self { inner, store }
    }

    /// Wrapped transport.
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    async fn bearer(&self) -> Option<HeaderValue> {
        let token = match self.store.get().await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "credential store read failed; sending request without token");
                return None;
            }
        };
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(error = %err, "stored token is not a valid header value");
                None
            }
        }
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> HttpTransport for AuthenticatedTransport<T> {
    async fn send(
        &self,
        mut request: http::Request<String>,
    ) -> Result<http::Response<String>, TransportError> {
        if let Some(value) = self.bearer().await {
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        self.inner.send(request).await
    }
}
