//! Login and logout flow tying the API client to the auth state provider.

use std::rc::Rc;

use tracing::info;

use crate::api::{ApiClient, LoginOutcome};
use crate::core::authenticator::AuthenticatedTransport;
use crate::core::state::{AuthState, AuthStateProvider};
use crate::core::storage::CredentialStore;
use crate::core::transport::HttpTransport;
use crate::error::ClientResult;

/// Authenticated API access plus the state provider sharing one credential store.
pub struct Session<T> {
    api: ApiClient<AuthenticatedTransport<T>>,
    provider: AuthStateProvider,
}

impl<T: HttpTransport> Session<T> {
    /// Session over `transport`, persisting tokens in `store`.
    pub fn new(base_url: impl Into<String>, transport: T, store: Rc<dyn CredentialStore>) -> Self {
        let authenticated = AuthenticatedTransport::new(transport, Rc::clone(&store));
        Self {
            api: ApiClient::new(base_url, authenticated),
            provider: AuthStateProvider::new(store),
        }
    }

    /// API client whose requests carry the stored bearer token.
    pub const fn api(&self) -> &ApiClient<AuthenticatedTransport<T>> {
        &self.api
    }

    /// Provider publishing authentication transitions.
    pub const fn auth(&self) -> &AuthStateProvider {
        &self.provider
    }

    /// Log in and, on success, mark the session authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError`] if the request fails or the token cannot be stored.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginOutcome> {
        let outcome = self.api.login(username, password).await?;
        match &outcome {
            LoginOutcome::Authenticated(response) => {
                self.provider.mark_authenticated(&response.token).await?;
                info!(username, expires_at = %response.expiration, "logged in");
            }
            LoginOutcome::Rejected => info!(username, "login rejected"),
        }
        Ok(outcome)
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Storage`] if the token cannot be removed.
    pub async fn logout(&self) -> ClientResult<()> {
        self.provider.mark_logged_out().await
    }

    /// Current authentication state.
    pub async fn state(&self) -> AuthState {
        self.provider.current_state().await
    }
}
