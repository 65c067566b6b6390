//! Client-side authentication state derived from the stored token.
//!
//! # Design
//! - State is recomputed from storage on every read; nothing is cached.
//! - Decoding is key-free and lenient: any unreadable token reads as anonymous.
//! - Transitions are broadcast before persistence so subscribers react immediately.

use std::rc::Rc;

use mealsched_auth::{ClaimSet, decode_claims};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::core::storage::CredentialStore;
use crate::error::{ClientError, ClientResult};

const CHANNEL_CAPACITY: usize = 16;

/// Authorization snapshot for the current user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// No usable token.
    Anonymous,
    /// Token present; claims decoded from its payload.
    Authenticated {
        /// Decoded claims.
        claims: ClaimSet,
    },
}

impl AuthState {
    /// State derived from a raw token.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.trim().is_empty() {
            return Self::Anonymous;
        }
        match decode_claims(token) {
            Ok(claims) => Self::Authenticated { claims },
            Err(err) => {
                debug!(error = %err, "stored token could not be decoded");
                Self::Anonymous
            }
        }
    }

    /// Whether a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Claims of the current user; empty when anonymous.
    #[must_use]
    pub fn claims(&self) -> ClaimSet {
        match self {
            Self::Anonymous => ClaimSet::new(),
            Self::Authenticated { claims } => claims.clone(),
        }
    }

    /// Display name of the current user.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { claims } => claims.name(),
        }
    }

    /// Whether the current user carries `role`.
    #[must_use]
    pub fn is_in_role(&self, role: &str) -> bool {
        match self {
            Self::Anonymous => false,
            Self::Authenticated { claims } => claims.has_role(role),
        }
    }
}

/// Notification sent to subscribers on every transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthStateChanged {
    /// State after the transition.
    pub state: AuthState,
}

/// Receiving half handed out by [`AuthStateProvider::subscribe`].
pub type AuthStateReceiver = broadcast::Receiver<AuthStateChanged>;

/// Derives and publishes the authentication state.
pub struct AuthStateProvider {
    store: Rc<dyn CredentialStore>,
    notifier: broadcast::Sender<AuthStateChanged>,
}

impl AuthStateProvider {
    /// Provider reading tokens from `store`.
    #[must_use]
    pub fn new(store: Rc<dyn CredentialStore>) -> Self {
        let (notifier, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { store, notifier }
    }

    /// Current state; never fails.
    pub async fn current_state(&self) -> AuthState {
        match self.store.get().await {
            Ok(Some(token)) => AuthState::from_token(&token),
            Ok(None) => AuthState::Anonymous,
            Err(err) => {
                warn!(error = %err, "credential store read failed; treating user as anonymous");
                AuthState::Anonymous
            }
        }
    }

    /// Announce `token` as the new credential and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the token cannot be persisted; subscribers
    /// have already been notified at that point.
    pub async fn mark_authenticated(&self, token: &str) -> ClientResult<()> {
        self.notify(AuthState::from_token(token));
        self.store
            .set(token)
            .await
            .map_err(|source| ClientError::Storage { source })
    }

    /// Announce logout and remove the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the token cannot be removed.
    pub async fn mark_logged_out(&self) -> ClientResult<()> {
        self.notify(AuthState::Anonymous);
        self.store
            .remove()
            .await
            .map_err(|source| ClientError::Storage { source })
    }

    /// Receive a snapshot on every subsequent transition.
    #[must_use]
    pub fn subscribe(&self) -> AuthStateReceiver {
        self.notifier.subscribe()
    }

    fn notify(&self, state: AuthState) {
        // No receivers is not an error.
        let _ = self.notifier.send(AuthStateChanged { state });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::authenticator::tests::BrokenStore;
    use crate::core::storage::MemoryCredentialStore;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn unsigned_token(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    fn provider_with(store: Rc<MemoryCredentialStore>) -> AuthStateProvider {
        AuthStateProvider::new(store)
    }

    #[tokio::test]
    async fn empty_store_is_anonymous() {
        let provider = provider_with(Rc::new(MemoryCredentialStore::new()));
        assert_eq!(provider.current_state().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn blank_or_undecodable_tokens_are_anonymous() {
        for token in ["", "   ", "header.***.sig"] {
            let provider = provider_with(Rc::new(MemoryCredentialStore::with_token(token)));
            assert_eq!(provider.current_state().await, AuthState::Anonymous, "{token:?}");
        }
    }

    #[tokio::test]
    async fn unreadable_store_is_anonymous() {
        let provider = AuthStateProvider::new(Rc::new(BrokenStore));
        assert_eq!(provider.current_state().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn stored_token_yields_decoded_claims() {
        let token = unsigned_token(r#"{"name":"admin","role":["User","Planner"]}"#);
        let provider = provider_with(Rc::new(MemoryCredentialStore::with_token(token)));
        let state = provider.current_state().await;
        assert!(state.is_authenticated());
        assert_eq!(state.user_name(), Some("admin"));
        assert!(state.is_in_role("Planner"));
        assert!(!state.is_in_role("Admin"));
    }

    #[tokio::test]
    async fn mark_authenticated_then_logged_out() -> anyhow::Result<()> {
        let store = Rc::new(MemoryCredentialStore::new());
        let provider = provider_with(Rc::clone(&store));
        let token = unsigned_token(r#"{"name":"admin","role":"User"}"#);

        provider.mark_authenticated(&token).await?;
        assert_eq!(store.get().await?.as_deref(), Some(token.as_str()));
        let claims = provider.current_state().await.claims();
        assert_eq!(claims.name(), Some("admin"));
        assert_eq!(claims.roles(), ["User".to_string()]);

        provider.mark_logged_out().await?;
        assert_eq!(provider.current_state().await, AuthState::Anonymous);
        assert_eq!(store.get().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn subscribers_receive_every_transition() -> anyhow::Result<()> {
        let provider = provider_with(Rc::new(MemoryCredentialStore::new()));
        let mut first = provider.subscribe();
        let mut second = provider.subscribe();
        let token = unsigned_token(r#"{"name":"admin"}"#);

        provider.mark_authenticated(&token).await?;
        provider.mark_logged_out().await?;

        for receiver in [&mut first, &mut second] {
            let signed_in = receiver.try_recv()?;
            assert_eq!(signed_in.state.user_name(), Some("admin"));
            let signed_out = receiver.try_recv()?;
            assert_eq!(signed_out.state, AuthState::Anonymous);
        }
        Ok(())
    }

    #[tokio::test]
    async fn persistence_failure_is_reported_after_notifying() {
        let provider = AuthStateProvider::new(Rc::new(BrokenStore));
        let mut receiver = provider.subscribe();
        let result = provider.mark_authenticated("a.b.c").await;
        assert!(matches!(result, Err(ClientError::Storage { .. })));
        assert!(receiver.try_recv().is_ok());
        assert!(matches!(
            provider.mark_logged_out().await,
            Err(ClientError::Storage { .. })
        ));
    }
}
