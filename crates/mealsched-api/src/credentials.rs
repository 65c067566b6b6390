//! Credential policy consulted by the login endpoint.
//!
//! # Design
//! - Verification sits behind a trait so a directory or database backend can replace
//!   the configured pair without touching the handler.
//! - A verifier answers only "accepted or not"; it never reports which field was wrong.

use async_trait::async_trait;
use mealsched_config::LoginPolicy;
use thiserror::Error;

/// Errors raised by a credential backend.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The backend could not be consulted.
    #[error("credential backend unavailable")]
    Unavailable {
        /// Short machine-readable cause.
        reason: &'static str,
    },
}

/// Decides whether a username/password pair may log in.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns `true` when the pair is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the decision cannot be made.
    async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError>;
}

/// Accepts exactly one configured username/password pair.
#[derive(Clone)]
pub struct StaticCredentialVerifier {
    policy: LoginPolicy,
}

impl StaticCredentialVerifier {
    /// Verifier accepting the pair in `policy`.
    #[must_use]
    pub const fn new(policy: LoginPolicy) -> Self {
        Self { policy }
    }
}

impl std::fmt::Debug for StaticCredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialVerifier")
            .field("policy", &self.policy)
            .finish()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let username_matches = constant_time_eq(username.as_bytes(), self.policy.username.as_bytes());
        let password_matches = constant_time_eq(password.as_bytes(), self.policy.password.as_bytes());
        Ok(username_matches & password_matches)
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> StaticCredentialVerifier {
        StaticCredentialVerifier::new(LoginPolicy::default())
    }

    #[tokio::test]
    async fn default_pair_is_accepted() -> Result<(), CredentialError> {
        assert!(verifier().verify("admin", "admin1").await?);
        Ok(())
    }

    #[tokio::test]
    async fn any_mismatch_is_rejected() -> Result<(), CredentialError> {
        let verifier = verifier();
        assert!(!verifier.verify("admin", "wrong").await?);
        assert!(!verifier.verify("root", "admin1").await?);
        assert!(!verifier.verify("", "").await?);
        assert!(!verifier.verify("Admin", "admin1").await?);
        Ok(())
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", verifier());
        assert!(!rendered.contains("admin1"));
    }
}
