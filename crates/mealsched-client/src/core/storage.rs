//! Persistent credential storage.
//!
//! # Design
//! - A single token lives under [`AUTH_TOKEN_KEY`]; last write wins.
//! - Every operation may fail; callers decide whether a failure is fatal.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

/// Storage key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Errors raised by a credential store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing storage rejected or could not complete the operation.
    #[error("credential storage unavailable")]
    Unavailable {
        /// Operation that failed (`get`, `set`, `remove`).
        operation: &'static str,
        /// Backend-specific description.
        detail: String,
    },
}

/// Async key-value access to the stored bearer token.
#[async_trait(?Send)]
pub trait CredentialStore {
    /// Stored token, if any.
    async fn get(&self) -> Result<Option<String>, StorageError>;
    /// Replace the stored token.
    async fn set(&self, token: &str) -> Result<(), StorageError>;
    /// Delete the stored token.
    async fn remove(&self) -> Result<(), StorageError>;
}

/// Process-local store for native hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(
        &self,
        operation: &'static str,
    ) -> Result<std::sync::MutexGuard<'_, Option<String>>, StorageError> {
        self.token.lock().map_err(|_| StorageError::Unavailable {
            operation,
            detail: "lock poisoned".to_string(),
        })
    }
}

#[async_trait(?Send)]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot("get")?.clone())
    }

    async fn set(&self, token: &str) -> Result<(), StorageError> {
        *self.slot("set")? = Some(token.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<(), StorageError> {
        *self.slot("remove")? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove_round_trip() -> Result<(), StorageError> {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get().await?, None);
        store.set("first").await?;
        store.set("second").await?;
        assert_eq!(store.get().await?.as_deref(), Some("second"));
        store.remove().await?;
        assert_eq!(store.get().await?, None);
        Ok(())
    }

    #[test]
    fn storage_error_message_is_constant() {
        let err = StorageError::Unavailable {
            operation: "get",
            detail: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "credential storage unavailable");
    }
}
