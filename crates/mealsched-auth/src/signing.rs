//! Signing configuration injected into the token codec.

use std::fmt;

use crate::error::{TokenError, TokenResult};

/// Issuer, audience, and shared secret used to sign and verify tokens.
///
/// Every setting is optional at construction so that a partially configured
/// deployment can be represented; [`SigningConfig::validate`] reports the first
/// missing value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SigningConfig {
    issuer: Option<String>,
    audience: Option<String>,
    key: Option<String>,
}

#[cfg_attr(not(feature = "signing"), allow(dead_code))]
pub(crate) struct ResolvedSigning<'a> {
    pub(crate) issuer: &'a str,
    pub(crate) audience: &'a str,
    pub(crate) key: &'a [u8],
}

impl SigningConfig {
    /// Fully populated configuration.
    #[must_use]
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            issuer: Some(issuer.into()),
            audience: Some(audience.into()),
            key: Some(key.into()),
        }
    }

    /// Configuration assembled from optional settings.
    #[must_use]
    pub const fn from_parts(
        issuer: Option<String>,
        audience: Option<String>,
        key: Option<String>,
    ) -> Self {
        Self {
            issuer,
            audience,
            key,
        }
    }

    /// Configuration with nothing set.
    #[must_use]
    pub const fn unset() -> Self {
        Self::from_parts(None, None, None)
    }

    /// Configured issuer.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Configured audience.
    #[must_use]
    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    /// Length of the signing key in bytes, zero when unset.
    #[must_use]
    pub fn key_len(&self) -> usize {
        self.key.as_ref().map_or(0, String::len)
    }

    /// Check that issuer, audience, and key are all present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] naming the first missing setting.
    pub fn validate(&self) -> TokenResult<()> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> TokenResult<ResolvedSigning<'_>> {
        Ok(ResolvedSigning {
            issuer: required(self.issuer.as_deref(), "issuer")?,
            audience: required(self.audience.as_deref(), "audience")?,
            key: required(self.key.as_deref(), "key")?.as_bytes(),
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> TokenResult<&'a str> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(TokenError::Configuration { field })
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
