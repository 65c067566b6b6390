//! Startup guards for signing material.

use mealsched_auth::TokenError;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::env_keys;
use crate::model::ServerConfig;

/// Minimum HS256 key length; shorter keys weaken the MAC.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

impl ServerConfig {
    /// Ensure issuer, audience, and a sufficiently long key are configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for absent settings and
    /// [`ConfigError::InvalidField`] when the key is shorter than
    /// [`MIN_SIGNING_KEY_BYTES`]. The key itself is never echoed.
    pub fn require_signing(&self) -> ConfigResult<()> {
        self.signing.validate().map_err(|err| match err {
            TokenError::Configuration { field } => ConfigError::Missing {
                name: env_name(field),
            },
            _ => ConfigError::Missing {
                name: env_keys::JWT_KEY,
            },
        })?;

        if self.signing.key_len() < MIN_SIGNING_KEY_BYTES {
            return Err(ConfigError::InvalidField {
                field: env_keys::JWT_KEY,
                value: None,
                reason: "too_short",
            });
        }
        Ok(())
    }
}

fn env_name(field: &str) -> &'static str {
    match field {
        "issuer" => env_keys::JWT_ISSUER,
        "audience" => env_keys::JWT_AUDIENCE,
        _ => env_keys::JWT_KEY,
    }
}
