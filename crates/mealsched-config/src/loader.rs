//! Environment parsing for [`ServerConfig`].
//!
//! # Design
//! - Parsing is driven by an injected lookup so tests never mutate process state.
//! - Malformed values fail loading; absent signing values are tolerated here and
//!   rejected by [`ServerConfig::require_signing`] at startup.

use std::net::IpAddr;

use mealsched_auth::SigningConfig;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{HttpConfig, LogFormatChoice, LoggingSettings, LoginPolicy, ServerConfig};

/// Environment variable names understood by the loader.
pub mod env_keys {
    /// Token issuer.
    pub const JWT_ISSUER: &str = "MEALSCHED_JWT_ISSUER";
    /// Token audience.
    pub const JWT_AUDIENCE: &str = "MEALSCHED_JWT_AUDIENCE";
    /// Shared HS256 signing key.
    pub const JWT_KEY: &str = "MEALSCHED_JWT_KEY";
    /// Listener address.
    pub const BIND_ADDR: &str = "MEALSCHED_BIND_ADDR";
    /// Listener port.
    pub const HTTP_PORT: &str = "MEALSCHED_HTTP_PORT";
    /// Log level or filter directive.
    pub const LOG_LEVEL: &str = "MEALSCHED_LOG_LEVEL";
    /// `json` or `pretty`.
    pub const LOG_FORMAT: &str = "MEALSCHED_LOG_FORMAT";
    /// Accepted login account name.
    pub const LOGIN_USERNAME: &str = "MEALSCHED_LOGIN_USERNAME";
    /// Accepted login password.
    pub const LOGIN_PASSWORD: &str = "MEALSCHED_LOGIN_PASSWORD";
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a present value cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a present value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut http = HttpConfig::default();
        if let Some(value) = read(env_keys::BIND_ADDR) {
            http.bind_addr = value
                .parse::<IpAddr>()
                .map_err(|_| invalid(env_keys::BIND_ADDR, &value, "not_an_ip_address"))?;
        }
        if let Some(value) = read(env_keys::HTTP_PORT) {
            let port = value
                .parse::<u16>()
                .map_err(|_| invalid(env_keys::HTTP_PORT, &value, "out_of_range"))?;
            if port == 0 {
                return Err(invalid(env_keys::HTTP_PORT, &value, "zero"));
            }
            http.port = port;
        }

        let mut logging = LoggingSettings::default();
        if let Some(level) = read(env_keys::LOG_LEVEL) {
            logging.level = level;
        }
        if let Some(value) = read(env_keys::LOG_FORMAT) {
            logging.format = Some(match value.to_ascii_lowercase().as_str() {
                "json" => LogFormatChoice::Json,
                "pretty" => LogFormatChoice::Pretty,
                _ => return Err(invalid(env_keys::LOG_FORMAT, &value, "unknown_format")),
            });
        }

        let mut login = LoginPolicy::default();
        if let Some(username) = read(env_keys::LOGIN_USERNAME) {
            login.username = username;
        }
        if let Some(password) = lookup(env_keys::LOGIN_PASSWORD).filter(|value| !value.is_empty())
        {
            login.password = password;
        }

        let signing = SigningConfig::from_parts(
            read(env_keys::JWT_ISSUER),
            read(env_keys::JWT_AUDIENCE),
            lookup(env_keys::JWT_KEY).filter(|value| !value.trim().is_empty()),
        );

        debug!(
            bind_addr = %http.bind_addr,
            port = http.port,
            signing_configured = signing.validate().is_ok(),
            "server configuration loaded"
        );

        Ok(Self {
            http,
            signing,
            logging,
            login,
        })
    }
}

fn invalid(field: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidField {
        field,
        value: Some(value.to_string()),
        reason,
    }
}
