//! Error types for configuration loading.

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration loading and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was absent or blank.
    #[error("required configuration missing")]
    Missing {
        /// Environment variable name.
        name: &'static str,
    },
    /// A setting was present but could not be accepted.
    #[error("invalid configuration field")]
    InvalidField {
        /// Environment variable name.
        field: &'static str,
        /// Offending value when it is safe to echo.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_stay_constant() {
        assert_eq!(
            ConfigError::Missing { name: "X" }.to_string(),
            "required configuration missing"
        );
        assert_eq!(
            ConfigError::InvalidField {
                field: "X",
                value: None,
                reason: "bad",
            }
            .to_string(),
            "invalid configuration field"
        );
    }
}
