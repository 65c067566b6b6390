//! Logging initialisation and build metadata.
//!
//! # Design
//! - Single entry point installs either a pretty or a JSON `fmt` subscriber.
//! - `RUST_LOG` wins over the caller's level when present; the default level is
//!   owned by server configuration.
//! - The build SHA is recorded once so every module reports the same value.

use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, TelemetryError};

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Filter directive (e.g. `info`, `mealsched_api=debug`).
    pub level: &'a str,
    /// Output format for the subscriber.
    pub format: LogFormat,
    /// Build identifier recorded in startup logs.
    pub build_sha: &'a str,
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one object per line.
    Json,
    /// Human-readable output.
    Pretty,
}

impl LogFormat {
    /// Pretty in debug builds, JSON in release builds.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }

    /// Resolve an optional explicit choice, falling back to [`LogFormat::infer`].
    #[must_use]
    pub const fn or_infer(choice: Option<Self>) -> Self {
        match choice {
            Some(format) => format,
            None => Self::infer(),
        }
    }
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::LoggingInstall`] if a global subscriber has
/// already been installed.
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    let _ = BUILD_SHA.set(config.build_sha.to_string());

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::LoggingInstall { source })
}

/// Build SHA recorded by [`init_logging`], or `dev` before initialisation.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or("dev", String::as_str)
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_infer_prefers_the_explicit_choice() {
        assert_eq!(LogFormat::or_infer(Some(LogFormat::Json)), LogFormat::Json);
        assert_eq!(
            LogFormat::or_infer(Some(LogFormat::Pretty)),
            LogFormat::Pretty
        );
        assert_eq!(LogFormat::or_infer(None), LogFormat::infer());
    }

    #[test]
    fn second_install_reports_an_error() {
        let config = LoggingConfig {
            level: "info",
            format: LogFormat::Pretty,
            build_sha: "test-sha",
        };
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::LoggingInstall { .. })
        ));
        assert_eq!(build_sha(), "test-sha");
    }
}
