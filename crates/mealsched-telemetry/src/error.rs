//! Error types for logging and metrics setup.

use thiserror::Error;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Failures while installing logging or exposing counters.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed.
    #[error("logging already initialised")]
    LoggingInstall {
        /// Underlying tracing subscriber error.
        source: tracing_subscriber::util::TryInitError,
    },
    /// A counter family could not be built or registered.
    #[error("failed to register counter")]
    CounterRegister {
        /// Counter family name.
        name: &'static str,
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// The registry could not be rendered as Prometheus text.
    #[error("failed to render metrics")]
    MetricsRender {
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// Rendered metrics output was not valid UTF-8.
    #[error("metrics output was not valid utf-8")]
    MetricsUtf8 {
        /// Underlying UTF-8 conversion error.
        source: std::string::FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn counter_failures_keep_the_family_name() {
        let err = TelemetryError::CounterRegister {
            name: "login_attempts_total",
            source: prometheus::Error::AlreadyReg,
        };
        assert_eq!(err.to_string(), "failed to register counter");
        assert!(matches!(
            err,
            TelemetryError::CounterRegister {
                name: "login_attempts_total",
                ..
            }
        ));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_utf8_render_is_reported() -> anyhow::Result<()> {
        let source = String::from_utf8(vec![0xff])
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected utf-8 error"))?;
        let err = TelemetryError::MetricsUtf8 { source };
        assert_eq!(err.to_string(), "metrics output was not valid utf-8");
        assert!(err.source().is_some());
        Ok(())
    }
}
