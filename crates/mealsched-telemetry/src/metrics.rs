//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Collector registration is private; callers only see typed increment helpers.
//! - Label values are fixed strings so cardinality stays bounded.

use std::sync::Arc;

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

/// Result of a login attempt as recorded in `login_attempts_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted and a token issued.
    Success,
    /// Credentials rejected.
    Rejected,
    /// Token issuance failed on the server.
    Error,
}

impl LoginOutcome {
    /// Label value for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Error => "error",
        }
    }
}

/// Prometheus-backed metrics registry shared across the server.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    login_attempts_total: IntCounterVec,
    token_rejections_total: IntCounterVec,
}

/// Point-in-time view of the login counters.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Successful logins.
    pub login_success_total: u64,
    /// Logins refused for bad credentials.
    pub login_rejected_total: u64,
    /// Logins that failed while issuing a token.
    pub login_error_total: u64,
}

impl Metrics {
    /// Construct a registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::CounterRegister`] if a collector cannot be
    /// created or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = counter_vec(
            &registry,
            "http_requests_total",
            "Total HTTP requests handled",
            &["route", "code"],
        )?;
        let login_attempts_total = counter_vec(
            &registry,
            "login_attempts_total",
            "Login attempts by outcome",
            &["outcome"],
        )?;
        let token_rejections_total = counter_vec(
            &registry,
            "token_rejections_total",
            "Bearer tokens rejected by reason",
            &["reason"],
        )?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                login_attempts_total,
                token_rejections_total,
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Record a login attempt.
    pub fn inc_login_attempt(&self, outcome: LoginOutcome) {
        self.inner
            .login_attempts_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Record a bearer token refused by the request guard.
    pub fn inc_token_rejection(&self, reason: &str) {
        self.inner
            .token_rejections_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Render the registry in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::MetricsRender`] or [`TelemetryError::MetricsUtf8`]
    /// when the registry cannot be rendered.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|source| TelemetryError::MetricsRender { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::MetricsUtf8 { source })
    }

    /// Snapshot of the login counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            login_success_total: self.login_count(LoginOutcome::Success),
            login_rejected_total: self.login_count(LoginOutcome::Rejected),
            login_error_total: self.login_count(LoginOutcome::Error),
        }
    }

    fn login_count(&self, outcome: LoginOutcome) -> u64 {
        self.inner
            .login_attempts_total
            .with_label_values(&[outcome.as_str()])
            .get()
    }

    /// Requests recorded for one route template and status code.
    #[must_use]
    pub fn http_requests(&self, route: &str, status: u16) -> u64 {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .get()
    }

    /// Rejections recorded for one reason label.
    #[must_use]
    pub fn token_rejections(&self, reason: &str) -> u64 {
        self.inner
            .token_rejections_total
            .with_label_values(&[reason])
            .get()
    }
}

fn counter_vec(
    registry: &Registry,
    name: &'static str,
    help: &str,
    labels: &[&str],
) -> Result<IntCounterVec> {
    let counter = IntCounterVec::new(Opts::new(name, help), labels)
        .map_err(|source| TelemetryError::CounterRegister { name, source })?;
    registry
        .register(Box::new(counter.clone()))
        .map_err(|source| TelemetryError::CounterRegister { name, source })?;
    Ok(counter)
}
