#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
//! Telemetry primitives shared across the Mealsched workspace.
//!
//! This crate centralises logging, metrics, and request-id helpers so the server
//! binary and the API router adopt a consistent observability story.

/// Error types for telemetry helpers.
pub mod error;
/// Logging initialisation and build metadata.
pub mod init;
/// Request ID middleware helpers.
pub mod layers;
/// Prometheus metrics registry.
pub mod metrics;

pub use error::{Result, TelemetryError};
pub use init::{LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, set_request_id_layer};
pub use metrics::{LoginOutcome, Metrics, MetricsSnapshot};
