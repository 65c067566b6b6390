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
#![allow(clippy::module_name_repetitions)]
//! HTTP API for the Mealsched server.
//!
//! Layout: `state.rs` (shared handler state), `credentials.rs` (login credential policy),
//! `store.rs` (schedule/employee data seam), `http/` (router, middleware, handlers),
//! `error.rs` (bootstrap and serve failures).

/// Login credential verification.
pub mod credentials;
/// API server error types.
pub mod error;
/// HTTP router, middleware, and handlers.
pub mod http;
/// Shared handler state.
pub mod state;
/// Meal schedule and employee storage.
pub mod store;

pub use credentials::{CredentialError, CredentialVerifier, StaticCredentialVerifier};
pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
pub use state::ApiState;
pub use store::{InMemoryScheduleStore, ScheduleStore, StoreError, StoreResult};
