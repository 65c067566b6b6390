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
//! Mealsched browser client core.
//!
//! Layout: `core/` (credential storage, transport seam, bearer attachment, auth state),
//! `api.rs` (typed REST client), `session.rs` (login/logout flow), `browser.rs`
//! (`wasm32` adapters over `LocalStorage` and `fetch`).
//!
//! Everything outside `browser.rs` is DOM-free so it builds and tests natively.

/// Typed REST client.
pub mod api;
/// Browser adapters (`wasm32` only).
#[cfg(target_arch = "wasm32")]
pub mod browser;
/// Credential storage, transport, and authentication state.
pub mod core;
/// Client error types.
pub mod error;
/// Login/logout orchestration.
pub mod session;

pub use api::{ApiClient, LoginOutcome};
pub use crate::core::authenticator::AuthenticatedTransport;
pub use crate::core::state::{AuthState, AuthStateChanged, AuthStateProvider, AuthStateReceiver};
pub use crate::core::storage::{AUTH_TOKEN_KEY, CredentialStore, MemoryCredentialStore, StorageError};
pub use crate::core::transport::{HttpTransport, TransportError};
pub use error::{ClientError, ClientResult};
pub use session::Session;
