#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Mealsched server bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (environment loading and service wiring), `error.rs`
//! (application error type).

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application error types.
pub mod error;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
