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

//! Environment-backed server configuration.
//!
//! Layout: `model.rs` (typed settings), `loader.rs` (environment parsing),
//! `validate.rs` (startup guards for signing material).

pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::env_keys;
pub use model::{
    DEFAULT_LOG_LEVEL, HttpConfig, LogFormatChoice, LoggingSettings, LoginPolicy, ServerConfig,
};
pub use validate::MIN_SIGNING_KEY_BYTES;
