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
//! Bearer token primitives shared by the Mealsched server and browser client.
//!
//! Layout: `claims.rs` (claim sets), `decode.rs` (lenient, key-free payload decoding),
//! `signing.rs` (injected signing configuration), `codec.rs` (mint/verify, behind the
//! `signing` feature so the client build stays free of crypto dependencies).

/// Claim sets and well-known claim names.
pub mod claims;
/// Signed token minting and verification.
#[cfg(feature = "signing")]
pub mod codec;
/// Lenient payload decoding used to derive client-side authorization state.
pub mod decode;
/// Error types for token operations.
pub mod error;
/// Signing configuration injected into the codec.
pub mod signing;

pub use claims::{ClaimSet, NAME_CLAIM, REGISTERED_CLAIMS, ROLE_CLAIM};
#[cfg(feature = "signing")]
pub use codec::{DEFAULT_TOKEN_TTL_MINUTES, MintedToken, TokenCodec};
pub use decode::decode_claims;
#[cfg(feature = "signing")]
pub use error::RejectionReason;
pub use error::{TokenError, TokenResult};
pub use signing::SigningConfig;
