//! DOM-free client building blocks.

pub mod authenticator;
pub mod state;
pub mod storage;
pub mod transport;
