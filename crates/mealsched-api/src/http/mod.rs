//! HTTP surface: router, middleware, and handlers.

pub(crate) mod auth;
pub(crate) mod constants;
pub(crate) mod employees;
pub(crate) mod errors;
pub(crate) mod health;
pub(crate) mod login;
/// Router construction and server host.
pub mod router;
pub(crate) mod schedules;
pub(crate) mod telemetry;

#[cfg(test)]
pub(crate) mod testing;
