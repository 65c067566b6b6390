//! Shared fixtures for handler tests.

use std::sync::Arc;

use mealsched_auth::{SigningConfig, TokenCodec};
use mealsched_config::LoginPolicy;
use mealsched_telemetry::Metrics;

use crate::credentials::StaticCredentialVerifier;
use crate::state::ApiState;
use crate::store::InMemoryScheduleStore;

pub(crate) const TEST_KEY: &str = "test-signing-key-0123456789abcdef";

pub(crate) fn test_codec() -> TokenCodec {
    TokenCodec::new(SigningConfig::new("mealsched", "mealsched-web", TEST_KEY))
}

pub(crate) fn test_state() -> Arc<ApiState> {
    test_state_with(test_codec())
}

pub(crate) fn test_state_with(codec: TokenCodec) -> Arc<ApiState> {
    let metrics = Metrics::new().unwrap_or_else(|err| panic!("metrics registry: {err}"));
    Arc::new(ApiState::new(
        codec,
        Arc::new(StaticCredentialVerifier::new(LoginPolicy::default())),
        Arc::new(InMemoryScheduleStore::new()),
        metrics,
    ))
}
