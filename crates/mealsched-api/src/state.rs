//! Shared state handed to every handler.

use std::sync::Arc;

use mealsched_auth::TokenCodec;
use mealsched_telemetry::Metrics;

use crate::credentials::CredentialVerifier;
use crate::store::ScheduleStore;

/// Dependencies shared by the HTTP handlers.
pub struct ApiState {
    pub(crate) codec: TokenCodec,
    pub(crate) credentials: Arc<dyn CredentialVerifier>,
    pub(crate) store: Arc<dyn ScheduleStore>,
    pub(crate) telemetry: Metrics,
}

impl ApiState {
    /// Assemble handler state from its collaborators.
    #[must_use]
    pub fn new(
        codec: TokenCodec,
        credentials: Arc<dyn CredentialVerifier>,
        store: Arc<dyn ScheduleStore>,
        telemetry: Metrics,
    ) -> Self {
        Self {
            codec,
            credentials,
            store,
            telemetry,
        }
    }
}
