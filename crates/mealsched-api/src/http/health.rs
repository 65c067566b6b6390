//! Liveness and metrics endpoints.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use mealsched_telemetry::{MetricsSnapshot, build_sha};
use serde::Serialize;
use tracing::error;

use crate::http::errors::ApiError;
use crate::state::ApiState;

const METRICS_FAILURE_MESSAGE: &str = "failed to render metrics";

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) build: &'static str,
    pub(crate) logins: MetricsSnapshot,
}

pub(crate) async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        build: build_sha(),
        logins: state.telemetry.snapshot(),
    })
}

pub(crate) async fn metrics(State(state): State<Arc<ApiState>>) -> Result<Response, ApiError> {
    let body = state.telemetry.render().map_err(|err| {
        error!(error = %err, "failed to render metrics");
        ApiError::internal(METRICS_FAILURE_MESSAGE, err.to_string())
    })?;
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(Body::from(body))
        .map_err(|err| {
            error!(error = %err, "failed to build metrics response");
            ApiError::internal(METRICS_FAILURE_MESSAGE, "response build failed")
        })
}
