//! `POST /api/login`: exchange a username/password pair for a bearer token.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Duration;
use mealsched_api_models::{LoginRequest, LoginResponse};
use mealsched_auth::{ClaimSet, DEFAULT_TOKEN_TTL_MINUTES, NAME_CLAIM, ROLE_CLAIM};
use mealsched_telemetry::LoginOutcome;
use tracing::{error, info, warn};

use crate::http::constants::{DEFAULT_ROLE, LOGIN_FAILURE_MESSAGE};
use crate::http::errors::ApiError;
use crate::state::ApiState;

pub(crate) async fn login(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let accepted = state
        .credentials
        .verify(&request.username, &request.password)
        .await
        .map_err(|err| login_failure(&state, &err))?;

    if !accepted {
        warn!(username = %request.username, "login rejected");
        state.telemetry.inc_login_attempt(LoginOutcome::Rejected);
        return Err(ApiError::unauthorized());
    }

    let claims = ClaimSet::new()
        .with(NAME_CLAIM, request.username.as_str())
        .with(ROLE_CLAIM, DEFAULT_ROLE);
    let minted = state
        .codec
        .mint(&claims, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
        .map_err(|err| login_failure(&state, &err))?;

    info!(
        username = %request.username,
        expires_at = %minted.expires_at,
        "login succeeded"
    );
    state.telemetry.inc_login_attempt(LoginOutcome::Success);
    Ok(Json(LoginResponse {
        token: minted.token,
        expiration: minted.expires_at,
    }))
}

fn login_failure(state: &ApiState, err: &dyn std::error::Error) -> ApiError {
    error!(error = %err, "login failed");
    state.telemetry.inc_login_attempt(LoginOutcome::Error);
    ApiError::internal(LOGIN_FAILURE_MESSAGE, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{TEST_KEY, test_state, test_state_with};
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::{DateTime, Utc};
    use mealsched_auth::{SigningConfig, TokenCodec, decode_claims};

    #[tokio::test]
    async fn valid_credentials_issue_a_thirty_minute_token() -> anyhow::Result<()> {
        let state = test_state();
        let now = Utc::now();
        let before = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        let Json(response) = login(
            State(Arc::clone(&state)),
            Json(LoginRequest::new("admin", "admin1")),
        )
        .await
        .map_err(|err| anyhow::anyhow!("login failed with {}", err.status))?;

        let claims = decode_claims(&response.token)?;
        assert_eq!(claims.name(), Some("admin"));
        assert_eq!(claims.roles(), ["User".to_string()]);
        assert!(state.codec.is_valid(&response.token));

        let ttl = response.expiration - before;
        assert!(ttl >= Duration::minutes(30));
        assert!(ttl <= Duration::minutes(30) + Duration::seconds(2));
        assert_eq!(state.telemetry.snapshot().login_success_total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let state = test_state();
        let result = login(
            State(Arc::clone(&state)),
            Json(LoginRequest::new("admin", "nope")),
        )
        .await;
        let response = match result {
            Ok(_) => panic!("expected rejection"),
            Err(err) => err.into_response(),
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(state.telemetry.snapshot().login_rejected_total, 1);
    }

    #[tokio::test]
    async fn incomplete_signing_config_is_a_server_error() -> anyhow::Result<()> {
        let cases = [
            SigningConfig::from_parts(
                Some("mealsched".into()),
                Some("mealsched-web".into()),
                None,
            ),
            SigningConfig::from_parts(None, Some("mealsched-web".into()), Some(TEST_KEY.into())),
            SigningConfig::from_parts(Some("mealsched".into()), None, Some(TEST_KEY.into())),
        ];
        for signing in cases {
            let state = test_state_with(TokenCodec::new(signing));
            let result = login(
                State(Arc::clone(&state)),
                Json(LoginRequest::new("admin", "admin1")),
            )
            .await;
            let Err(err) = result else {
                anyhow::bail!("expected server error");
            };
            assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!format!("{err:?}").contains(TEST_KEY));

            let body = to_bytes(err.into_response().into_body(), usize::MAX).await?;
            let body = String::from_utf8(body.to_vec())?;
            assert!(body.contains(LOGIN_FAILURE_MESSAGE));
            assert!(!body.contains(TEST_KEY));
            assert_eq!(state.telemetry.snapshot().login_error_total, 1);
        }
        Ok(())
    }
}
