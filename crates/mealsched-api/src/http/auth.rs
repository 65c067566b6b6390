//! Bearer token middleware for protected routes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use mealsched_auth::{ClaimSet, TokenError};
use tracing::{Span, debug, error};

use crate::http::constants::{AUTH_FAILURE_MESSAGE, BEARER_SCHEME};
use crate::http::errors::ApiError;
use crate::state::ApiState;

/// Verified caller identity, inserted into request extensions.
#[derive(Clone, Debug)]
pub(crate) struct AuthContext {
    pub(crate) claims: ClaimSet,
}

impl AuthContext {
    pub(crate) fn subject(&self) -> &str {
        self.claims.name().unwrap_or("unknown")
    }
}

pub(crate) async fn require_bearer(
    State(state): State<Arc<ApiState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer(req.headers()) else {
        debug!("request carried no bearer token");
        return Err(ApiError::unauthorized());
    };

    let claims = match state.codec.verify(token) {
        Ok(claims) => claims,
        Err(err) if err.is_configuration() => {
            error!(error = %err, "bearer verification is not configured");
            return Err(ApiError::internal(AUTH_FAILURE_MESSAGE, err.to_string()));
        }
        Err(err) => {
            let reason = match &err {
                TokenError::Rejected { reason, .. } => reason.as_str(),
                _ => "malformed",
            };
            debug!(reason, "bearer token rejected");
            state.telemetry.inc_token_rejection(reason);
            return Err(ApiError::unauthorized());
        }
    };

    let context = AuthContext { claims };
    Span::current().record("subject", context.subject());
    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header, if present and non-blank.
pub(crate) fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn extract_bearer_accepts_case_insensitive_scheme() {
        assert_eq!(extract_bearer(&headers("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer(&headers("bearer  abc ")), Some("abc"));
    }

    #[test]
    fn extract_bearer_rejects_other_shapes() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers("Bearer")), None);
        assert_eq!(extract_bearer(&headers("Bearer    ")), None);
        assert_eq!(extract_bearer(&headers("Basic YWRtaW46YWRtaW4x")), None);
    }

    #[test]
    fn subject_falls_back_when_name_missing() {
        let anonymous = AuthContext {
            claims: ClaimSet::new(),
        };
        assert_eq!(anonymous.subject(), "unknown");
        let named = AuthContext {
            claims: ClaimSet::new().with("name", "admin"),
        };
        assert_eq!(named.subject(), "admin");
    }
}
