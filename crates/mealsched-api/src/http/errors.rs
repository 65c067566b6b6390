//! API error wrapper mapped onto HTTP responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use mealsched_api_models::ErrorResponse;

use crate::http::constants::BEARER_SCHEME;

/// Status plus an optional JSON body.
#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    body: Option<ErrorResponse>,
    challenge: bool,
}

impl ApiError {
    const fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: None,
            challenge: false,
        }
    }

    fn with_body(mut self, error: impl Into<String>, detail: Option<String>) -> Self {
        self.body = Some(ErrorResponse {
            error: error.into(),
            detail,
        });
        self
    }

    /// 401 with an empty body and a `WWW-Authenticate: Bearer` challenge.
    pub(crate) const fn unauthorized() -> Self {
        let mut error = Self::new(StatusCode::UNAUTHORIZED);
        error.challenge = true;
        error
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST).with_body(message, None)
    }

    pub(crate) const fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub(crate) fn internal(error: &'static str, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_body(error, Some(detail.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        };
        if self.challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BEARER_SCHEME));
        }
        response
    }
}
