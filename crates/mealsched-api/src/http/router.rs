//! Router construction and server host for the API.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, Request, header::AUTHORIZATION, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use mealsched_telemetry::{build_sha, propagate_request_id_layer, set_request_id_layer};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::auth::require_bearer;
use crate::http::constants::HEADER_REQUEST_ID;
use crate::http::employees::{create_employee, get_employee, list_employees};
use crate::http::health::{health, metrics};
use crate::http::login::login;
use crate::http::schedules::{
    create_schedule, delete_schedule, get_schedule, list_schedules, replace_schedules_for_date,
    schedules_for_employee, schedules_on_date, update_schedule,
};
use crate::http::telemetry::track_requests;
use crate::state::ApiState;

/// Axum router wrapper that hosts the Mealsched API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Wire the router, middleware, and shared state.
    #[must_use]
    pub fn new(state: ApiState) -> Self {
        let telemetry = state.telemetry.clone();
        let state = Arc::new(state);

        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    subject = tracing::field::Empty,
                    error = tracing::field::Empty,
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(trace_layer)
            .layer(middleware::from_fn_with_state(telemetry, track_requests));

        let router = Self::build_router(&state)
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    fn build_router(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        Self::public_routes().merge(Self::protected_routes(state))
    }

    fn public_routes() -> Router<Arc<ApiState>> {
        Router::new()
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .route("/api/login", post(login))
    }

    fn protected_routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        let require_auth = middleware::from_fn_with_state(state.clone(), require_bearer);

        Router::new()
            .route(
                "/api/mealschedules",
                get(list_schedules).post(create_schedule),
            )
            .route("/api/mealschedules/batch", post(replace_schedules_for_date))
            .route(
                "/api/mealschedules/employee/{employee_id}",
                get(schedules_for_employee),
            )
            .route("/api/mealschedules/date/{date}", get(schedules_on_date))
            .route(
                "/api/mealschedules/{id}",
                get(get_schedule)
                    .put(update_schedule)
                    .delete(delete_schedule),
            )
            .route("/api/employees", get(list_employees).post(create_employee))
            .route("/api/employees/{id}", get(get_employee))
            .route_layer(require_auth)
    }

    /// Router with state applied, for embedding or in-process testing.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError::Bind`] if the listener cannot be bound and
    /// [`ApiServerError::Serve`] if the server terminates unexpectedly.
    pub async fn serve(
        self,
        addr: SocketAddr,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> ApiServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        tracing::info!(%addr, "starting api listener");
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ApiServerError::Serve { addr, source })
    }
}
