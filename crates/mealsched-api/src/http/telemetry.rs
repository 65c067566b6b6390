//! Request accounting for routed API calls.
//!
//! Requests are counted per matched route template so path parameters never
//! become label values. Requests that reach this layer without a matched route
//! are grouped under [`UNMATCHED_ROUTE`].

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use mealsched_telemetry::Metrics;
use tracing::Span;

pub(crate) const UNMATCHED_ROUTE: &str = "unmatched";

pub(crate) async fn track_requests(
    State(metrics): State<Metrics>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let route = route_label(&req);
    let response = next.run(req).await;
    let status = response.status();
    metrics.inc_http_request(&route, status.as_u16());
    if status.is_server_error() {
        Span::current().record("error", true);
    }
    response
}

fn route_label<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |matched| matched.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn requests_are_counted_by_route_template() -> anyhow::Result<()> {
        let metrics = Metrics::new()?;
        let router = Router::new()
            .route("/api/mealschedules/{id}", get(|| async { StatusCode::NO_CONTENT }))
            .route_layer(middleware::from_fn_with_state(metrics.clone(), track_requests));

        for id in [1, 2] {
            let request = Request::builder()
                .uri(format!("/api/mealschedules/{id}"))
                .body(Body::empty())?;
            let response = router.clone().oneshot(request).await?;
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }

        assert_eq!(metrics.http_requests("/api/mealschedules/{id}", 204), 2);
        assert_eq!(metrics.http_requests("/api/mealschedules/1", 204), 0);
        Ok(())
    }

    #[test]
    fn unrouted_requests_share_one_label() -> anyhow::Result<()> {
        let request = Request::builder().uri("/nowhere").body(())?;
        assert_eq!(route_label(&request), UNMATCHED_ROUTE);
        Ok(())
    }
}
