mod device;

use crate::middlewares::trace_id::{TraceId, TraceIdLayer};
use crate::state::AppState;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::{Router, routing::get};
use std::time::Duration;
use tracing::Span;

pub fn build() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(|| async { axum::http::StatusCode::OK }))
        .route(
            "/api/version",
            get(|| async { format!("device_registry_{}", env!("CARGO_PKG_VERSION")) }),
        )
        // ======== device ========
        .route("/api/devices", get(device::list).post(device::create))
        .route("/api/devices/search", get(device::search))
        .route(
            "/api/devices/{id}",
            get(device::get)
                .put(device::update)
                .patch(device::partial_update)
                .delete(device::delete),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let trace_id = request
                        .extensions()
                        .get::<TraceId>()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    tracing::debug_span!("request", trace_id = %trace_id)
                })
                .on_request(|req: &Request<Body>, _span: &Span| {
                    tracing::trace!(
                        method = %req.method(),
                        uri = %req.uri(),
                        version = ?req.version(),
                        "started processing request"
                    );
                })
                .on_response(|res: &Response, latency: Duration, _span: &Span| {
                    tracing::trace!(
                        status = ?res.status(),
                        latency = %format!("{}ms", latency.as_millis()),
                        "finished processing request"
                    );
                }),
        )
        .layer(TraceIdLayer::new())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .expose_headers([crate::middlewares::trace_id::X_REQUEST_ID.clone()]),
        )
}
