//! Route configuration and setup.
//!
//! The contact endpoint and the health probes share one middleware stack, so
//! every response carries the CORS and security headers and an `X-Request-ID`.

mod health;

use crate::handlers::contact;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::get,
    routing::post,
    Json, Router,
};
use inquiry_infra::{
    cors_headers_middleware, get_request_id, request_id_middleware, security_headers_middleware,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let config = &state.config;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = get_request_id(request).unwrap_or_default();
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let mut app = Router::new()
        .route(
            "/api/contact",
            post(contact::submit_contact)
                .options(contact::contact_preflight)
                .fallback(contact::contact_method_not_allowed),
        )
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"));

    if let Some(static_dir) = &config.static_dir {
        tracing::info!(static_dir = %static_dir.display(), "Serving static site");
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let app = app
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn(cors_headers_middleware))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .with_state(state.clone());

    Ok(app)
}
