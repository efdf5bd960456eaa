//! Route configuration and setup.

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use paperdesk_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::auth::middleware::auth_middleware;
use crate::handlers;
use crate::state::AppState;

const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/services", get(handlers::services::list_services))
        .route("/api/services/{id}", get(handlers::services::get_service))
        .route("/api/upload", post(handlers::upload::upload_file))
        .route("/api/orders", post(handlers::orders::create_order))
        .route("/api/orders/{id}", get(handlers::orders::get_order))
        .route(
            "/api/orders/{id}/download",
            get(handlers::download::download_result),
        )
        .route("/api/payments/create", post(handlers::payments::create_payment))
        .route(
            "/api/payments/capture",
            post(handlers::payments::capture_payment),
        )
        .route("/api/admin/login", post(handlers::admin::login))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );

    let protected_routes = Router::new()
        .route("/api/admin/analytics", get(handlers::admin::analytics))
        .route("/api/admin/orders", get(handlers::admin::list_orders))
        .route("/api/admin/orders/{id}", get(handlers::admin::get_order))
        .route(
            "/api/admin/orders/{id}/reprocess",
            post(handlers::admin::reprocess_order),
        )
        .route(
            "/api/admin/orders/{id}/refund",
            post(handlers::admin::refund_order),
        )
        .route(
            "/api/admin/revenue-summary",
            get(handlers::admin::revenue_summary),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Body limit leaves headroom over the upload cap so multipart framing
    // does not push a maximal file over the edge.
    let body_limit = config.max_upload_size_bytes() + 1024 * 1024;

    let app = public_routes
        .merge(protected_routes)
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST];

    if config.cors_origins().iter().any(|o| o == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<_, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]))
}
