use crate::infra::AppState;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use priceflow::catalog::{catalog_router, CatalogStore};
use priceflow::pricing::{pricing_router, DiscountService};
use priceflow::trend::{trend_router, StockHistory};

pub(crate) fn service_routes(
    pricing: Arc<DiscountService>,
    catalog: Arc<dyn CatalogStore>,
    history: Arc<StockHistory>,
) -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::get(welcome))
        .merge(pricing_router(pricing))
        .merge(catalog_router(catalog))
        .merge(trend_router(history))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// Browser clients send credentialed requests, so the allowed origins must
/// stay an explicit list rather than a wildcard.
pub(crate) fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub(crate) async fn welcome() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to Smart dynamic Price" }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
