use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::DiscountRequest;
use super::features::FeatureError;
use super::service::DiscountService;

/// Router builder exposing the discount prediction endpoint.
pub fn pricing_router(service: Arc<DiscountService>) -> Router {
    Router::new()
        .route("/predict_discount/", post(predict_discount_handler))
        .with_state(service)
}

pub(crate) async fn predict_discount_handler(
    State(service): State<Arc<DiscountService>>,
    axum::Json(request): axum::Json<DiscountRequest>,
) -> Response {
    match service.quote(&request) {
        Ok(quote) => {
            let payload = json!({
                "max_discount": quote.max_discount,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        // Bad field values are the caller's problem; artifact mismatches
        // are ours.
        Err(FeatureError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(FeatureError::Schema(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
