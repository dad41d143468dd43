use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::chart::render_trend_chart;
use super::dataset::StockHistory;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub location: String,
    pub product: String,
}

/// Router builder exposing the stock trend chart endpoint.
pub fn trend_router(history: Arc<StockHistory>) -> Router {
    Router::new()
        .route("/stock_trend", get(stock_trend_handler))
        .with_state(history)
}

pub(crate) async fn stock_trend_handler(
    State(history): State<Arc<StockHistory>>,
    Query(query): Query<TrendQuery>,
) -> Response {
    let series = history.series(&query.location, &query.product);
    if series.is_empty() {
        let payload = json!({
            "error": format!(
                "No stock data found for product '{}' in location '{}'",
                query.product, query.location
            ),
        });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    }

    Html(render_trend_chart(&query.location, &query.product, &series)).into_response()
}
