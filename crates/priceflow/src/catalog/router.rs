use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::store::{CatalogError, CatalogStore};

/// Router builder exposing the catalog lookup endpoints.
pub fn catalog_router(store: Arc<dyn CatalogStore>) -> Router {
    Router::new()
        .route("/product/:product_name", get(product_detail_handler))
        .route("/categories", get(categories_handler))
        .route("/products/:category", get(products_in_category_handler))
        .with_state(store)
}

pub(crate) async fn product_detail_handler(
    State(store): State<Arc<dyn CatalogStore>>,
    Path(product_name): Path<String>,
) -> Response {
    match store.product_detail(&product_name).await {
        // Detail responses expose the row as-is, not wrapped in an envelope.
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn categories_handler(State(store): State<Arc<dyn CatalogStore>>) -> Response {
    match store.categories().await {
        Ok(categories) => {
            let payload = json!({
                "categories": categories,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn products_in_category_handler(
    State(store): State<Arc<dyn CatalogStore>>,
    Path(category): Path<String>,
) -> Response {
    match store.products_in_category(&category).await {
        Ok(product_names) => {
            let payload = json!({
                "product_names": product_names,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => catalog_error_response(error),
    }
}

fn catalog_error_response(error: CatalogError) -> Response {
    let status = match error {
        CatalogError::ProductNotFound(_) | CatalogError::EmptyCategory(_) => {
            StatusCode::NOT_FOUND
        }
        CatalogError::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
