//! Integration specifications for the product catalog endpoints.
//!
//! The hosted Supabase table is substituted with in-memory stores so the
//! routing layer, the response envelopes, and the error mapping can be
//! exercised without network access.

mod common {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::response::Response;
    use serde_json::{json, Value};

    use priceflow::catalog::{catalog_router, CatalogError, CatalogStore, ProductRecord};

    pub(super) fn record(name: &str, category: &str, mrp: f64) -> ProductRecord {
        let mut extra = BTreeMap::new();
        extra.insert("mrp".to_string(), json!(mrp));
        extra.insert("weight_unit".to_string(), json!("g"));
        ProductRecord {
            product_name: name.to_string(),
            product_category: category.to_string(),
            extra,
        }
    }

    pub(super) fn seeded_records() -> Vec<ProductRecord> {
        vec![
            record("Tata Salt 1kg", "Staples", 28.0),
            record("Dal ()", "Staples", 120.0),
            record("Amul Butter 100g", "Dairy", 60.0),
        ]
    }

    pub(super) struct MemoryCatalog {
        records: Vec<ProductRecord>,
    }

    impl MemoryCatalog {
        pub(super) fn with_records(records: Vec<ProductRecord>) -> Self {
            Self { records }
        }
    }

    #[async_trait]
    impl CatalogStore for MemoryCatalog {
        async fn product_detail(&self, name: &str) -> Result<ProductRecord, CatalogError> {
            self.records
                .iter()
                .find(|record| record.product_name == name)
                .cloned()
                .ok_or_else(|| CatalogError::ProductNotFound(name.to_string()))
        }

        async fn categories(&self) -> Result<BTreeSet<String>, CatalogError> {
            Ok(self
                .records
                .iter()
                .map(|record| record.product_category.clone())
                .collect())
        }

        async fn products_in_category(
            &self,
            category: &str,
        ) -> Result<Vec<String>, CatalogError> {
            let names: Vec<String> = self
                .records
                .iter()
                .filter(|record| record.product_category == category)
                .map(|record| record.product_name.clone())
                .collect();
            if names.is_empty() {
                return Err(CatalogError::EmptyCategory(category.to_string()));
            }
            Ok(names)
        }
    }

    pub(super) struct FailingCatalog;

    #[async_trait]
    impl CatalogStore for FailingCatalog {
        async fn product_detail(&self, _name: &str) -> Result<ProductRecord, CatalogError> {
            Err(CatalogError::Gateway("storage offline".to_string()))
        }

        async fn categories(&self) -> Result<BTreeSet<String>, CatalogError> {
            Err(CatalogError::Gateway("storage offline".to_string()))
        }

        async fn products_in_category(
            &self,
            _category: &str,
        ) -> Result<Vec<String>, CatalogError> {
            Err(CatalogError::Gateway("storage offline".to_string()))
        }
    }

    pub(super) fn seeded_router() -> axum::Router {
        catalog_router(Arc::new(MemoryCatalog::with_records(seeded_records())))
    }

    pub(super) fn failing_router() -> axum::Router {
        catalog_router(Arc::new(FailingCatalog))
    }

    pub(super) async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

mod routing {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn get(router: axum::Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch")
    }

    #[tokio::test]
    async fn product_detail_returns_the_bare_row() {
        let response = get(seeded_router(), "/product/Tata%20Salt%201kg").await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload.get("product_name"), Some(&json!("Tata Salt 1kg")));
        assert_eq!(payload.get("product_category"), Some(&json!("Staples")));
        // extra table columns surface at the top level
        assert_eq!(payload.get("mrp"), Some(&json!(28.0)));
    }

    #[tokio::test]
    async fn unknown_product_maps_to_not_found() {
        let response = get(seeded_router(), "/product/Ghee").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload.get("error").and_then(Value::as_str),
            Some("product 'Ghee' not found")
        );
    }

    #[tokio::test]
    async fn categories_come_back_sorted_and_deduplicated() {
        let response = get(seeded_router(), "/categories").await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload.get("categories"),
            Some(&json!(["Dairy", "Staples"]))
        );
    }

    #[tokio::test]
    async fn category_listing_returns_product_names() {
        let response = get(seeded_router(), "/products/Staples").await;

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload.get("product_names"),
            Some(&json!(["Tata Salt 1kg", "Dal ()"]))
        );
    }

    #[tokio::test]
    async fn empty_category_maps_to_not_found() {
        let response = get(seeded_router(), "/products/Frozen").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload.get("error").and_then(Value::as_str),
            Some("no products found in category 'Frozen'")
        );
    }

    #[tokio::test]
    async fn gateway_failures_map_to_server_errors() {
        let response = get(failing_router(), "/categories").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = read_json_body(response).await;
        assert!(payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("storage offline"));
    }
}
