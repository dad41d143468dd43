//! Integration specifications for the stock trend chart endpoint.

mod common {
    use std::io::Cursor;
    use std::sync::Arc;

    use priceflow::trend::{trend_router, StockHistory};

    pub(super) const HISTORY_CSV: &str = "\
Order Year,Order Month,Order Day,Location,Product Name,Max Stock
2024,5,12,Wakad,Dal (),120
2024,5,12,Wakad,Dal (),30
2024,5,13,Wakad,Dal (),90
2024,5,14,Pune,Tata Salt 1kg,40
";

    pub(super) fn history() -> StockHistory {
        StockHistory::from_reader(Cursor::new(HISTORY_CSV)).expect("history parses")
    }

    pub(super) fn router() -> axum::Router {
        trend_router(Arc::new(history()))
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get(uri: &str) -> axum::response::Response {
        router()
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
    async fn known_series_renders_an_html_fragment() {
        let response = get("/stock_trend?location=Wakad&product=Dal%20%28%29").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .starts_with("text/html"));

        let body = to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let html = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(html.contains("Stock Level Trend Over Time in Wakad for Dal ()"));
        // the two same-day rows aggregate into one point
        assert!(html.contains("150.0"));
        assert!(html.contains("2024-05-13"));
    }

    #[tokio::test]
    async fn unknown_series_maps_to_not_found() {
        let response = get("/stock_trend?location=Mumbai&product=Dal%20%28%29").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 1024).await.expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(
            payload.get("error").and_then(Value::as_str),
            Some("No stock data found for product 'Dal ()' in location 'Mumbai'")
        );
    }

    #[tokio::test]
    async fn missing_query_parameters_are_rejected() {
        let response = get("/stock_trend?location=Wakad").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod aggregation {
    use super::common::*;
    use chrono::NaiveDate;

    #[test]
    fn same_day_rows_sum_into_one_point() {
        let series = history().series("Wakad", "Dal ()");

        assert_eq!(series.len(), 2);
        assert_eq!(
            series[0].date,
            NaiveDate::from_ymd_opt(2024, 5, 12).expect("valid date")
        );
        assert_eq!(series[0].stock, 150.0);
    }

    #[test]
    fn locations_do_not_bleed_into_each_other() {
        assert!(history().series("Pune", "Dal ()").is_empty());
        assert_eq!(history().series("Pune", "Tata Salt 1kg").len(), 1);
    }
}
