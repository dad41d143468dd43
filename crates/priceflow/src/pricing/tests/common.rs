use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::pricing::artifacts::{
    ArtifactStore, CategoryEncoder, ColumnEncoders, GradientBoostedModel, NumericScaler,
    ScaledColumn,
};
use crate::pricing::domain::DiscountRequest;
use crate::pricing::features::FeatureVector;
use crate::pricing::service::DiscountService;

/// Column order the fixture model was "fit" on. Deliberately scrambled so
/// the projection step has real work to do.
pub(super) fn model_feature_order() -> Vec<String> {
    [
        "Margin",
        "Category",
        "Order_Hour",
        "Product_Name",
        "MRP",
        "Order_Time_Category",
        "Location",
        "Blinkit_Price",
        "Weight_g",
        "Order_Year",
        "Festive_Seasonal_Impact",
        "Zepto_Price",
        "Min_Stock",
        "Customer_Sentiment",
        "Instamart_Price",
        "Order_Month",
        "Shelf_Life_days",
        "Weight_Unit",
        "Max_Stock",
        "Order_Day",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn encoder(classes: &[&str]) -> CategoryEncoder {
    CategoryEncoder::new(classes.iter().map(|class| class.to_string()).collect())
}

fn column(name: &str, min: f64, max: f64) -> ScaledColumn {
    ScaledColumn {
        name: name.to_string(),
        min,
        max,
    }
}

pub(super) fn fitted_encoders() -> ColumnEncoders {
    let mut columns = BTreeMap::new();
    columns.insert(
        "Category".to_string(),
        encoder(&["Beverages", "Dairy", "Snacks"]),
    );
    columns.insert(
        "Location".to_string(),
        encoder(&["Hyderabad", "Mumbai", "Pune", "Wakad"]),
    );
    columns.insert(
        "Festive_Seasonal_Impact".to_string(),
        encoder(&["Diwali", "None", "Summer"]),
    );
    columns.insert(
        "Customer_Sentiment".to_string(),
        encoder(&["Negative", "Neutral", "Positive"]),
    );
    columns.insert(
        "Product_Name".to_string(),
        encoder(&["Amul Butter 100g", "Dal ()", "Tata Salt 1kg"]),
    );
    columns.insert("Weight_Unit".to_string(), encoder(&["g", "kg", "ml"]));
    ColumnEncoders::new(columns)
}

pub(super) fn fitted_time_encoder() -> CategoryEncoder {
    encoder(&["Afternoon", "Evening", "Morning", "Night"])
}

pub(super) fn fitted_scaler() -> NumericScaler {
    NumericScaler::new(scaler_columns())
}

fn scaler_columns() -> Vec<ScaledColumn> {
    vec![
        column("MRP", 0.0, 200.0),
        column("Blinkit_Price", 0.0, 200.0),
        column("Zepto_Price", 0.0, 200.0),
        column("Instamart_Price", 0.0, 200.0),
        column("Margin", 0.0, 50.0),
        column("Shelf_Life_days", 0.0, 365.0),
        column("Min_Stock", 0.0, 100.0),
        column("Max_Stock", 0.0, 500.0),
        column("Order_Year", 2023.0, 2025.0),
        column("Order_Month", 1.0, 12.0),
        column("Order_Day", 1.0, 31.0),
        column("Order_Hour", 0.0, 23.0),
        column("Weight_g", 0.0, 1000.0),
    ]
}

/// Zero-tree ensemble: every row predicts the base score, so policy math
/// stays easy to assert on.
pub(super) fn fitted_artifacts() -> ArtifactStore {
    let model = GradientBoostedModel {
        feature_names: model_feature_order(),
        base_score: 8.0,
        trees: Vec::new(),
    };
    ArtifactStore::from_parts(
        Arc::new(model),
        fitted_scaler(),
        fitted_encoders(),
        fitted_time_encoder(),
    )
}

/// Scaler demands a column the feature builder never produces.
pub(super) fn artifacts_with_unscored_scaler_column() -> ArtifactStore {
    let model = GradientBoostedModel {
        feature_names: model_feature_order(),
        base_score: 8.0,
        trees: Vec::new(),
    };
    let mut columns = scaler_columns();
    columns.push(column("Discount_Rate", 0.0, 1.0));
    ArtifactStore::from_parts(
        Arc::new(model),
        NumericScaler::new(columns),
        fitted_encoders(),
        fitted_time_encoder(),
    )
}

/// Model declares a training column the feature builder never produces.
pub(super) fn artifacts_with_unknown_model_column() -> ArtifactStore {
    let mut feature_names = model_feature_order();
    feature_names.push("Competitor_Index".to_string());
    let model = GradientBoostedModel {
        feature_names,
        base_score: 8.0,
        trees: Vec::new(),
    };
    ArtifactStore::from_parts(
        Arc::new(model),
        fitted_scaler(),
        fitted_encoders(),
        fitted_time_encoder(),
    )
}

pub(super) fn request() -> DiscountRequest {
    DiscountRequest {
        product_name: "Amul Butter 100g".to_string(),
        category: "Dairy".to_string(),
        location: "Wakad".to_string(),
        mrp: 100.0,
        blinkit_price: 95.0,
        zepto_price: 92.0,
        instamart_price: 94.0,
        margin: 20.0,
        festive_seasonal_impact: "None".to_string(),
        shelf_life_days: 180.0,
        min_stock: 20.0,
        max_stock: 200.0,
        customer_sentiment: "Positive".to_string(),
        weight_g: 100.0,
        weight_unit: "g".to_string(),
        order_date: "2024-05-12".to_string(),
        order_hour: 9,
        customer_type: "premium".to_string(),
    }
}

pub(super) fn pricing_service() -> DiscountService {
    DiscountService::new(Arc::new(fitted_artifacts()))
}

pub(super) fn feature_value(features: &FeatureVector, column: &str) -> f64 {
    let index = features
        .columns
        .iter()
        .position(|candidate| candidate == column)
        .unwrap_or_else(|| panic!("column {column} missing from feature vector"));
    features.values[index]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
