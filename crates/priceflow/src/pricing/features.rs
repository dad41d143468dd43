//! Turns a raw [`DiscountRequest`] into the numeric row the fitted model
//! scores: derive the order-date parts and the daypart bucket, encode the
//! categorical columns, min-max scale the numeric ones, then project the
//! row into the model's training column order.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::artifacts::ArtifactStore;
use super::domain::{DiscountRequest, TimeOfDay, ValidationError};

/// Encoded columns in the exact order the model expects them.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

/// Mismatch between the request row and the fitted artifacts. These mean a
/// stale or truncated export, not a bad request.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("no fitted encoder for column '{column}'")]
    MissingEncoder { column: String },
    #[error("scaler expects column '{column}' which the request row does not produce")]
    ScalerColumn { column: String },
    #[error("model expects column '{column}' which the request row does not produce")]
    ModelColumn { column: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Columns encoded through the fitted label encoders, paired with the
/// request value for each.
fn categorical_values(request: &DiscountRequest) -> [(&'static str, &str); 6] {
    [
        ("Category", request.category.as_str()),
        ("Location", request.location.as_str()),
        (
            "Festive_Seasonal_Impact",
            request.festive_seasonal_impact.as_str(),
        ),
        ("Customer_Sentiment", request.customer_sentiment.as_str()),
        ("Product_Name", request.product_name.as_str()),
        ("Weight_Unit", request.weight_unit.as_str()),
    ]
}

/// Numeric columns copied straight off the request before scaling.
fn numeric_values(request: &DiscountRequest) -> [(&'static str, f64); 9] {
    [
        ("MRP", request.mrp),
        ("Blinkit_Price", request.blinkit_price),
        ("Zepto_Price", request.zepto_price),
        ("Instamart_Price", request.instamart_price),
        ("Margin", request.margin),
        ("Shelf_Life_days", request.shelf_life_days),
        ("Min_Stock", request.min_stock),
        ("Max_Stock", request.max_stock),
        ("Weight_g", request.weight_g),
    ]
}

fn parse_order_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidOrderDate {
            value: value.to_string(),
        }
    })
}

/// Builds the scored feature row for one request.
pub fn build_features(
    request: &DiscountRequest,
    artifacts: &ArtifactStore,
) -> Result<FeatureVector, FeatureError> {
    let order_date = parse_order_date(&request.order_date)?;
    if request.order_hour > 23 {
        return Err(ValidationError::HourOutOfRange {
            hour: request.order_hour,
        }
        .into());
    }
    let time_of_day = TimeOfDay::from_hour(request.order_hour);

    let mut row = BTreeMap::<String, f64>::new();

    for (column, value) in categorical_values(request) {
        let encoder =
            artifacts
                .encoders()
                .get(column)
                .ok_or_else(|| SchemaError::MissingEncoder {
                    column: column.to_string(),
                })?;
        row.insert(column.to_string(), f64::from(encoder.encode(value)));
    }
    row.insert(
        "Order_Time_Category".to_string(),
        f64::from(artifacts.time_encoder().encode(time_of_day.label())),
    );

    for (column, value) in numeric_values(request) {
        row.insert(column.to_string(), value);
    }
    row.insert("Order_Year".to_string(), f64::from(order_date.year()));
    row.insert("Order_Month".to_string(), f64::from(order_date.month()));
    row.insert("Order_Day".to_string(), f64::from(order_date.day()));
    row.insert("Order_Hour".to_string(), f64::from(request.order_hour));

    for bounds in artifacts.scaler().columns() {
        let value = row
            .get_mut(bounds.name.as_str())
            .ok_or_else(|| SchemaError::ScalerColumn {
                column: bounds.name.clone(),
            })?;
        *value = bounds.apply(*value);
    }

    let mut columns = Vec::with_capacity(artifacts.model().feature_order().len());
    let mut values = Vec::with_capacity(columns.capacity());
    for column in artifacts.model().feature_order() {
        let value = row
            .get(column.as_str())
            .ok_or_else(|| SchemaError::ModelColumn {
                column: column.clone(),
            })?;
        columns.push(column.clone());
        values.push(*value);
    }

    Ok(FeatureVector { columns, values })
}

#[cfg(test)]
pub(crate) fn parse_order_date_for_tests(value: &str) -> Result<NaiveDate, ValidationError> {
    parse_order_date(value)
}
