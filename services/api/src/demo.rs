use crate::infra::InMemoryCatalog;
use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

use priceflow::catalog::{CatalogStore, ProductRecord};
use priceflow::error::AppError;
use priceflow::pricing::{
    ArtifactStore, CategoryEncoder, ColumnEncoders, DiscountRequest, DiscountService,
    GradientBoostedModel, NumericScaler, ScaledColumn, TreeNode,
};
use priceflow::trend::{render_trend_chart, StockHistory};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Order date for the sample prediction (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) order_date: Option<NaiveDate>,
    /// Order hour for the sample prediction (0-23)
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(0..=23))]
    pub(crate) order_hour: u8,
    /// Customer tier for the sample prediction
    #[arg(long, default_value = "premium")]
    pub(crate) tier: String,
}

/// End-to-end walkthrough against in-code stand-ins: scores a sample
/// request through demo artifacts, queries a seeded catalog, and renders a
/// stock trend chart from an embedded history export.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        order_date,
        order_hour,
        tier,
    } = args;
    let order_date = order_date.unwrap_or_else(|| Local::now().date_naive());

    println!("Price Flow demo");

    println!("\nDiscount prediction");
    let artifacts = Arc::new(demo_artifacts());
    let service = DiscountService::new(artifacts);
    let request = demo_request(order_date, order_hour, tier);
    let quote = service.quote(&request)?;
    println!(
        "- {} ({}) in {} on {} at {:02}:00",
        request.product_name, request.category, request.location, request.order_date, request.order_hour
    );
    println!("- predicted discount ceiling: {:.2}", quote.predicted_max);
    println!(
        "- tier '{}' is granted {:.0}% of the ceiling -> max discount {:.2}",
        quote.tier.label(),
        quote.tier.multiplier() * 100.0,
        quote.max_discount
    );
    println!("  Tier comparison for the same request:");
    for label in ["premium", "normal", "gold"] {
        let mut alternative = request.clone();
        alternative.customer_type = label.to_string();
        let alternative_quote = service.quote(&alternative)?;
        println!(
            "    - {}: {:.2} (maps to '{}')",
            label,
            alternative_quote.max_discount,
            alternative_quote.tier.label()
        );
    }

    println!("\nCatalog lookups (in-memory stand-in for the hosted table)");
    let catalog = InMemoryCatalog::with_records(demo_records());
    let categories = catalog.categories().await?;
    println!(
        "- categories: {}",
        categories
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    for category in &categories {
        let names = catalog.products_in_category(category).await?;
        println!("  - {}: {}", category, names.join(", "));
    }
    let detail = catalog.product_detail("Tata Salt 1kg").await?;
    match serde_json::to_string_pretty(&detail) {
        Ok(payload) => println!("- product detail:\n{payload}"),
        Err(err) => println!("- product detail unavailable: {err}"),
    }

    println!("\nStock trend");
    let history = StockHistory::from_reader(Cursor::new(DEMO_HISTORY_CSV))?;
    let series = history.series("Wakad", "Dal ()");
    if series.is_empty() {
        println!("- no stock data for the demo pair");
        return Ok(());
    }
    println!("- daily totals for Dal () in Wakad:");
    for point in &series {
        println!("    - {}: {:.0}", point.date, point.stock);
    }
    let fragment = render_trend_chart("Wakad", "Dal ()", &series);
    println!("- rendered chart fragment: {} bytes of HTML", fragment.len());

    Ok(())
}

const DEMO_HISTORY_CSV: &str = "\
Order Year,Order Month,Order Day,Location,Product Name,Max Stock
2024,5,12,Wakad,Dal (),120
2024,5,12,Wakad,Dal (),30
2024,5,13,Wakad,Dal (),90
2024,5,14,Wakad,Dal (),75
2024,5,12,Pune,Tata Salt 1kg,40
";

fn demo_request(order_date: NaiveDate, order_hour: u8, customer_type: String) -> DiscountRequest {
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
        order_date: order_date.format("%Y-%m-%d").to_string(),
        order_hour,
        customer_type,
    }
}

fn demo_records() -> Vec<ProductRecord> {
    fn record(name: &str, category: &str, mrp: f64) -> ProductRecord {
        let mut extra = BTreeMap::new();
        extra.insert("mrp".to_string(), json!(mrp));
        ProductRecord {
            product_name: name.to_string(),
            product_category: category.to_string(),
            extra,
        }
    }

    vec![
        record("Tata Salt 1kg", "Staples", 28.0),
        record("Dal ()", "Staples", 120.0),
        record("Amul Butter 100g", "Dairy", 60.0),
    ]
}

/// Small fitted export in code: one tree splitting on scaled MRP over a
/// base score, with the vocabularies and scaling ranges the demo request
/// falls inside.
fn demo_artifacts() -> ArtifactStore {
    let feature_names: Vec<String> = [
        "Category",
        "Location",
        "Festive_Seasonal_Impact",
        "Customer_Sentiment",
        "Product_Name",
        "Weight_Unit",
        "Order_Time_Category",
        "MRP",
        "Blinkit_Price",
        "Zepto_Price",
        "Instamart_Price",
        "Margin",
        "Shelf_Life_days",
        "Min_Stock",
        "Max_Stock",
        "Weight_g",
        "Order_Year",
        "Order_Month",
        "Order_Day",
        "Order_Hour",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    let model = GradientBoostedModel {
        feature_names,
        base_score: 10.0,
        trees: vec![TreeNode::Split {
            // scaled MRP
            feature: 7,
            threshold: 0.4,
            left: Box::new(TreeNode::Leaf { value: 2.0 }),
            right: Box::new(TreeNode::Leaf { value: 4.0 }),
        }],
    };

    fn column(name: &str, min: f64, max: f64) -> ScaledColumn {
        ScaledColumn {
            name: name.to_string(),
            min,
            max,
        }
    }
    let scaler = NumericScaler::new(vec![
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
    ]);

    fn encoder(classes: &[&str]) -> CategoryEncoder {
        CategoryEncoder::new(classes.iter().map(|class| class.to_string()).collect())
    }
    let mut columns = BTreeMap::new();
    columns.insert(
        "Category".to_string(),
        encoder(&["Beverages", "Dairy", "Snacks", "Staples"]),
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

    ArtifactStore::from_parts(
        Arc::new(model),
        scaler,
        ColumnEncoders::new(columns),
        encoder(&["Afternoon", "Evening", "Morning", "Night"]),
    )
}
