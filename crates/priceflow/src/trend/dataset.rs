use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

/// One line of the stock history export, under its spreadsheet headers.
#[derive(Debug, Deserialize)]
struct StockRow {
    #[serde(rename = "Order Year")]
    order_year: i32,
    #[serde(rename = "Order Month")]
    order_month: u32,
    #[serde(rename = "Order Day")]
    order_day: u32,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Max Stock")]
    max_stock: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockObservation {
    pub date: NaiveDate,
    pub location: String,
    pub product_name: String,
    pub max_stock: f64,
}

/// One point of an aggregated trend series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub stock: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read stock history {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid stock history row: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {line} has no valid calendar date ({year}-{month}-{day})")]
    InvalidDate {
        line: usize,
        year: i32,
        month: u32,
        day: u32,
    },
}

/// In-memory stock history, parsed once at startup and shared read-only.
#[derive(Debug)]
pub struct StockHistory {
    rows: Vec<StockObservation>,
}

impl StockHistory {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (index, result) in csv_reader.deserialize::<StockRow>().enumerate() {
            let row = result?;
            let date = NaiveDate::from_ymd_opt(row.order_year, row.order_month, row.order_day)
                .ok_or(DatasetError::InvalidDate {
                    // header occupies line 1
                    line: index + 2,
                    year: row.order_year,
                    month: row.order_month,
                    day: row.order_day,
                })?;
            rows.push(StockObservation {
                date,
                location: row.location,
                product_name: row.product_name,
                max_stock: row.max_stock,
            });
        }

        Ok(Self { rows })
    }

    /// Daily totals for one location and product, sorted by date. Matching
    /// is exact on both labels.
    pub fn series(&self, location: &str, product_name: &str) -> Vec<TrendPoint> {
        let mut totals = BTreeMap::<NaiveDate, f64>::new();
        for row in &self.rows {
            if row.location == location && row.product_name == product_name {
                *totals.entry(row.date).or_insert(0.0) += row.max_stock;
            }
        }

        totals
            .into_iter()
            .map(|(date, stock)| TrendPoint { date, stock })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
