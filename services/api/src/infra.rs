use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;

use priceflow::catalog::{CatalogError, CatalogStore, ProductRecord};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seeded catalog used by the CLI demo in place of the hosted table.
pub(crate) struct InMemoryCatalog {
    records: Vec<ProductRecord>,
}

impl InMemoryCatalog {
    pub(crate) fn with_records(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
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

    async fn products_in_category(&self, category: &str) -> Result<Vec<String>, CatalogError> {
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

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
