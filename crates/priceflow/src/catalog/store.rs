use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One row of the hosted products table. Columns beyond the two the
/// service routes on are carried verbatim so detail responses expose
/// whatever the table holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub product_category: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product '{0}' not found")]
    ProductNotFound(String),
    #[error("no products found in category '{0}'")]
    EmptyCategory(String),
    #[error("catalog gateway error: {0}")]
    Gateway(String),
}

/// Read access to the product catalog. The hosted implementation talks to
/// Supabase; tests and the demo substitute in-memory stores.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn product_detail(&self, name: &str) -> Result<ProductRecord, CatalogError>;

    /// Distinct category names, sorted.
    async fn categories(&self) -> Result<BTreeSet<String>, CatalogError>;

    /// Product names in one category, in table order.
    async fn products_in_category(&self, category: &str) -> Result<Vec<String>, CatalogError>;
}
