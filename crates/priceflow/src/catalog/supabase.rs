use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::store::{CatalogError, CatalogStore, ProductRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Product catalog backed by a hosted Supabase `products` table, reached
/// over its PostgREST endpoint. The service key rides along as default
/// headers on every request.
#[derive(Clone, Debug)]
pub struct SupabaseCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl SupabaseCatalog {
    pub fn new(base_url: impl Into<String>, service_key: &str) -> Result<Self, CatalogError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(service_key)
            .map_err(|_| CatalogError::Gateway("service key is not a valid header value".into()))?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {service_key}"))
            .map_err(|_| CatalogError::Gateway("service key is not a valid header value".into()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| CatalogError::Gateway(err.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Runs one PostgREST query against the products table. Filter values
    /// go through `query` so product names with spaces or parentheses are
    /// encoded correctly.
    async fn rows<T: DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, CatalogError> {
        let url = format!("{}/rest/v1/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|err| CatalogError::Gateway(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Gateway(format!(
                "products query returned {status}: {body}"
            )));
        }

        let rows: Vec<T> = response
            .json()
            .await
            .map_err(|err| CatalogError::Gateway(err.to_string()))?;
        debug!(count = rows.len(), "catalog rows fetched");
        Ok(rows)
    }

    #[cfg(test)]
    pub(crate) fn base_url_for_tests(&self) -> &str {
        &self.base_url
    }
}

#[derive(Deserialize)]
struct CategoryRow {
    product_category: String,
}

#[derive(Deserialize)]
struct NameRow {
    product_name: String,
}

#[async_trait]
impl CatalogStore for SupabaseCatalog {
    async fn product_detail(&self, name: &str) -> Result<ProductRecord, CatalogError> {
        let rows: Vec<ProductRecord> = self
            .rows(&[
                ("select", "*".to_string()),
                ("product_name", format!("eq.{name}")),
            ])
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| CatalogError::ProductNotFound(name.to_string()))
    }

    async fn categories(&self) -> Result<BTreeSet<String>, CatalogError> {
        let rows: Vec<CategoryRow> = self
            .rows(&[("select", "product_category".to_string())])
            .await?;

        Ok(rows.into_iter().map(|row| row.product_category).collect())
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<String>, CatalogError> {
        let rows: Vec<NameRow> = self
            .rows(&[
                ("select", "product_name".to_string()),
                ("product_category", format!("eq.{category}")),
            ])
            .await?;

        if rows.is_empty() {
            return Err(CatalogError::EmptyCategory(category.to_string()));
        }
        Ok(rows.into_iter().map(|row| row.product_name).collect())
    }
}
