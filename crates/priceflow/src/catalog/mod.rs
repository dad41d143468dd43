//! Product catalog lookups over the hosted Supabase table.

pub mod router;
pub mod store;
pub mod supabase;

pub use router::catalog_router;
pub use store::{CatalogError, CatalogStore, ProductRecord};
pub use supabase::SupabaseCatalog;
