//! Pricing backend for a quick-commerce storefront.
//!
//! Three feature areas compose the service: `pricing` predicts a discount
//! ceiling from fitted regression artifacts, `catalog` reads product data
//! from the hosted table store, and `trend` renders stock level charts from
//! the historical export.

pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;
pub mod telemetry;
pub mod trend;
