//! Stock level trend charts over the historical order dataset.

pub mod chart;
pub mod dataset;
pub mod router;

pub use chart::render_trend_chart;
pub use dataset::{DatasetError, StockHistory, StockObservation, TrendPoint};
pub use router::trend_router;
