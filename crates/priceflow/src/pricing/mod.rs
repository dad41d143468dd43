//! Discount ceiling prediction.
//!
//! A request flows through three stages: the feature builder encodes and
//! scales the raw payload into the model's training column order, the
//! fitted ensemble predicts the maximum viable discount, and the tier
//! policy converts that ceiling into the offer the caller may grant.

pub mod artifacts;
pub mod discount;
pub mod domain;
pub mod features;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use artifacts::{
    ArtifactError, ArtifactStore, CategoryEncoder, ColumnEncoders, GradientBoostedModel,
    NumericScaler, RegressionModel, ScaledColumn, TreeNode,
};
pub use discount::compute_discount;
pub use domain::{CustomerTier, DiscountRequest, TimeOfDay, ValidationError};
pub use features::{build_features, FeatureError, FeatureVector, SchemaError};
pub use router::pricing_router;
pub use service::{DiscountQuote, DiscountService};
