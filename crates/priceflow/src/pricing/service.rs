use std::sync::Arc;

use super::artifacts::ArtifactStore;
use super::discount::compute_discount;
use super::domain::{CustomerTier, DiscountRequest};
use super::features::{build_features, FeatureError};

/// Scores discount requests against the loaded artifacts.
pub struct DiscountService {
    artifacts: Arc<ArtifactStore>,
}

/// One scored request: the raw model ceiling and the tier-adjusted offer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountQuote {
    pub predicted_max: f64,
    pub max_discount: f64,
    pub tier: CustomerTier,
}

impl DiscountService {
    pub fn new(artifacts: Arc<ArtifactStore>) -> Self {
        Self { artifacts }
    }

    pub fn quote(&self, request: &DiscountRequest) -> Result<DiscountQuote, FeatureError> {
        let features = build_features(request, &self.artifacts)?;
        let predicted_max = self.artifacts.model().predict(&features.values);
        let tier = CustomerTier::from_label(&request.customer_type);

        Ok(DiscountQuote {
            predicted_max,
            max_discount: compute_discount(predicted_max, tier),
            tier,
        })
    }
}
