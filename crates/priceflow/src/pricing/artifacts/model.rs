use serde::{Deserialize, Serialize};

use super::{ArtifactError, RegressionModel};

/// One node of a regression tree. Splits route on `row[feature] < threshold`,
/// matching the exporter's convention for missing-free numeric data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        value: f64,
    },
}

impl TreeNode {
    fn score(&self, row: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                // Feature indices are bounds-checked once at load time.
                if row[*feature] < *threshold {
                    left.score(row)
                } else {
                    right.score(row)
                }
            }
        }
    }

    fn max_feature_index(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => {
                let mut max = *feature;
                if let Some(inner) = left.max_feature_index() {
                    max = max.max(inner);
                }
                if let Some(inner) = right.max_feature_index() {
                    max = max.max(inner);
                }
                Some(max)
            }
        }
    }
}

/// Fitted gradient-boosted regression ensemble. A prediction is the base
/// score plus the sum of every tree's leaf value for the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedModel {
    pub feature_names: Vec<String>,
    pub base_score: f64,
    pub trees: Vec<TreeNode>,
}

impl GradientBoostedModel {
    /// Rejects ensembles whose splits reference features the declared
    /// column order does not contain, so scoring never indexes out of
    /// bounds.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let width = self.feature_names.len();
        for tree in &self.trees {
            if let Some(index) = tree.max_feature_index() {
                if index >= width {
                    return Err(ArtifactError::Malformed(format!(
                        "tree split references feature {index} but the model declares {width} features"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl RegressionModel for GradientBoostedModel {
    fn feature_order(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, row: &[f64]) -> f64 {
        self.trees
            .iter()
            .map(|tree| tree.score(row))
            .sum::<f64>()
            + self.base_score
    }
}
