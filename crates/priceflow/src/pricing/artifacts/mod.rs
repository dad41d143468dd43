//! Fitted prediction artifacts exported by the training pipeline.
//!
//! Four JSON files make up one export: the boosted tree ensemble, the
//! numeric min-max scaler, the per-column category encoders, and the
//! daypart encoder. They are loaded once at startup and shared read-only
//! across requests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

mod encoders;
mod model;
mod scaler;

pub use encoders::{CategoryEncoder, ColumnEncoders};
pub use model::{GradientBoostedModel, TreeNode};
pub use scaler::{NumericScaler, ScaledColumn};

/// Scoring seam over the fitted regressor. The store always holds the
/// boosted ensemble; tests substitute simpler models through this trait.
pub trait RegressionModel: Send + Sync {
    /// Column order the model was fit on. Rows passed to `predict` must
    /// follow it exactly.
    fn feature_order(&self) -> &[String];

    fn predict(&self, row: &[f64]) -> f64;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("artifact is structurally invalid: {0}")]
    Malformed(String),
}

/// All fitted artifacts for one model export.
pub struct ArtifactStore {
    model: Arc<dyn RegressionModel>,
    scaler: NumericScaler,
    encoders: ColumnEncoders,
    time_encoder: CategoryEncoder,
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("scaler", &self.scaler)
            .field("encoders", &self.encoders)
            .field("time_encoder", &self.time_encoder)
            .finish_non_exhaustive()
    }
}

impl ArtifactStore {
    /// Loads `model.json`, `scaler.json`, `label_encoders.json` and
    /// `time_encoder.json` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();

        let model: GradientBoostedModel = read_artifact(&dir.join("model.json"))?;
        model.validate()?;
        let scaler = read_artifact(&dir.join("scaler.json"))?;
        let encoders = read_artifact(&dir.join("label_encoders.json"))?;
        let time_encoder = read_artifact(&dir.join("time_encoder.json"))?;

        Ok(Self {
            model: Arc::new(model),
            scaler,
            encoders,
            time_encoder,
        })
    }

    pub fn from_parts(
        model: Arc<dyn RegressionModel>,
        scaler: NumericScaler,
        encoders: ColumnEncoders,
        time_encoder: CategoryEncoder,
    ) -> Self {
        Self {
            model,
            scaler,
            encoders,
            time_encoder,
        }
    }

    pub fn model(&self) -> &dyn RegressionModel {
        self.model.as_ref()
    }

    pub fn scaler(&self) -> &NumericScaler {
        &self.scaler
    }

    pub fn encoders(&self) -> &ColumnEncoders {
        &self.encoders
    }

    pub fn time_encoder(&self) -> &CategoryEncoder {
        &self.time_encoder
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
