//! Trained house value model: artifact loading, verification and inference
//!
//! The artifact is a JSON description of a fitted pipeline: per-column
//! standard scaling, one-hot encoding of `ocean_proximity`, then a random
//! forest regressor over the encoded vector.

mod cache;
mod forest;
mod preprocess;

pub use cache::ModelCache;
pub use forest::RandomForest;
pub use preprocess::Preprocessing;

use crate::features::{FeatureRecord, CATEGORICAL_FEATURE, NUMERIC_FEATURES};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported model format version {found} (expected {})", FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("model artifact is corrupt: {0}")]
    Corrupt(String),
    #[error("input does not match the model schema: {0}")]
    SchemaMismatch(String),
    #[error("model produced a non-finite estimate")]
    NonFinite,
}

/// Maps one feature record to a median house value estimate
pub trait Predictor: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct HousingModel {
    pub format_version: u32,
    #[serde(default)]
    pub description: String,
    pub preprocessing: Preprocessing,
    pub forest: RandomForest,
}

impl HousingModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        // Raw bytes, so non-UTF-8 content is a parse failure rather than an I/O one
        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Self::from_slice(json.as_bytes())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: HousingModel = serde_json::from_slice(bytes)?;
        model.verify()?;
        Ok(model)
    }

    fn verify(&self) -> Result<(), ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: self.format_version,
            });
        }

        let pre = &self.preprocessing;
        let mut names: Vec<&str> = pre.numeric.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        let mut expected = NUMERIC_FEATURES;
        expected.sort_unstable();
        if names != expected {
            return Err(ModelError::Corrupt(format!(
                "numeric columns {names:?} do not match {expected:?}"
            )));
        }
        if let Some(col) = pre
            .numeric
            .iter()
            .find(|c| !c.mean.is_finite() || !c.scale.is_finite() || c.scale == 0.0)
        {
            return Err(ModelError::Corrupt(format!(
                "column {} has an unusable mean/scale",
                col.name
            )));
        }
        if pre.categorical.name != CATEGORICAL_FEATURE {
            return Err(ModelError::Corrupt(format!(
                "categorical column is {}, expected {CATEGORICAL_FEATURE}",
                pre.categorical.name
            )));
        }

        if self.forest.n_trees() == 0 {
            return Err(ModelError::Corrupt("forest has no trees".into()));
        }
        if let Some(idx) = self.forest.max_feature_idx() {
            if idx >= pre.width() {
                return Err(ModelError::Corrupt(format!(
                    "split on feature {idx} but only {} encoded features",
                    pre.width()
                )));
            }
        }
        if !self.forest.is_finite() {
            return Err(ModelError::Corrupt(
                "non-finite threshold or leaf value".into(),
            ));
        }
        Ok(())
    }
}

impl Predictor for HousingModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let x = self
            .preprocessing
            .encode(record)
            .map_err(|col| ModelError::SchemaMismatch(format!("no input column {col}")))?;
        let value = self.forest.predict_one(&x).ok_or_else(|| {
            ModelError::SchemaMismatch(format!(
                "encoded {} features, forest addresses more",
                x.len()
            ))
        })?;
        if !value.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(value)
    }
}
