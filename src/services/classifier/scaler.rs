use serde::Deserialize;

use super::ModelError;
use crate::services::vectorizer::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

#[derive(Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Fitted standardization: `(x - mean) / scale` per feature
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    pub fn new(
        mean: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
    ) -> Result<Self, ModelError> {
        for (i, (m, s)) in mean.iter().zip(scale.iter()).enumerate() {
            if !m.is_finite() {
                return Err(ModelError::Shape(format!(
                    "scaler mean for '{}' is not finite",
                    FEATURE_NAMES[i]
                )));
            }
            if !s.is_finite() || *s == 0.0 {
                return Err(ModelError::Shape(format!(
                    "scaler scale for '{}' must be finite and non-zero",
                    FEATURE_NAMES[i]
                )));
            }
        }

        Ok(Self { mean, scale })
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let artifact: ScalerArtifact =
            serde_json::from_str(raw).map_err(|e| ModelError::Shape(format!("scaler: {}", e)))?;

        let mean = to_array("mean", artifact.mean)?;
        let scale = to_array("scale", artifact.scale)?;
        Self::new(mean, scale)
    }

    pub fn transform(&self, vector: &FeatureVector) -> [f64; FEATURE_COUNT] {
        let mut scaled = vector.values();
        for (i, x) in scaled.iter_mut().enumerate() {
            *x = (*x - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}

fn to_array(name: &str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ModelError> {
    let len = values.len();
    values.try_into().map_err(|_| {
        ModelError::Shape(format!(
            "scaler {} has {} entries, expected {}",
            name, len, FEATURE_COUNT
        ))
    })
}
