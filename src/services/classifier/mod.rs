//! Diet category classification
//!
//! Wraps the fitted scaler, the fitted model and the index-to-label table.
//! Artifacts are loaded and validated once at startup; any problem there is a
//! [`ModelError`] and the server refuses to start.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::DietCategory,
    services::vectorizer::{FeatureVector, FEATURE_COUNT},
};

mod forest;
mod scaler;

pub use forest::{DecisionTree, RandomForest};
pub use scaler::StandardScaler;

pub const SCALER_FILE: &str = "scaler.json";
pub const MODEL_FILE: &str = "diet_model.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Fatal model artifact problems
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("incompatible model artifact: {0}")]
    Shape(String),

    #[error("label table mismatch at index {index}: expected '{expected}', found '{found}'")]
    LabelMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },
}

/// A fitted multi-class model over scaled feature vectors
///
/// Implementations are shared across request handlers, so they must be safe to
/// call concurrently. A model that is not should wrap itself in a mutex.
pub trait DietModel: Send + Sync {
    fn n_classes(&self) -> usize;

    /// Class distribution for one scaled input, indexed by class
    fn predict_proba(&self, scaled: &[f64]) -> Vec<f64>;
}

#[derive(Deserialize)]
struct LabelEncoderArtifact {
    classes: Vec<String>,
}

pub struct Classifier {
    scaler: StandardScaler,
    model: Box<dyn DietModel>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("scaler", &self.scaler)
            .field("n_classes", &self.model.n_classes())
            .finish()
    }
}

impl Classifier {
    pub fn new(
        scaler: StandardScaler,
        model: impl DietModel + 'static,
    ) -> Result<Self, ModelError> {
        if model.n_classes() != DietCategory::ALL.len() {
            return Err(ModelError::Shape(format!(
                "model has {} classes, the label table has {}",
                model.n_classes(),
                DietCategory::ALL.len()
            )));
        }

        Ok(Self {
            scaler,
            model: Box::new(model),
        })
    }

    /// Loads scaler, forest and label table from `model_dir`
    pub fn load(model_dir: &Path) -> Result<Self, ModelError> {
        let scaler = StandardScaler::from_json(&read_artifact(&model_dir.join(SCALER_FILE))?)?;
        let forest =
            RandomForest::from_json(&read_artifact(&model_dir.join(MODEL_FILE))?, FEATURE_COUNT)?;
        verify_label_table(&read_artifact(&model_dir.join(LABEL_ENCODER_FILE))?)?;

        tracing::info!(
            trees = forest.tree_count(),
            classes = forest.n_classes(),
            "Diet model loaded"
        );

        Self::new(scaler, forest)
    }

    /// Predicts the diet category for a feature vector
    ///
    /// Ties go to the lowest class index.
    pub fn classify(&self, vector: &FeatureVector) -> AppResult<DietCategory> {
        let scaled = self.scaler.transform(vector);
        let proba = self.model.predict_proba(&scaled);

        let index = argmax(&proba).ok_or_else(|| {
            AppError::Internal("model returned an empty class distribution".to_string())
        })?;

        DietCategory::from_index(index).ok_or_else(|| {
            AppError::Internal(format!("model returned unknown class index {}", index))
        })
    }
}

/// Index of the first maximum; NaN entries never win
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v > current => best = Some((i, v)),
            None if !v.is_nan() => best = Some((i, v)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

/// Checks a stored label table against the fixed category order
pub fn verify_label_table(raw: &str) -> Result<(), ModelError> {
    let artifact: LabelEncoderArtifact = serde_json::from_str(raw)
        .map_err(|e| ModelError::Shape(format!("label encoder: {}", e)))?;

    if artifact.classes.len() != DietCategory::ALL.len() {
        return Err(ModelError::Shape(format!(
            "label encoder has {} classes, expected {}",
            artifact.classes.len(),
            DietCategory::ALL.len()
        )));
    }

    for (index, (found, category)) in artifact
        .classes
        .into_iter()
        .zip(DietCategory::ALL)
        .enumerate()
    {
        if found != category.label() {
            return Err(ModelError::LabelMismatch {
                index,
                expected: category.label(),
                found,
            });
        }
    }

    Ok(())
}

fn read_artifact(path: &Path) -> Result<String, ModelError> {
    std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}
