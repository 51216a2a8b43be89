use serde::Deserialize;

use super::{DietModel, ModelError};

const LEAF: i64 = -1;

/// One fitted decision tree in flat array form
///
/// Node `i` is a leaf when `children_left[i] == -1`. Otherwise the walk goes
/// left when `x[feature[i]] <= threshold[i]`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    /// Leaf class distribution for `x`, normalized to sum to one
    fn leaf_distribution(&self, x: &[f64]) -> &[f64] {
        let mut node = 0usize;
        // Validation guarantees children come after their parent, so this terminates.
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }

    fn validate(&self, tree: usize, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        let nodes = self.children_left.len();
        let shape_err = |msg: String| ModelError::Shape(format!("tree {}: {}", tree, msg));

        if nodes == 0 {
            return Err(shape_err("has no nodes".to_string()));
        }
        if self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
            || self.value.len() != nodes
        {
            return Err(shape_err("node arrays differ in length".to_string()));
        }

        for node in 0..nodes {
            let row = &self.value[node];
            if row.len() != n_classes {
                return Err(shape_err(format!(
                    "node {} has {} class values, expected {}",
                    node,
                    row.len(),
                    n_classes
                )));
            }
            if row.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(shape_err(format!("node {} has invalid class values", node)));
            }

            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if right != LEAF {
                    return Err(shape_err(format!("node {} has only a right child", node)));
                }
                continue;
            }

            let in_range = |child: i64| child > node as i64 && (child as usize) < nodes;
            if !in_range(left) || !in_range(right) {
                return Err(shape_err(format!("node {} has out-of-order children", node)));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(shape_err(format!(
                    "node {} splits on unknown feature {}",
                    node, feature
                )));
            }
            if !self.threshold[node].is_finite() {
                return Err(shape_err(format!("node {} threshold is not finite", node)));
            }
        }

        Ok(())
    }
}

#[derive(Deserialize)]
struct ForestArtifact {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

/// Fitted random forest classifier
///
/// The class distribution is the mean of each tree's normalized leaf values.
#[derive(Debug, Clone)]
pub struct RandomForest {
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(
        n_features: usize,
        n_classes: usize,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ModelError> {
        if trees.is_empty() {
            return Err(ModelError::Shape("forest has no trees".to_string()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i, n_features, n_classes)?;
        }

        Ok(Self { n_classes, trees })
    }

    pub fn from_json(raw: &str, expected_features: usize) -> Result<Self, ModelError> {
        let artifact: ForestArtifact =
            serde_json::from_str(raw).map_err(|e| ModelError::Shape(format!("model: {}", e)))?;

        if artifact.n_features != expected_features {
            return Err(ModelError::Shape(format!(
                "model expects {} features, feature vector has {}",
                artifact.n_features, expected_features
            )));
        }

        Self::new(artifact.n_features, artifact.n_classes, artifact.trees)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl DietModel for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_proba(&self, scaled: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.n_classes];

        for tree in &self.trees {
            let leaf = tree.leaf_distribution(scaled);
            let total: f64 = leaf.iter().sum();
            if total > 0.0 {
                for (p, v) in proba.iter_mut().zip(leaf) {
                    *p += v / total;
                }
            }
        }

        let count = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= count);
        proba
    }
}
