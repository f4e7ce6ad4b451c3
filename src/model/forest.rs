//! Random forest regressor read from the model artifact

use serde::Deserialize;

/// Leaf of a regression tree
#[derive(Debug, Clone, Deserialize)]
pub struct RegressionLeaf {
    /// Mean target value of the training samples that reached this leaf
    pub value: f64,
    #[serde(default)]
    pub n_samples: usize,
}

/// Internal split. Samples with `x[feature_idx] <= threshold` go left.
#[derive(Debug, Clone, Deserialize)]
pub struct RegressionNode {
    pub feature_idx: usize,
    pub threshold: f64,
    pub left: Box<RegressionTreeNode>,
    pub right: Box<RegressionTreeNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub enum RegressionTreeNode {
    Node(RegressionNode),
    Leaf(RegressionLeaf),
}

impl RegressionTreeNode {
    /// Leaf nodes have depth 0
    pub fn depth(&self) -> usize {
        match self {
            RegressionTreeNode::Leaf(_) => 0,
            RegressionTreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Largest feature index referenced by any split, if the tree splits at all
    pub fn max_feature_idx(&self) -> Option<usize> {
        match self {
            RegressionTreeNode::Leaf(_) => None,
            RegressionTreeNode::Node(node) => [
                Some(node.feature_idx),
                node.left.max_feature_idx(),
                node.right.max_feature_idx(),
            ]
            .into_iter()
            .flatten()
            .max(),
        }
    }

    /// True when every threshold and leaf value is finite
    pub fn is_finite(&self) -> bool {
        match self {
            RegressionTreeNode::Leaf(leaf) => leaf.value.is_finite(),
            RegressionTreeNode::Node(node) => {
                node.threshold.is_finite() && node.left.is_finite() && node.right.is_finite()
            }
        }
    }

    /// Walk to a leaf. Returns `None` when a split addresses a feature past the end of `x`.
    pub fn predict_one(&self, x: &[f64]) -> Option<f64> {
        let mut node = self;
        loop {
            match node {
                RegressionTreeNode::Leaf(leaf) => return Some(leaf.value),
                RegressionTreeNode::Node(internal) => {
                    let value = *x.get(internal.feature_idx)?;
                    node = if value <= internal.threshold {
                        &internal.left
                    } else {
                        &internal.right
                    };
                }
            }
        }
    }
}

/// Bagged ensemble; the estimate is the mean over trees
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<RegressionTreeNode>,
}

impl RandomForest {
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(RegressionTreeNode::depth).max().unwrap_or(0)
    }

    pub fn max_feature_idx(&self) -> Option<usize> {
        self.trees.iter().filter_map(RegressionTreeNode::max_feature_idx).max()
    }

    pub fn is_finite(&self) -> bool {
        self.trees.iter().all(RegressionTreeNode::is_finite)
    }

    /// Mean of the per-tree predictions. `None` for an empty forest or an
    /// out-of-range feature reference.
    pub fn predict_one(&self, x: &[f64]) -> Option<f64> {
        if self.trees.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_one(x)?;
        }
        Some(sum / self.trees.len() as f64)
    }
}
