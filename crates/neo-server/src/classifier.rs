//! Hazard classifiers.
//!
//! The production model is a random forest exported to JSON: a list of
//! binary decision trees whose leaves carry the hazardous-class
//! probability. Prediction averages the leaf probabilities across trees
//! and thresholds at 0.5.

use polars::prelude::*;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model format: {0}")]
    Format(String),

    #[error("Model input is missing feature column '{0}'")]
    MissingFeature(String),

    #[error("Model input error: {0}")]
    Input(#[from] PolarsError),
}

/// Anything that can score a validated feature table.
///
/// Implementations must accept columns in the order given by their
/// `feature_names` and return one label (0 or 1) per row.
pub trait Classifier: Send + Sync {
    /// Feature columns this model expects, in order.
    fn feature_names(&self) -> &[String];

    /// Predict a hazard label for every row of `df`.
    fn predict(&self, df: &DataFrame) -> Result<Vec<u8>, ModelError>;
}

/// One node of a decision tree.
///
/// `Split` must be listed before `Leaf`: with untagged deserialization
/// serde tries variants in order, and a leaf object can never satisfy
/// the split shape, but not vice versa.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        value: f64,
    },
}

impl Node {
    fn score(&self, row: &[f64]) -> f64 {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.score(row)
                } else {
                    right.score(row)
                }
            }
        }
    }

    fn max_feature(&self) -> Option<usize> {
        match self {
            Node::Leaf { .. } => None,
            Node::Split {
                feature,
                left,
                right,
                ..
            } => [Some(*feature), left.max_feature(), right.max_feature()]
                .into_iter()
                .flatten()
                .max(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForestFile {
    feature_names: Vec<String>,
    trees: Vec<Node>,
}

/// A JSON-serialized random forest.
#[derive(Debug)]
pub struct ForestClassifier {
    feature_names: Vec<String>,
    trees: Vec<Node>,
}

impl ForestClassifier {
    /// Load and validate a forest from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a forest from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let file: ForestFile = serde_json::from_str(text)
            .map_err(|e| ModelError::Format(e.to_string()))?;

        if file.trees.is_empty() {
            return Err(ModelError::Format("forest has no trees".to_string()));
        }
        if file.feature_names.is_empty() {
            return Err(ModelError::Format(
                "forest declares no feature names".to_string(),
            ));
        }
        for (i, tree) in file.trees.iter().enumerate() {
            if let Some(max) = tree.max_feature()
                && max >= file.feature_names.len()
            {
                return Err(ModelError::Format(format!(
                    "tree {} references feature index {} but only {} features are declared",
                    i,
                    max,
                    file.feature_names.len()
                )));
            }
        }

        Ok(Self {
            feature_names: file.feature_names,
            trees: file.trees,
        })
    }

    /// Extract the feature matrix in model order, one Vec per row.
    fn feature_rows(&self, df: &DataFrame) -> Result<Vec<Vec<f64>>, ModelError> {
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(self.feature_names.len());
        for name in &self.feature_names {
            let series = df
                .column(name.as_str())
                .map_err(|_| ModelError::MissingFeature(name.clone()))?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            let values: Vec<f64> = series
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect();
            columns.push(values);
        }

        let height = df.height();
        let mut rows = Vec::with_capacity(height);
        for i in 0..height {
            rows.push(columns.iter().map(|col| col[i]).collect());
        }
        Ok(rows)
    }
}

impl Classifier for ForestClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, df: &DataFrame) -> Result<Vec<u8>, ModelError> {
        let rows = self.feature_rows(df)?;

        let mut labels = Vec::with_capacity(rows.len());
        for row in &rows {
            let total: f64 = self.trees.iter().map(|t| t.score(row)).sum();
            let mean = total / self.trees.len() as f64;
            labels.push(u8::from(mean >= 0.5));
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TINY_FOREST: &str = r#"{
        "feature_names": ["a", "b"],
        "trees": [
            {"feature": 0, "threshold": 0.5, "left": {"value": 1.0}, "right": {"value": 0.0}},
            {"feature": 1, "threshold": 0.5, "left": {"value": 1.0}, "right": {"value": 0.0}}
        ]
    }"#;

    #[test]
    fn test_parse_and_predict() {
        let forest = ForestClassifier::from_json(TINY_FOREST).unwrap();
        assert_eq!(forest.feature_names(), &["a".to_string(), "b".to_string()]);

        let df = df![
            "a" => [0.1, 0.9, 0.1],
            "b" => [0.1, 0.9, 0.9],
        ]
        .unwrap();

        // Row 0: both trees vote 1. Row 1: both vote 0.
        // Row 2: split vote, mean 0.5 rounds up to hazardous.
        let labels = forest.predict(&df).unwrap();
        assert_eq!(labels, vec![1, 0, 1]);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let forest = ForestClassifier::from_json(TINY_FOREST).unwrap();
        let df = df!["a" => [0.1]].unwrap();

        let err = forest.predict(&df).unwrap_err();
        match err {
            ModelError::MissingFeature(name) => assert_eq!(name, "b"),
            other => panic!("expected MissingFeature, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_feature_index_rejected() {
        let bad = r#"{
            "feature_names": ["a"],
            "trees": [
                {"feature": 3, "threshold": 0.5, "left": {"value": 1.0}, "right": {"value": 0.0}}
            ]
        }"#;
        let err = ForestClassifier::from_json(bad).unwrap_err();
        assert!(matches!(err, ModelError::Format(_)));
    }

    #[test]
    fn test_empty_forest_rejected() {
        let err =
            ForestClassifier::from_json(r#"{"feature_names": ["a"], "trees": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::Format(_)));
    }
}
