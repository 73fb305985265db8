//! Feature schema: the ordered columns the classifier expects, with the
//! precomputed default means used to heal minor schema drift.

use serde::{Deserialize, Serialize};

/// Name of the optional label column retained by the standalone CLI path.
pub const LABEL_COLUMN: &str = "Hazardous";

/// One required feature with its optional backfill default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    /// Precomputed training-set mean used to backfill missing columns
    /// and missing values. `None` means the feature cannot be healed.
    pub default_mean: Option<f64>,
}

/// The ordered feature set the classifier expects.
///
/// Column order is fixed: the output of the pipeline and the input to the
/// classifier both follow the order declared here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    features: Vec<FeatureSpec>,
    /// Optional label column carried through by the CLI when present.
    label: Option<String>,
}

impl FeatureSchema {
    /// Build a schema from explicit feature specs.
    pub fn new(features: Vec<FeatureSpec>, label: Option<String>) -> Self {
        Self { features, label }
    }

    /// The fixed six-feature schema for near-Earth-object hazard
    /// classification. Default means are training-set constants.
    pub fn neo_hazard() -> Self {
        let features = [
            ("Minimum Orbit Intersection", 0.4768977851980138),
            ("Absolute Magnitude", 0.1591059336579516),
            ("Avg_Diameter_KM", 0.13758845293463146),
            ("Perihelion Distance", 0.0479985661169944),
            ("Orbit Uncertainity", 0.04306290759519788),
            ("Inclination", 0.04022213144882968),
        ]
        .into_iter()
        .map(|(name, mean)| FeatureSpec {
            name: name.to_string(),
            default_mean: Some(mean),
        })
        .collect();

        Self {
            features,
            label: Some(LABEL_COLUMN.to_string()),
        }
    }

    /// Required feature names, in the declared order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }

    /// The default mean for a column, if one is configured.
    pub fn default_for(&self, name: &str) -> Option<f64> {
        self.features
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.default_mean)
    }

    /// Whether `name` is one of the required features.
    pub fn is_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name == name)
    }

    /// The label column name, if the schema declares one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of required features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the schema declares no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neo_hazard_feature_order() {
        let schema = FeatureSchema::neo_hazard();
        assert_eq!(
            schema.feature_names(),
            vec![
                "Minimum Orbit Intersection",
                "Absolute Magnitude",
                "Avg_Diameter_KM",
                "Perihelion Distance",
                "Orbit Uncertainity",
                "Inclination",
            ]
        );
        assert_eq!(schema.len(), 6);
    }

    #[test]
    fn test_default_means() {
        let schema = FeatureSchema::neo_hazard();
        assert_eq!(schema.default_for("Inclination"), Some(0.04022213144882968));
        assert_eq!(
            schema.default_for("Minimum Orbit Intersection"),
            Some(0.4768977851980138)
        );
        assert_eq!(schema.default_for("Hazardous"), None);
        assert_eq!(schema.default_for("nonexistent"), None);
    }

    #[test]
    fn test_label_column() {
        let schema = FeatureSchema::neo_hazard();
        assert_eq!(schema.label(), Some("Hazardous"));
        assert!(!schema.is_feature("Hazardous"));
        assert!(schema.is_feature("Orbit Uncertainity"));
    }

    #[test]
    fn test_schema_roundtrip() {
        let schema = FeatureSchema::neo_hazard();
        let json = serde_json::to_string(&schema).unwrap();
        let back: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back.feature_names(), schema.feature_names());
    }
}
