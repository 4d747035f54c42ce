//! Topic policies: per-field constraints applied to self-service topics

use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TopicPolicyResource = Manifest<TopicPolicyMetadata, TopicPolicySpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPolicyMetadata {
    pub name: String,
}

impl ResourceKind for TopicPolicyMetadata {
    const KIND: &'static str = "TopicPolicy";
    const API_VERSION: &'static str = "v1";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopicPolicySpec {
    /// Keyed by the topic field the constraint applies to,
    /// e.g. `spec.configs.retention.ms`
    #[serde(default)]
    pub policies: BTreeMap<String, Constraint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(flatten)]
    pub rule: ConstraintRule,
}

/// Tagged on the wire by its `constraint` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "constraint")]
pub enum ConstraintRule {
    Match { pattern: String },
    NoneOf { values: Vec<String> },
    OneOf { values: Vec<String> },
    Range { min: i64, max: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constraints_decode_by_discriminator() {
        let spec: TopicPolicySpec = serde_json::from_value(json!({
            "policies": {
                "metadata.labels.data-criticality": {
                    "constraint": "OneOf",
                    "values": ["C0", "C1", "C2"]
                },
                "spec.configs.retention.ms": {
                    "constraint": "Range",
                    "optional": true,
                    "min": 60000,
                    "max": 3600000
                }
            }
        }))
        .unwrap();

        assert_eq!(
            spec.policies["spec.configs.retention.ms"],
            Constraint {
                optional: Some(true),
                rule: ConstraintRule::Range {
                    min: 60000,
                    max: 3600000
                },
            }
        );
        assert!(matches!(
            spec.policies["metadata.labels.data-criticality"].rule,
            ConstraintRule::OneOf { .. }
        ));
    }

    #[test]
    fn constraint_encodes_discriminator() {
        let constraint = Constraint {
            optional: None,
            rule: ConstraintRule::Match {
                pattern: "^[a-z]+$".to_string(),
            },
        };
        let encoded = serde_json::to_value(&constraint).unwrap();
        assert_eq!(encoded, json!({"constraint": "Match", "pattern": "^[a-z]+$"}));

        let decoded: Constraint = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, constraint);
    }

    #[test]
    fn unknown_constraint_is_rejected() {
        let err = serde_json::from_value::<Constraint>(json!({
            "constraint": "Regex",
            "pattern": "x"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Regex"));
    }
}
