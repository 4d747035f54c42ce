use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ResourcePolicyResource = Manifest<ResourcePolicyMetadata, ResourcePolicySpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePolicyMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ResourceKind for ResourcePolicyMetadata {
    const KIND: &'static str = "ResourcePolicy";
    const API_VERSION: &'static str = "v1";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePolicySpec {
    /// Kind the rules are evaluated against, e.g. `Topic`
    pub target_kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

/// CEL condition and the message shown when it fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    pub condition: String,
    pub error_message: String,
}
