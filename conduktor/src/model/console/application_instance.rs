use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type ApplicationInstanceResource =
    Manifest<ApplicationInstanceMetadata, ApplicationInstanceSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInstanceMetadata {
    pub name: String,
    pub application: String,
}

impl ResourceKind for ApplicationInstanceMetadata {
    const KIND: &'static str = "ApplicationInstance";
    const API_VERSION: &'static str = "v1";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInstanceSpec {
    pub cluster: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topic_policy_ref: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_managed_service_account: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
    #[serde(default)]
    pub resources: Vec<InstanceResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_catalog_visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy_ref: Vec<String>,
}

/// Kafka resource owned by an application instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_cluster: Option<String>,
    pub name: String,
    pub pattern_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_mode: Option<String>,
}
