use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type ApplicationGroupResource = Manifest<ApplicationGroupMetadata, ApplicationGroupSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationGroupMetadata {
    pub name: String,
    pub application: String,
}

impl ResourceKind for ApplicationGroupMetadata {
    const KIND: &'static str = "ApplicationGroup";
    const API_VERSION: &'static str = "v1";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGroupSpec {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<ApplicationGroupPermission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGroupPermission {
    pub app_instance: String,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_cluster: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}
