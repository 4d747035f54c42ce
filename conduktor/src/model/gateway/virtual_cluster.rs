use super::GATEWAY_API_VERSION;
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type VirtualClusterResource = Manifest<VirtualClusterMetadata, VirtualClusterSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualClusterMetadata {
    pub name: String,
}

impl ResourceKind for VirtualClusterMetadata {
    const KIND: &'static str = "VirtualCluster";
    const API_VERSION: &'static str = GATEWAY_API_VERSION;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl_enabled: Option<bool>,
    /// KAFKA_API or REST_API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub super_users: Vec<String>,
    /// Standard or Partner
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub cluster_type: Option<String>,
    /// Assigned by the Gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_servers: Option<String>,
    /// Listener name to client properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub client_properties: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acls: Vec<VirtualClusterAcl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualClusterAcl {
    pub resource_pattern: ResourcePattern,
    pub principal: String,
    pub host: String,
    pub operation: String,
    pub permission_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePattern {
    pub resource_type: String,
    pub name: String,
    pub pattern_type: String,
}
