use super::GATEWAY_API_VERSION;
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type GatewayGroupResource = Manifest<GatewayGroupMetadata, GatewayGroupSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayGroupMetadata {
    pub name: String,
}

impl ResourceKind for GatewayGroupMetadata {
    const KIND: &'static str = "GatewayGroup";
    const API_VERSION: &'static str = GATEWAY_API_VERSION;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayGroupSpec {
    #[serde(default)]
    pub members: Vec<GroupMember>,
    #[serde(default)]
    pub external_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    #[serde(rename = "vCluster", default, skip_serializing_if = "Option::is_none")]
    pub vcluster: Option<String>,
    pub name: String,
}
