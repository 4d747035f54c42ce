use super::GATEWAY_API_VERSION;
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type GatewayServiceAccountResource =
    Manifest<GatewayServiceAccountMetadata, GatewayServiceAccountSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayServiceAccountMetadata {
    pub name: String,
    #[serde(rename = "vCluster", default, skip_serializing_if = "Option::is_none")]
    pub vcluster: Option<String>,
}

impl ResourceKind for GatewayServiceAccountMetadata {
    const KIND: &'static str = "GatewayServiceAccount";
    const API_VERSION: &'static str = GATEWAY_API_VERSION;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayServiceAccountSpec {
    /// LOCAL or EXTERNAL
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_names: Vec<String>,
}
