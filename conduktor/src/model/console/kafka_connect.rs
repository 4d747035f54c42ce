use crate::model::security::KafkaConnectSecurity;
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type KafkaConnectResource = Manifest<KafkaConnectMetadata, KafkaConnectSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KafkaConnectMetadata {
    pub name: String,
    pub cluster: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ResourceKind for KafkaConnectMetadata {
    const KIND: &'static str = "KafkaConnectCluster";
    const API_VERSION: &'static str = "v2";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaConnectSpec {
    pub display_name: String,
    pub urls: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_untrusted_certificate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<KafkaConnectSecurity>,
}
