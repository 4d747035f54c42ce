use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ConnectorResource = Manifest<ConnectorMetadata, ConnectorSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorMetadata {
    pub name: String,
    pub cluster: String,
    pub connect_cluster: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_restart: Option<AutoRestart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceKind for ConnectorMetadata {
    const KIND: &'static str = "Connector";
    const API_VERSION: &'static str = "v2";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRestart {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectorSpec {
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}
