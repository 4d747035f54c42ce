//! Kafka cluster definitions, with provider flavor and schema registry

use crate::model::security::{ConfluentLikeSecurity, GlueSecurity};
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type KafkaClusterResource = Manifest<KafkaClusterMetadata, KafkaClusterSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KafkaClusterMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ResourceKind for KafkaClusterMetadata {
    const KIND: &'static str = "KafkaCluster";
    const API_VERSION: &'static str = "v2";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaClusterSpec {
    pub display_name: String,
    pub bootstrap_servers: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_untrusted_certificate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kafka_flavor: Option<KafkaFlavor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_registry: Option<SchemaRegistry>,
}

/// Managed Kafka offering the cluster runs on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KafkaFlavor {
    Aiven(AivenFlavor),
    Confluent(ConfluentFlavor),
    Gateway(GatewayFlavor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AivenFlavor {
    pub api_token: String,
    pub project: String,
    pub service_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfluentFlavor {
    pub key: String,
    pub secret: String,
    pub confluent_environment_id: String,
    pub confluent_cluster_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayFlavor {
    pub url: String,
    pub user: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_untrusted_certificate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SchemaRegistry {
    ConfluentLike(ConfluentLikeRegistry),
    Glue(GlueRegistry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfluentLikeRegistry {
    pub url: String,
    /// Extra client properties, in Java properties syntax
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_untrusted_certificate: Option<bool>,
    pub security: ConfluentLikeSecurity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlueRegistry {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_name: Option<String>,
    pub security: GlueSecurity,
}
