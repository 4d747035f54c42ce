//! Kafka service accounts and their ACLs

use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ServiceAccountResource = Manifest<ServiceAccountMetadata, ServiceAccountSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountMetadata {
    pub name: String,
    pub cluster: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ResourceKind for ServiceAccountMetadata {
    const KIND: &'static str = "ServiceAccount";
    const API_VERSION: &'static str = "v1";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAccountSpec {
    pub authorization: Authorization,
}

/// ACL dialect, chosen by the cluster's flavor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Authorization {
    #[serde(rename = "KAFKA_ACL")]
    Kafka { acls: Vec<KafkaAcl> },
    #[serde(rename = "AIVEN_ACL")]
    Aiven { acls: Vec<AivenAcl> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaAcl {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub pattern_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    pub operations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AivenAcl {
    pub resource_type: String,
    pub name: String,
    pub permission: String,
}
