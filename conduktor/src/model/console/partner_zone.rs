//! Partner zones: curated topic sharing with external partners

use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type PartnerZoneResource = Manifest<PartnerZoneMetadata, PartnerZoneSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerZoneMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ResourceKind for PartnerZoneMetadata {
    const KIND: &'static str = "PartnerZone";
    const API_VERSION: &'static str = "v2";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerZoneSpec {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub cluster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_mode: Option<AuthenticationMode>,
    #[serde(default)]
    pub topics: Vec<PartnerZoneTopic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<Partner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_control_policies: Option<TrafficControlPolicies>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationMode {
    #[serde(rename = "type")]
    pub mode_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerZoneTopic {
    pub name: String,
    pub backing_topic: String,
    pub permission: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficControlPolicies {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_produce_rate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consume_rate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_commit_offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headers {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_on_produce: Vec<AddedHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_on_consume: Vec<RemovedHeader>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedHeader {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_if_exists: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedHeader {
    pub key_regex: String,
}
