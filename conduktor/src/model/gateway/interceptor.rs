//! Gateway interceptors
//!
//! The interceptor `config` is plugin specific, so it is carried as raw JSON.

use super::GATEWAY_API_VERSION;
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type InterceptorResource = Manifest<InterceptorMetadata, InterceptorSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptorMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<InterceptorScope>,
}

impl ResourceKind for InterceptorMetadata {
    const KIND: &'static str = "Interceptor";
    const API_VERSION: &'static str = GATEWAY_API_VERSION;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterceptorScope {
    #[serde(rename = "vCluster", default, skip_serializing_if = "Option::is_none")]
    pub vcluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub plugin_class: String,
    pub priority: i64,
    pub config: Value,
}
