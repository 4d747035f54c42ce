//! Self-service applications

use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type ApplicationResource = Manifest<ApplicationMetadata, ApplicationSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationMetadata {
    pub name: String,
}

impl ResourceKind for ApplicationMetadata {
    const KIND: &'static str = "Application";
    const API_VERSION: &'static str = "v1";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: String,
}
