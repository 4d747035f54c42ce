use super::permission::Permission;
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type GroupResource = Manifest<GroupMetadata, GroupSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMetadata {
    pub name: String,
}

impl ResourceKind for GroupMetadata {
    const KIND: &'static str = "Group";
    const API_VERSION: &'static str = "v2";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub external_groups: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
    /// Filled by Console from the external groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_from_external_groups: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}
