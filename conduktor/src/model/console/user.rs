use super::permission::Permission;
use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type UserResource = Manifest<UserMetadata, UserSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub name: String,
}

impl ResourceKind for UserMetadata {
    const KIND: &'static str = "User";
    const API_VERSION: &'static str = "v2";
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}
