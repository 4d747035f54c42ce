use crate::model::{Manifest, ResourceKind};
use serde::{Deserialize, Serialize};

pub type ApplicationInstancePermissionResource =
    Manifest<ApplicationInstancePermissionMetadata, ApplicationInstancePermissionSpec>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInstancePermissionMetadata {
    pub name: String,
    pub application: String,
    pub app_instance: String,
}

impl ResourceKind for ApplicationInstancePermissionMetadata {
    const KIND: &'static str = "ApplicationInstancePermission";
    const API_VERSION: &'static str = "v1";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInstancePermissionSpec {
    pub resource: PermissionResource,
    pub user_permission: String,
    pub service_account_permission: String,
    pub granted_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub pattern_type: String,
}
