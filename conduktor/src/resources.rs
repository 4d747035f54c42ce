//! Resource registry
//!
//! Maps Terraform resource type names to their mappers so callers holding
//! only a type name can convert between Terraform values and client
//! resources.

use crate::client::Resource;
use crate::config::ProviderMode;
use crate::error::{Error, Result};
use crate::mapper::{console, gateway, ResourceMapper};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic};

struct Registration {
    type_name: &'static str,
    mode: ProviderMode,
    resource_type: fn() -> AttributeType,
    to_client: fn(&Dynamic) -> Result<Resource>,
    to_terraform: fn(&Resource) -> Result<Dynamic>,
}

const fn register<M: ResourceMapper>(mode: ProviderMode) -> Registration {
    Registration {
        type_name: M::TYPE_NAME,
        mode,
        resource_type: M::resource_type,
        to_client: to_client::<M>,
        to_terraform: to_terraform::<M>,
    }
}

fn to_client<M: ResourceMapper>(value: &Dynamic) -> Result<Resource> {
    M::tf_to_internal_model(value)?.to_client_resource()
}

fn to_terraform<M: ResourceMapper>(resource: &Resource) -> Result<Dynamic> {
    let model = Manifest::<M::Metadata, M::Spec>::from_client_resource(resource)?;
    M::internal_model_to_terraform(&model)
}

static REGISTRY: [Registration; 19] = [
    register::<console::UserMapper>(ProviderMode::Console),
    register::<console::GroupMapper>(ProviderMode::Console),
    register::<console::ApplicationMapper>(ProviderMode::Console),
    register::<console::ApplicationGroupMapper>(ProviderMode::Console),
    register::<console::ApplicationInstanceMapper>(ProviderMode::Console),
    register::<console::ApplicationInstancePermissionMapper>(ProviderMode::Console),
    register::<console::KafkaClusterMapper>(ProviderMode::Console),
    register::<console::KafkaConnectMapper>(ProviderMode::Console),
    register::<console::TopicMapper>(ProviderMode::Console),
    register::<console::ConnectorMapper>(ProviderMode::Console),
    register::<console::ServiceAccountMapper>(ProviderMode::Console),
    register::<console::TopicPolicyMapper>(ProviderMode::Console),
    register::<console::SubjectMapper>(ProviderMode::Console),
    register::<console::PartnerZoneMapper>(ProviderMode::Console),
    register::<console::ResourcePolicyMapper>(ProviderMode::Console),
    register::<gateway::GatewayServiceAccountMapper>(ProviderMode::Gateway),
    register::<gateway::InterceptorMapper>(ProviderMode::Gateway),
    register::<gateway::VirtualClusterMapper>(ProviderMode::Gateway),
    register::<gateway::GatewayGroupMapper>(ProviderMode::Gateway),
];

fn lookup(type_name: &str) -> Result<&'static Registration> {
    REGISTRY
        .iter()
        .find(|entry| entry.type_name == type_name)
        .ok_or_else(|| Error::UnknownResourceType(type_name.to_string()))
}

/// Every supported Terraform resource type name
pub fn resource_type_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|entry| entry.type_name)
}

/// Which provider mode manages `type_name`, `None` when it is not a known type
pub fn provider_mode(type_name: &str) -> Option<ProviderMode> {
    lookup(type_name).ok().map(|entry| entry.mode)
}

pub fn resource_type(type_name: &str) -> Result<AttributeType> {
    Ok((lookup(type_name)?.resource_type)())
}

pub fn terraform_to_client_resource(type_name: &str, value: &Dynamic) -> Result<Resource> {
    let entry = lookup(type_name)?;
    tracing::debug!(resource = type_name, "converting terraform value to client resource");
    (entry.to_client)(value)
}

pub fn client_resource_to_terraform(type_name: &str, resource: &Resource) -> Result<Dynamic> {
    let entry = lookup(type_name)?;
    tracing::debug!(
        resource = type_name,
        kind = %resource.kind,
        name = %resource.name,
        "converting client resource to terraform value"
    );
    (entry.to_terraform)(resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn type_names_are_unique() {
        let names: Vec<_> = resource_type_names().collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.len(), 19);
    }

    #[test]
    fn modes_follow_type_prefix() {
        for name in resource_type_names() {
            let expected = if name.starts_with("conduktor_gateway_") {
                ProviderMode::Gateway
            } else {
                ProviderMode::Console
            };
            assert_eq!(provider_mode(name), Some(expected), "{}", name);
        }
        assert_eq!(provider_mode("conduktor_console_alert_v1"), None);
    }

    #[test]
    fn every_resource_type_is_an_object() {
        for name in resource_type_names() {
            let ty = resource_type(name).unwrap();
            let attrs = ty.attribute_types().unwrap();
            assert!(attrs.contains_key("name"), "{} has no name attribute", name);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = terraform_to_client_resource("conduktor_console_alert_v1", &Dynamic::Null)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownResourceType(name) if name == "conduktor_console_alert_v1"
        ));
        assert_eq!(
            resource_type("conduktor_gateway_acl_v1").unwrap_err().to_string(),
            "Unknown resource: conduktor_gateway_acl_v1"
        );
    }
}
