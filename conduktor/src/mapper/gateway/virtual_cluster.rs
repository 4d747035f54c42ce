use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    bool_value, build_object, key_path, object_set_value, read_block, read_bool, read_objects,
    read_required_string, read_string, read_strings, string_map_from, string_map_value,
    string_set_value, string_value, write_objects, EmptyAs, ResourceMapper,
};
use crate::model::gateway::virtual_cluster::{
    ResourcePattern, VirtualClusterAcl, VirtualClusterMetadata, VirtualClusterResource,
    VirtualClusterSpec,
};
use crate::model::Manifest;
use std::collections::{BTreeMap, HashMap};
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::{FromTerraform, IntoTerraform};

pub struct VirtualClusterMapper;

fn resource_pattern_type() -> AttributeType {
    AttributeType::object([
        ("resource_type", AttributeType::String),
        ("name", AttributeType::String),
        ("pattern_type", AttributeType::String),
    ])
}

fn acl_type() -> AttributeType {
    AttributeType::object([
        ("resource_pattern", resource_pattern_type()),
        ("principal", AttributeType::String),
        ("host", AttributeType::String),
        ("operation", AttributeType::String),
        ("permission_type", AttributeType::String),
    ])
}

fn client_properties_type() -> AttributeType {
    AttributeType::map(AttributeType::map(AttributeType::String))
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("acl_enabled", AttributeType::Bool),
        ("acl_mode", AttributeType::String),
        ("type", AttributeType::String),
        ("bootstrap_servers", AttributeType::String),
        ("super_users", AttributeType::set(AttributeType::String)),
        ("client_properties", client_properties_type()),
        ("acls", AttributeType::set(acl_type())),
    ])
}

fn read_acl(obj: &Dynamic) -> Result<VirtualClusterAcl> {
    let resource_pattern = read_block(obj, "resource_pattern", |pattern| {
        Ok(ResourcePattern {
            resource_type: read_required_string(pattern, "resource_type")?,
            name: read_required_string(pattern, "name")?,
            pattern_type: read_required_string(pattern, "pattern_type")?,
        })
    })?;
    Ok(VirtualClusterAcl {
        resource_pattern,
        principal: read_required_string(obj, "principal")?,
        host: read_required_string(obj, "host")?,
        operation: read_required_string(obj, "operation")?,
        permission_type: read_required_string(obj, "permission_type")?,
    })
}

fn write_acl(acl: &VirtualClusterAcl) -> Result<Dynamic> {
    let pattern = &acl.resource_pattern;
    let pattern = ObjectBuilder::new()
        .attribute("resource_type", Dynamic::string(&pattern.resource_type))
        .attribute("name", Dynamic::string(&pattern.name))
        .attribute("pattern_type", Dynamic::string(&pattern.pattern_type));
    let pattern =
        build_object(pattern, &resource_pattern_type()).at(IntoTerraform, "resource_pattern")?;
    let builder = ObjectBuilder::new()
        .attribute("resource_pattern", pattern)
        .attribute("principal", Dynamic::string(&acl.principal))
        .attribute("host", Dynamic::string(&acl.host))
        .attribute("operation", Dynamic::string(&acl.operation))
        .attribute("permission_type", Dynamic::string(&acl.permission_type));
    build_object(builder, &acl_type())
}

/// Properties are grouped by client kind, each group a string map
fn read_client_properties(spec: &Dynamic) -> Result<BTreeMap<String, BTreeMap<String, String>>> {
    let value = spec
        .attribute("client_properties")
        .at(FromTerraform, "client_properties")?;
    let Some(groups) = value.as_entries().at(FromTerraform, "client_properties")? else {
        return Ok(BTreeMap::new());
    };
    let mut properties = BTreeMap::new();
    for (group, entries) in groups {
        let entries = string_map_from(entries)
            .at(FromTerraform, &key_path(group))
            .at(FromTerraform, "client_properties")?;
        properties.insert(group.clone(), entries);
    }
    Ok(properties)
}

fn write_client_properties(
    properties: &BTreeMap<String, BTreeMap<String, String>>,
) -> Result<Dynamic> {
    if properties.is_empty() {
        return Ok(Dynamic::Null);
    }
    let mut groups = HashMap::new();
    for (group, entries) in properties {
        groups.insert(group.clone(), string_map_value(entries, EmptyAs::Empty)?);
    }
    Ok(tfplug::map_value(
        &AttributeType::map(AttributeType::String),
        groups,
    )?)
}

impl ResourceMapper for VirtualClusterMapper {
    const TYPE_NAME: &'static str = "conduktor_gateway_virtual_cluster_v2";

    type Metadata = VirtualClusterMetadata;
    type Spec = VirtualClusterSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([("name", AttributeType::String), ("spec", spec_type())])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<VirtualClusterResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to virtual cluster");
        let metadata = VirtualClusterMetadata {
            name: read_required_string(value, "name")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(VirtualClusterSpec {
                acl_enabled: read_bool(spec, "acl_enabled")?,
                acl_mode: read_string(spec, "acl_mode")?,
                super_users: read_strings(spec, "super_users")?,
                cluster_type: read_string(spec, "type")?,
                // computed by the gateway, an unknown plan value reads as absent
                bootstrap_servers: read_string(spec, "bootstrap_servers")?,
                client_properties: read_client_properties(spec)?,
                acls: read_objects(spec, "acls", read_acl)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &VirtualClusterResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping virtual cluster to terraform value"
        );
        let spec = &model.spec;
        let acls = write_objects(&spec.acls, write_acl)
            .and_then(|items| object_set_value(&acl_type(), items, EmptyAs::Null))
            .at(IntoTerraform, "spec.acls")?;
        let client_properties = write_client_properties(&spec.client_properties)
            .at(IntoTerraform, "spec.client_properties")?;
        let builder = ObjectBuilder::new()
            .attribute("acl_enabled", bool_value(spec.acl_enabled))
            .attribute("acl_mode", string_value(spec.acl_mode.as_deref()))
            .attribute("type", string_value(spec.cluster_type.as_deref()))
            .attribute("bootstrap_servers", string_value(spec.bootstrap_servers.as_deref()))
            .attribute("super_users", string_set_value(&spec.super_users, EmptyAs::Null)?)
            .attribute("client_properties", client_properties)
            .attribute("acls", acls);
        let spec = build_object(builder, &spec_type()).at(IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
