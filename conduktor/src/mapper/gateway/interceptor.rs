//! Gateway interceptors
//!
//! `config` is free-form plugin configuration. Terraform holds it as a JSON
//! string; the API takes the decoded document.

use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, number_value, optional_object, read_block, read_i64, read_nested,
    read_required_string, read_string, string_value, ResourceMapper,
};
use crate::model::gateway::interceptor::{
    InterceptorMetadata, InterceptorResource, InterceptorScope, InterceptorSpec,
};
use crate::model::Manifest;
use serde_json::Value;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::{FromTerraform, IntoTerraform};

pub struct InterceptorMapper;

fn scope_type() -> AttributeType {
    AttributeType::object([
        ("vcluster", AttributeType::String),
        ("group", AttributeType::String),
        ("username", AttributeType::String),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("comment", AttributeType::String),
        ("plugin_class", AttributeType::String),
        ("priority", AttributeType::Number),
        ("config", AttributeType::String),
    ])
}

/// An absent config is an empty object
fn read_config(spec: &Dynamic) -> Result<Value> {
    match read_string(spec, "config")? {
        Some(text) => serde_json::from_str(&text).at(FromTerraform, "config"),
        None => Ok(Value::Object(serde_json::Map::new())),
    }
}

impl ResourceMapper for InterceptorMapper {
    const TYPE_NAME: &'static str = "conduktor_gateway_interceptor_v2";

    type Metadata = InterceptorMetadata;
    type Spec = InterceptorSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("scope", scope_type()),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<InterceptorResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to interceptor");
        let metadata = InterceptorMetadata {
            name: read_required_string(value, "name")?,
            scope: read_nested(value, "scope", |scope| {
                Ok(InterceptorScope {
                    vcluster: read_string(scope, "vcluster")?,
                    group: read_string(scope, "group")?,
                    username: read_string(scope, "username")?,
                })
            })?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(InterceptorSpec {
                comment: read_string(spec, "comment")?,
                plugin_class: read_required_string(spec, "plugin_class")?,
                priority: read_i64(spec, "priority")?.unwrap_or_default(),
                config: read_config(spec)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &InterceptorResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping interceptor to terraform value"
        );
        let spec = &model.spec;
        let config = serde_json::to_string(&spec.config).at(IntoTerraform, "spec.config")?;
        let builder = ObjectBuilder::new()
            .attribute("comment", string_value(spec.comment.as_deref()))
            .attribute("plugin_class", Dynamic::string(&spec.plugin_class))
            .attribute("priority", number_value(Some(spec.priority)))
            .attribute("config", Dynamic::string(config));
        let spec = build_object(builder, &spec_type()).at(IntoTerraform, "spec")?;

        let scope = optional_object(model.metadata.scope.as_ref(), "scope", |scope| {
            let builder = ObjectBuilder::new()
                .attribute("vcluster", string_value(scope.vcluster.as_deref()))
                .attribute("group", string_value(scope.group.as_deref()))
                .attribute("username", string_value(scope.username.as_deref()));
            build_object(builder, &scope_type())
        })?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("scope", scope)
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
