use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{build_object, read_block, read_required_string, ResourceMapper};
use crate::model::console::application_instance_permission::{
    ApplicationInstancePermissionMetadata, ApplicationInstancePermissionResource,
    ApplicationInstancePermissionSpec, PermissionResource,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct ApplicationInstancePermissionMapper;

fn permission_resource_type() -> AttributeType {
    AttributeType::object([
        ("type", AttributeType::String),
        ("name", AttributeType::String),
        ("pattern_type", AttributeType::String),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("resource", permission_resource_type()),
        ("user_permission", AttributeType::String),
        ("service_account_permission", AttributeType::String),
        ("granted_to", AttributeType::String),
    ])
}

impl ResourceMapper for ApplicationInstancePermissionMapper {
    const TYPE_NAME: &'static str = "conduktor_console_application_instance_permission_v1";

    type Metadata = ApplicationInstancePermissionMetadata;
    type Spec = ApplicationInstancePermissionSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("application", AttributeType::String),
            ("app_instance", AttributeType::String),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<ApplicationInstancePermissionResource> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            "mapping terraform value to application instance permission"
        );
        let metadata = ApplicationInstancePermissionMetadata {
            name: read_required_string(value, "name")?,
            application: read_required_string(value, "application")?,
            app_instance: read_required_string(value, "app_instance")?,
        };
        let spec = read_block(value, "spec", |spec| {
            let resource = read_block(spec, "resource", |resource| {
                Ok(PermissionResource {
                    resource_type: read_required_string(resource, "type")?,
                    name: read_required_string(resource, "name")?,
                    pattern_type: read_required_string(resource, "pattern_type")?,
                })
            })?;
            Ok(ApplicationInstancePermissionSpec {
                resource,
                user_permission: read_required_string(spec, "user_permission")?,
                service_account_permission: read_required_string(
                    spec,
                    "service_account_permission",
                )?,
                granted_to: read_required_string(spec, "granted_to")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(
        model: &ApplicationInstancePermissionResource,
    ) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping application instance permission to terraform value"
        );
        let spec = &model.spec;
        let resource = ObjectBuilder::new()
            .attribute("type", Dynamic::string(&spec.resource.resource_type))
            .attribute("name", Dynamic::string(&spec.resource.name))
            .attribute("pattern_type", Dynamic::string(&spec.resource.pattern_type));
        let resource = build_object(resource, &permission_resource_type())
            .at(Direction::IntoTerraform, "spec.resource")?;
        let builder = ObjectBuilder::new()
            .attribute("resource", resource)
            .attribute("user_permission", Dynamic::string(&spec.user_permission))
            .attribute(
                "service_account_permission",
                Dynamic::string(&spec.service_account_permission),
            )
            .attribute("granted_to", Dynamic::string(&spec.granted_to));
        let spec = build_object(builder, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("application", Dynamic::string(&model.metadata.application))
            .attribute("app_instance", Dynamic::string(&model.metadata.app_instance))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
