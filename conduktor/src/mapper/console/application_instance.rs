use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    bool_value, build_object, object_set_value, read_block, read_bool, read_objects,
    read_required_string, read_string, read_strings, string_set_value, string_value,
    write_objects, EmptyAs, ResourceMapper,
};
use crate::model::console::application_instance::{
    ApplicationInstanceMetadata, ApplicationInstanceResource, ApplicationInstanceSpec,
    InstanceResource,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct ApplicationInstanceMapper;

fn instance_resource_type() -> AttributeType {
    AttributeType::object([
        ("type", AttributeType::String),
        ("connect_cluster", AttributeType::String),
        ("name", AttributeType::String),
        ("pattern_type", AttributeType::String),
        ("ownership_mode", AttributeType::String),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("cluster", AttributeType::String),
        ("service_account", AttributeType::String),
        ("application_managed_service_account", AttributeType::Bool),
        ("default_catalog_visibility", AttributeType::String),
        ("topic_policy_ref", AttributeType::set(AttributeType::String)),
        ("policy_ref", AttributeType::set(AttributeType::String)),
        ("resources", AttributeType::set(instance_resource_type())),
    ])
}

fn read_instance_resource(obj: &Dynamic) -> Result<InstanceResource> {
    Ok(InstanceResource {
        resource_type: read_required_string(obj, "type")?,
        connect_cluster: read_string(obj, "connect_cluster")?,
        name: read_required_string(obj, "name")?,
        pattern_type: read_required_string(obj, "pattern_type")?,
        ownership_mode: read_string(obj, "ownership_mode")?,
    })
}

fn write_instance_resource(resource: &InstanceResource) -> Result<Dynamic> {
    let builder = ObjectBuilder::new()
        .attribute("type", Dynamic::string(&resource.resource_type))
        .attribute("connect_cluster", string_value(resource.connect_cluster.as_deref()))
        .attribute("name", Dynamic::string(&resource.name))
        .attribute("pattern_type", Dynamic::string(&resource.pattern_type))
        .attribute("ownership_mode", string_value(resource.ownership_mode.as_deref()));
    build_object(builder, &instance_resource_type())
}

impl ResourceMapper for ApplicationInstanceMapper {
    const TYPE_NAME: &'static str = "conduktor_console_application_instance_v1";

    type Metadata = ApplicationInstanceMetadata;
    type Spec = ApplicationInstanceSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("application", AttributeType::String),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<ApplicationInstanceResource> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            "mapping terraform value to application instance"
        );
        let metadata = ApplicationInstanceMetadata {
            name: read_required_string(value, "name")?,
            application: read_required_string(value, "application")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(ApplicationInstanceSpec {
                cluster: read_required_string(spec, "cluster")?,
                topic_policy_ref: read_strings(spec, "topic_policy_ref")?,
                application_managed_service_account: read_bool(
                    spec,
                    "application_managed_service_account",
                )?,
                service_account: read_string(spec, "service_account")?,
                resources: read_objects(spec, "resources", read_instance_resource)?,
                default_catalog_visibility: read_string(spec, "default_catalog_visibility")?,
                policy_ref: read_strings(spec, "policy_ref")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &ApplicationInstanceResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping application instance to terraform value"
        );
        let spec = &model.spec;
        let resources = write_objects(&spec.resources, write_instance_resource)
            .and_then(|items| object_set_value(&instance_resource_type(), items, EmptyAs::Empty))
            .at(Direction::IntoTerraform, "spec.resources")?;
        let builder = ObjectBuilder::new()
            .attribute("cluster", Dynamic::string(&spec.cluster))
            .attribute("service_account", string_value(spec.service_account.as_deref()))
            .attribute(
                "application_managed_service_account",
                bool_value(spec.application_managed_service_account),
            )
            .attribute(
                "default_catalog_visibility",
                string_value(spec.default_catalog_visibility.as_deref()),
            )
            .attribute(
                "topic_policy_ref",
                string_set_value(&spec.topic_policy_ref, EmptyAs::Null)?,
            )
            .attribute("policy_ref", string_set_value(&spec.policy_ref, EmptyAs::Null)?)
            .attribute("resources", resources);
        let spec = build_object(builder, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("application", Dynamic::string(&model.metadata.application))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance() -> ApplicationInstanceResource {
        Manifest::new(
            ApplicationInstanceMetadata {
                name: "clickstream-dev".to_string(),
                application: "clickstream".to_string(),
            },
            ApplicationInstanceSpec {
                cluster: "dev".to_string(),
                topic_policy_ref: vec!["generic-policy".to_string()],
                application_managed_service_account: Some(false),
                service_account: Some("sa-clickstream-dev".to_string()),
                resources: vec![
                    InstanceResource {
                        resource_type: "TOPIC".to_string(),
                        connect_cluster: None,
                        name: "click.".to_string(),
                        pattern_type: "PREFIXED".to_string(),
                        ownership_mode: None,
                    },
                    InstanceResource {
                        resource_type: "CONNECTOR".to_string(),
                        connect_cluster: Some("connect".to_string()),
                        name: "click.".to_string(),
                        pattern_type: "PREFIXED".to_string(),
                        ownership_mode: Some("LIMITED".to_string()),
                    },
                ],
                default_catalog_visibility: Some("PUBLIC".to_string()),
                policy_ref: vec![],
            },
        )
    }

    #[test]
    fn round_trips_through_terraform() {
        let value = ApplicationInstanceMapper::internal_model_to_terraform(&instance()).unwrap();
        let spec = value.attribute("spec").unwrap();
        assert_eq!(spec.attribute("policy_ref").unwrap(), &Dynamic::Null);
        assert_eq!(
            spec.attribute("application_managed_service_account").unwrap(),
            &Dynamic::Bool(false)
        );
        assert_eq!(ApplicationInstanceMapper::tf_to_internal_model(&value).unwrap(), instance());
    }

    #[test]
    fn wire_document_omits_empty_refs() {
        let resource = instance().to_client_resource().unwrap();
        let document: serde_json::Value = serde_json::from_slice(&resource.json).unwrap();
        assert_eq!(document["spec"]["topicPolicyRef"], json!(["generic-policy"]));
        assert!(document["spec"].get("policyRef").is_none());
        assert_eq!(document["spec"]["resources"][1]["type"], json!("CONNECTOR"));
        assert_eq!(document["metadata"]["application"], json!("clickstream"));
    }
}
