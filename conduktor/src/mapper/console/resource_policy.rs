use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, object_list_value, read_block, read_objects, read_required_string,
    read_string, read_string_map, string_map_value, string_value, write_objects, EmptyAs,
    ResourceMapper,
};
use crate::model::console::resource_policy::{
    PolicyRule, ResourcePolicyMetadata, ResourcePolicyResource, ResourcePolicySpec,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct ResourcePolicyMapper;

fn rule_type() -> AttributeType {
    AttributeType::object([
        ("condition", AttributeType::String),
        ("error_message", AttributeType::String),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("target_kind", AttributeType::String),
        ("description", AttributeType::String),
        ("rules", AttributeType::list(rule_type())),
    ])
}

impl ResourceMapper for ResourcePolicyMapper {
    const TYPE_NAME: &'static str = "conduktor_console_resource_policy_v1";

    type Metadata = ResourcePolicyMetadata;
    type Spec = ResourcePolicySpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<ResourcePolicyResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to resource policy");
        let metadata = ResourcePolicyMetadata {
            name: read_required_string(value, "name")?,
            labels: read_string_map(value, "labels")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(ResourcePolicySpec {
                target_kind: read_required_string(spec, "target_kind")?,
                description: read_string(spec, "description")?,
                rules: read_objects(spec, "rules", |rule| {
                    Ok(PolicyRule {
                        condition: read_required_string(rule, "condition")?,
                        error_message: read_required_string(rule, "error_message")?,
                    })
                })?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &ResourcePolicyResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping resource policy to terraform value"
        );
        let spec = &model.spec;
        let rules = write_objects(&spec.rules, |rule| {
            let builder = ObjectBuilder::new()
                .attribute("condition", Dynamic::string(&rule.condition))
                .attribute("error_message", Dynamic::string(&rule.error_message));
            build_object(builder, &rule_type())
        })
        .and_then(|items| object_list_value(&rule_type(), items, EmptyAs::Empty))
        .at(Direction::IntoTerraform, "spec.rules")?;
        let builder = ObjectBuilder::new()
            .attribute("target_kind", Dynamic::string(&spec.target_kind))
            .attribute("description", string_value(spec.description.as_deref()))
            .attribute("rules", rules);
        let spec = build_object(builder, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("labels", string_map_value(&model.metadata.labels, EmptyAs::Null)?)
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn rules_keep_their_order() {
        let model = Manifest::new(
            ResourcePolicyMetadata {
                name: "topic-naming".to_string(),
                labels: BTreeMap::new(),
            },
            ResourcePolicySpec {
                target_kind: "Topic".to_string(),
                description: None,
                rules: vec![
                    PolicyRule {
                        condition: "spec.replicationFactor == 3".to_string(),
                        error_message: "replication factor must be 3".to_string(),
                    },
                    PolicyRule {
                        condition: "metadata.name.matches(\"^[a-z.-]+$\")".to_string(),
                        error_message: "invalid topic name".to_string(),
                    },
                ],
            },
        );
        let value = ResourcePolicyMapper::internal_model_to_terraform(&model).unwrap();
        let rules = value.attribute("spec").unwrap().attribute("rules").unwrap();
        assert!(matches!(rules, Dynamic::List(items) if items.len() == 2));
        assert_eq!(ResourcePolicyMapper::tf_to_internal_model(&value).unwrap(), model);
    }
}
