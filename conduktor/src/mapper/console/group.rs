use super::permission::{permission_type, read_permission, write_permission};
use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, object_set_value, read_block, read_objects, read_required_string, read_string,
    read_strings, string_set_value, string_value, write_objects, EmptyAs, ResourceMapper,
};
use crate::model::console::group::{GroupMetadata, GroupResource, GroupSpec};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct GroupMapper;

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("display_name", AttributeType::String),
        ("description", AttributeType::String),
        ("external_groups", AttributeType::set(AttributeType::String)),
        ("members", AttributeType::set(AttributeType::String)),
        (
            "members_from_external_groups",
            AttributeType::set(AttributeType::String),
        ),
        ("permissions", AttributeType::set(permission_type())),
    ])
}

impl ResourceMapper for GroupMapper {
    const TYPE_NAME: &'static str = "conduktor_console_group_v2";

    type Metadata = GroupMetadata;
    type Spec = GroupSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([("name", AttributeType::String), ("spec", spec_type())])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<GroupResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to group");
        let metadata = GroupMetadata {
            name: read_required_string(value, "name")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(GroupSpec {
                display_name: read_required_string(spec, "display_name")?,
                description: read_string(spec, "description")?,
                external_groups: read_strings(spec, "external_groups")?,
                members: read_strings(spec, "members")?,
                // computed by Console, an unknown plan value reads as empty
                members_from_external_groups: read_strings(spec, "members_from_external_groups")?,
                permissions: read_objects(spec, "permissions", read_permission)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &GroupResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping group to terraform value"
        );
        let spec = &model.spec;
        let permissions = write_objects(&spec.permissions, write_permission)
            .and_then(|items| object_set_value(&permission_type(), items, EmptyAs::Empty))
            .at(Direction::IntoTerraform, "spec.permissions")?;
        let builder = ObjectBuilder::new()
            .attribute("display_name", Dynamic::string(&spec.display_name))
            .attribute("description", string_value(spec.description.as_deref()))
            .attribute(
                "external_groups",
                string_set_value(&spec.external_groups, EmptyAs::Empty)?,
            )
            .attribute("members", string_set_value(&spec.members, EmptyAs::Empty)?)
            .attribute(
                "members_from_external_groups",
                string_set_value(&spec.members_from_external_groups, EmptyAs::Empty)?,
            )
            .attribute("permissions", permissions);
        let spec = build_object(builder, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::console::permission::Permission;

    fn group() -> GroupResource {
        Manifest::new(
            GroupMetadata {
                name: "team-a".to_string(),
            },
            GroupSpec {
                display_name: "Team A".to_string(),
                description: Some("Owners of the orders domain".to_string()),
                external_groups: vec!["LDAP-TEAM-A".to_string()],
                members: vec!["alice@example.com".to_string(), "bob@example.com".to_string()],
                members_from_external_groups: vec![],
                permissions: vec![Permission {
                    resource_type: "PLATFORM".to_string(),
                    name: None,
                    cluster: None,
                    kafka_connect: None,
                    ksqldb: None,
                    pattern_type: None,
                    permissions: vec!["userView".to_string()],
                }],
            },
        )
    }

    #[test]
    fn round_trips_through_terraform() {
        let value = GroupMapper::internal_model_to_terraform(&group()).unwrap();
        let back = GroupMapper::tf_to_internal_model(&value).unwrap();
        assert_eq!(back, group());
    }

    #[test]
    fn set_order_does_not_matter() {
        let mut reordered = group();
        reordered.spec.members.reverse();
        assert_eq!(
            GroupMapper::internal_model_to_terraform(&reordered).unwrap(),
            GroupMapper::internal_model_to_terraform(&group()).unwrap()
        );
    }

    #[test]
    fn unknown_computed_members_read_as_empty() {
        let mut value = GroupMapper::internal_model_to_terraform(&group()).unwrap();
        if let Dynamic::Object(attrs) = &mut value {
            if let Some(Dynamic::Object(spec)) = attrs.get_mut("spec") {
                spec.insert("members_from_external_groups".to_string(), Dynamic::Unknown);
            }
        }
        let model = GroupMapper::tf_to_internal_model(&value).unwrap();
        assert!(model.spec.members_from_external_groups.is_empty());
    }

    #[test]
    fn empty_collections_become_empty_sets() {
        let mut model = group();
        model.spec.external_groups.clear();
        model.spec.members.clear();
        let value = GroupMapper::internal_model_to_terraform(&model).unwrap();
        let spec = value.attribute("spec").unwrap();
        assert_eq!(spec.attribute("members").unwrap(), &Dynamic::Set(vec![]));
        assert_eq!(spec.attribute("external_groups").unwrap(), &Dynamic::Set(vec![]));
    }
}
