use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, object_set_value, read_block, read_objects, read_required_string, read_string,
    read_strings, string_set_value, string_value, write_objects, EmptyAs, ResourceMapper,
};
use crate::model::console::application_group::{
    ApplicationGroupMetadata, ApplicationGroupPermission, ApplicationGroupResource,
    ApplicationGroupSpec,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct ApplicationGroupMapper;

fn permission_type() -> AttributeType {
    AttributeType::object([
        ("app_instance", AttributeType::String),
        ("resource_type", AttributeType::String),
        ("pattern_type", AttributeType::String),
        ("name", AttributeType::String),
        ("connect_cluster", AttributeType::String),
        ("permissions", AttributeType::set(AttributeType::String)),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("display_name", AttributeType::String),
        ("description", AttributeType::String),
        ("permissions", AttributeType::set(permission_type())),
        ("members", AttributeType::set(AttributeType::String)),
        ("external_groups", AttributeType::set(AttributeType::String)),
    ])
}

fn read_permission(obj: &Dynamic) -> Result<ApplicationGroupPermission> {
    Ok(ApplicationGroupPermission {
        app_instance: read_required_string(obj, "app_instance")?,
        resource_type: read_required_string(obj, "resource_type")?,
        pattern_type: read_string(obj, "pattern_type")?,
        name: read_string(obj, "name")?,
        connect_cluster: read_string(obj, "connect_cluster")?,
        permissions: read_strings(obj, "permissions")?,
    })
}

fn write_permission(permission: &ApplicationGroupPermission) -> Result<Dynamic> {
    let builder = ObjectBuilder::new()
        .attribute("app_instance", Dynamic::string(&permission.app_instance))
        .attribute("resource_type", Dynamic::string(&permission.resource_type))
        .attribute("pattern_type", string_value(permission.pattern_type.as_deref()))
        .attribute("name", string_value(permission.name.as_deref()))
        .attribute("connect_cluster", string_value(permission.connect_cluster.as_deref()))
        .attribute(
            "permissions",
            string_set_value(&permission.permissions, EmptyAs::Empty)?,
        );
    build_object(builder, &permission_type())
}

impl ResourceMapper for ApplicationGroupMapper {
    const TYPE_NAME: &'static str = "conduktor_console_application_group_v1";

    type Metadata = ApplicationGroupMetadata;
    type Spec = ApplicationGroupSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("application", AttributeType::String),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<ApplicationGroupResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to application group");
        let metadata = ApplicationGroupMetadata {
            name: read_required_string(value, "name")?,
            application: read_required_string(value, "application")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(ApplicationGroupSpec {
                display_name: read_required_string(spec, "display_name")?,
                description: read_string(spec, "description")?,
                permissions: read_objects(spec, "permissions", read_permission)?,
                members: read_strings(spec, "members")?,
                external_groups: read_strings(spec, "external_groups")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &ApplicationGroupResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping application group to terraform value"
        );
        let spec = &model.spec;
        let permissions = write_objects(&spec.permissions, write_permission)
            .and_then(|items| object_set_value(&permission_type(), items, EmptyAs::Empty))
            .at(Direction::IntoTerraform, "spec.permissions")?;
        let builder = ObjectBuilder::new()
            .attribute("display_name", Dynamic::string(&spec.display_name))
            .attribute("description", string_value(spec.description.as_deref()))
            .attribute("permissions", permissions)
            .attribute("members", string_set_value(&spec.members, EmptyAs::Null)?)
            .attribute(
                "external_groups",
                string_set_value(&spec.external_groups, EmptyAs::Null)?,
            );
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

    fn support_group() -> ApplicationGroupResource {
        Manifest::new(
            ApplicationGroupMetadata {
                name: "support".to_string(),
                application: "clickstream".to_string(),
            },
            ApplicationGroupSpec {
                display_name: "Support".to_string(),
                description: None,
                permissions: vec![ApplicationGroupPermission {
                    app_instance: "clickstream-dev".to_string(),
                    resource_type: "TOPIC".to_string(),
                    pattern_type: Some("LITERAL".to_string()),
                    name: Some("*".to_string()),
                    connect_cluster: None,
                    permissions: vec!["topicViewConfig".to_string(), "topicConsume".to_string()],
                }],
                members: vec![],
                external_groups: vec!["COMPANY-SUPPORT".to_string()],
            },
        )
    }

    #[test]
    fn round_trips_through_terraform() {
        let value = ApplicationGroupMapper::internal_model_to_terraform(&support_group()).unwrap();
        let spec = value.attribute("spec").unwrap();
        assert_eq!(spec.attribute("members").unwrap(), &Dynamic::Null);
        assert_eq!(
            spec.attribute("external_groups").unwrap(),
            &Dynamic::Set(vec![Dynamic::string("COMPANY-SUPPORT")])
        );
        let back = ApplicationGroupMapper::tf_to_internal_model(&value).unwrap();
        assert_eq!(back, support_group());
    }

    #[test]
    fn repeated_permissions_collapse_into_one_set_element() {
        let mut model = support_group();
        model.spec.permissions[0]
            .permissions
            .push("topicConsume".to_string());
        let value = ApplicationGroupMapper::internal_model_to_terraform(&model).unwrap();

        let back = ApplicationGroupMapper::tf_to_internal_model(&value).unwrap();
        assert_eq!(back, support_group());
    }

    #[test]
    fn empty_permission_list_is_kept() {
        let mut model = support_group();
        model.spec.permissions.clear();
        let value = ApplicationGroupMapper::internal_model_to_terraform(&model).unwrap();
        assert_eq!(
            value.attribute("spec").unwrap().attribute("permissions").unwrap(),
            &Dynamic::Set(vec![])
        );
    }
}
