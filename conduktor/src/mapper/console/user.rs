use super::permission::{permission_type, read_permission, write_permission};
use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, object_set_value, read_block, read_objects, read_required_string, read_string,
    string_value, write_objects, EmptyAs, ResourceMapper,
};
use crate::model::console::user::{UserMetadata, UserResource, UserSpec};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct UserMapper;

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("firstname", AttributeType::String),
        ("lastname", AttributeType::String),
        ("permissions", AttributeType::set(permission_type())),
    ])
}

impl ResourceMapper for UserMapper {
    const TYPE_NAME: &'static str = "conduktor_console_user_v2";

    type Metadata = UserMetadata;
    type Spec = UserSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([("name", AttributeType::String), ("spec", spec_type())])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<UserResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to user");
        let metadata = UserMetadata {
            name: read_required_string(value, "name")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(UserSpec {
                first_name: read_string(spec, "firstname")?,
                last_name: read_string(spec, "lastname")?,
                permissions: read_objects(spec, "permissions", read_permission)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &UserResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping user to terraform value"
        );
        let permissions = write_objects(&model.spec.permissions, write_permission)
            .and_then(|items| object_set_value(&permission_type(), items, EmptyAs::Empty))
            .at(Direction::IntoTerraform, "spec.permissions")?;
        let spec = ObjectBuilder::new()
            .attribute("firstname", string_value(model.spec.first_name.as_deref()))
            .attribute("lastname", string_value(model.spec.last_name.as_deref()))
            .attribute("permissions", permissions);
        let spec = build_object(spec, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
