use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, read_block, read_required_string, read_string, string_value, ResourceMapper,
};
use crate::model::console::application::{ApplicationMetadata, ApplicationResource, ApplicationSpec};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct ApplicationMapper;

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("title", AttributeType::String),
        ("description", AttributeType::String),
        ("owner", AttributeType::String),
    ])
}

impl ResourceMapper for ApplicationMapper {
    const TYPE_NAME: &'static str = "conduktor_console_application_v1";

    type Metadata = ApplicationMetadata;
    type Spec = ApplicationSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([("name", AttributeType::String), ("spec", spec_type())])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<ApplicationResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to application");
        let metadata = ApplicationMetadata {
            name: read_required_string(value, "name")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(ApplicationSpec {
                title: read_required_string(spec, "title")?,
                description: read_string(spec, "description")?,
                owner: read_required_string(spec, "owner")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &ApplicationResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping application to terraform value"
        );
        let spec = ObjectBuilder::new()
            .attribute("title", Dynamic::string(&model.spec.title))
            .attribute("description", string_value(model.spec.description.as_deref()))
            .attribute("owner", Dynamic::string(&model.spec.owner));
        let spec = build_object(spec, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
