use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, number_value, optional_object, read_block, read_bool, read_i64, read_nested,
    read_required_string, read_string, read_string_map, string_map_value, string_value, EmptyAs,
    ResourceMapper,
};
use crate::model::console::connector::{
    AutoRestart, ConnectorMetadata, ConnectorResource, ConnectorSpec,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct ConnectorMapper;

fn auto_restart_type() -> AttributeType {
    AttributeType::object([
        ("enabled", AttributeType::Bool),
        ("frequency_seconds", AttributeType::Number),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([("config", AttributeType::map(AttributeType::String))])
}

fn read_auto_restart(obj: &Dynamic) -> Result<AutoRestart> {
    Ok(AutoRestart {
        enabled: read_bool(obj, "enabled")?.unwrap_or_default(),
        frequency_seconds: read_i64(obj, "frequency_seconds")?,
    })
}

fn write_auto_restart(auto_restart: &AutoRestart) -> Result<Dynamic> {
    let builder = ObjectBuilder::new()
        .attribute("enabled", Dynamic::Bool(auto_restart.enabled))
        .attribute("frequency_seconds", number_value(auto_restart.frequency_seconds));
    build_object(builder, &auto_restart_type())
}

impl ResourceMapper for ConnectorMapper {
    const TYPE_NAME: &'static str = "conduktor_console_connector_v2";

    type Metadata = ConnectorMetadata;
    type Spec = ConnectorSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("cluster", AttributeType::String),
            ("connect_cluster", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("description", AttributeType::String),
            ("auto_restart", auto_restart_type()),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<ConnectorResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to connector");
        let metadata = ConnectorMetadata {
            name: read_required_string(value, "name")?,
            cluster: read_required_string(value, "cluster")?,
            connect_cluster: read_required_string(value, "connect_cluster")?,
            labels: read_string_map(value, "labels")?,
            auto_restart: read_nested(value, "auto_restart", read_auto_restart)?,
            description: read_string(value, "description")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(ConnectorSpec {
                config: read_string_map(spec, "config")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &ConnectorResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping connector to terraform value"
        );
        let metadata = &model.metadata;
        let spec = ObjectBuilder::new().attribute(
            "config",
            string_map_value(&model.spec.config, EmptyAs::Empty)?,
        );
        let spec = build_object(spec, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&metadata.name))
            .attribute("cluster", Dynamic::string(&metadata.cluster))
            .attribute("connect_cluster", Dynamic::string(&metadata.connect_cluster))
            .attribute("labels", string_map_value(&metadata.labels, EmptyAs::Null)?)
            .attribute("description", string_value(metadata.description.as_deref()))
            .attribute(
                "auto_restart",
                optional_object(
                    metadata.auto_restart.as_ref(),
                    "auto_restart",
                    write_auto_restart,
                )?,
            )
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
