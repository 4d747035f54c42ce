use super::security::{connect_security_type, read_connect_security, write_connect_security};
use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    bool_value, build_object, optional_object, read_block, read_bool, read_nested,
    read_required_string, read_string_map, string_map_value, EmptyAs, ResourceMapper,
};
use crate::model::console::kafka_connect::{
    KafkaConnectMetadata, KafkaConnectResource, KafkaConnectSpec,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct KafkaConnectMapper;

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("display_name", AttributeType::String),
        ("urls", AttributeType::String),
        ("headers", AttributeType::map(AttributeType::String)),
        ("ignore_untrusted_certificate", AttributeType::Bool),
        ("security", connect_security_type()),
    ])
}

impl ResourceMapper for KafkaConnectMapper {
    const TYPE_NAME: &'static str = "conduktor_console_kafka_connect_v2";

    type Metadata = KafkaConnectMetadata;
    type Spec = KafkaConnectSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("cluster", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<KafkaConnectResource> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            "mapping terraform value to kafka connect cluster"
        );
        let metadata = KafkaConnectMetadata {
            name: read_required_string(value, "name")?,
            cluster: read_required_string(value, "cluster")?,
            labels: read_string_map(value, "labels")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(KafkaConnectSpec {
                display_name: read_required_string(spec, "display_name")?,
                urls: read_required_string(spec, "urls")?,
                headers: read_string_map(spec, "headers")?,
                ignore_untrusted_certificate: read_bool(spec, "ignore_untrusted_certificate")?,
                security: read_nested(spec, "security", read_connect_security)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &KafkaConnectResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping kafka connect cluster to terraform value"
        );
        let spec = &model.spec;
        let builder = ObjectBuilder::new()
            .attribute("display_name", Dynamic::string(&spec.display_name))
            .attribute("urls", Dynamic::string(&spec.urls))
            .attribute("headers", string_map_value(&spec.headers, EmptyAs::Null)?)
            .attribute(
                "ignore_untrusted_certificate",
                bool_value(spec.ignore_untrusted_certificate),
            )
            .attribute(
                "security",
                optional_object(spec.security.as_ref(), "spec.security", write_connect_security)?,
            );
        let spec = build_object(builder, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("cluster", Dynamic::string(&model.metadata.cluster))
            .attribute("labels", string_map_value(&model.metadata.labels, EmptyAs::Null)?)
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
