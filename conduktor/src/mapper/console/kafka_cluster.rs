use super::security::{
    read_confluent_like_security, read_glue_security, registry_security_type,
    write_confluent_like_security, write_glue_security,
};
use crate::error::{Direction, Error, Result, ResultExt};
use crate::mapper::{
    bool_value, build_object, flat_object, optional_object, read_block, read_bool, read_nested,
    read_object, read_required_string, read_string, read_string_map, read_union_tag,
    string_map_value, string_value, EmptyAs, ResourceMapper,
};
use crate::model::console::kafka_cluster::{
    AivenFlavor, ConfluentFlavor, ConfluentLikeRegistry, GatewayFlavor, GlueRegistry,
    KafkaClusterMetadata, KafkaClusterResource, KafkaClusterSpec, KafkaFlavor, SchemaRegistry,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::{FromTerraform, IntoTerraform};

pub struct KafkaClusterMapper;

const FLAVOR_ATTRIBUTES: [&str; 12] = [
    "type",
    "url",
    "user",
    "password",
    "virtual_cluster",
    "api_token",
    "project",
    "service_name",
    "key",
    "secret",
    "confluent_environment_id",
    "confluent_cluster_id",
];

fn kafka_flavor_type() -> AttributeType {
    let mut attrs: Vec<(&str, AttributeType)> = FLAVOR_ATTRIBUTES
        .iter()
        .map(|name| (*name, AttributeType::String))
        .collect();
    attrs.push(("ignore_untrusted_certificate", AttributeType::Bool));
    AttributeType::object(attrs)
}

fn schema_registry_type() -> AttributeType {
    AttributeType::object([
        ("type", AttributeType::String),
        ("url", AttributeType::String),
        ("ignore_untrusted_certificate", AttributeType::Bool),
        ("properties", AttributeType::String),
        ("region", AttributeType::String),
        ("registry_name", AttributeType::String),
        ("security", registry_security_type()),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("display_name", AttributeType::String),
        ("bootstrap_servers", AttributeType::String),
        ("color", AttributeType::String),
        ("icon", AttributeType::String),
        ("ignore_untrusted_certificate", AttributeType::Bool),
        ("properties", AttributeType::map(AttributeType::String)),
        ("kafka_flavor", kafka_flavor_type()),
        ("schema_registry", schema_registry_type()),
    ])
}

fn read_kafka_flavor(obj: &Dynamic) -> Result<KafkaFlavor> {
    const UNION: &str = "kafka flavor";
    let tag = read_union_tag(obj, UNION)?;
    match tag.as_str() {
        "Aiven" => Ok(KafkaFlavor::Aiven(AivenFlavor {
            api_token: read_required_string(obj, "api_token")?,
            project: read_required_string(obj, "project")?,
            service_name: read_required_string(obj, "service_name")?,
        })),
        "Confluent" => Ok(KafkaFlavor::Confluent(ConfluentFlavor {
            key: read_required_string(obj, "key")?,
            secret: read_required_string(obj, "secret")?,
            confluent_environment_id: read_required_string(obj, "confluent_environment_id")?,
            confluent_cluster_id: read_required_string(obj, "confluent_cluster_id")?,
        })),
        "Gateway" => Ok(KafkaFlavor::Gateway(GatewayFlavor {
            url: read_required_string(obj, "url")?,
            user: read_required_string(obj, "user")?,
            password: read_required_string(obj, "password")?,
            virtual_cluster: read_string(obj, "virtual_cluster")?,
            ignore_untrusted_certificate: read_bool(obj, "ignore_untrusted_certificate")?,
        })),
        _ => Err(Error::UnknownVariant {
            union: UNION,
            value: tag,
        }),
    }
}

fn write_kafka_flavor(flavor: &KafkaFlavor) -> Result<Dynamic> {
    let ty = kafka_flavor_type();
    let builder = flat_object(&ty);
    let builder = match flavor {
        KafkaFlavor::Aiven(aiven) => builder
            .attribute("type", Dynamic::string("Aiven"))
            .attribute("api_token", Dynamic::string(&aiven.api_token))
            .attribute("project", Dynamic::string(&aiven.project))
            .attribute("service_name", Dynamic::string(&aiven.service_name)),
        KafkaFlavor::Confluent(confluent) => builder
            .attribute("type", Dynamic::string("Confluent"))
            .attribute("key", Dynamic::string(&confluent.key))
            .attribute("secret", Dynamic::string(&confluent.secret))
            .attribute(
                "confluent_environment_id",
                Dynamic::string(&confluent.confluent_environment_id),
            )
            .attribute(
                "confluent_cluster_id",
                Dynamic::string(&confluent.confluent_cluster_id),
            ),
        KafkaFlavor::Gateway(gateway) => builder
            .attribute("type", Dynamic::string("Gateway"))
            .attribute("url", Dynamic::string(&gateway.url))
            .attribute("user", Dynamic::string(&gateway.user))
            .attribute("password", Dynamic::string(&gateway.password))
            .attribute("virtual_cluster", string_value(gateway.virtual_cluster.as_deref()))
            .attribute(
                "ignore_untrusted_certificate",
                bool_value(gateway.ignore_untrusted_certificate),
            ),
    };
    build_object(builder, &ty)
}

fn read_schema_registry(obj: &Dynamic) -> Result<SchemaRegistry> {
    const UNION: &str = "schema registry";
    let tag = read_union_tag(obj, UNION)?;
    let security = read_object(obj, "security")?;
    match tag.as_str() {
        "ConfluentLike" => Ok(SchemaRegistry::ConfluentLike(ConfluentLikeRegistry {
            url: read_required_string(obj, "url")?,
            properties: read_string(obj, "properties")?,
            ignore_untrusted_certificate: read_bool(obj, "ignore_untrusted_certificate")?,
            security: read_confluent_like_security(security).at(FromTerraform, "security")?,
        })),
        "Glue" => Ok(SchemaRegistry::Glue(GlueRegistry {
            region: read_required_string(obj, "region")?,
            registry_name: read_string(obj, "registry_name")?,
            security: read_glue_security(security).at(FromTerraform, "security")?,
        })),
        _ => Err(Error::UnknownVariant {
            union: UNION,
            value: tag,
        }),
    }
}

fn write_schema_registry(registry: &SchemaRegistry) -> Result<Dynamic> {
    let ty = schema_registry_type();
    let builder = flat_object(&ty);
    let builder = match registry {
        SchemaRegistry::ConfluentLike(confluent) => builder
            .attribute("type", Dynamic::string("ConfluentLike"))
            .attribute("url", Dynamic::string(&confluent.url))
            .attribute("properties", string_value(confluent.properties.as_deref()))
            .attribute(
                "ignore_untrusted_certificate",
                bool_value(confluent.ignore_untrusted_certificate),
            )
            .attribute(
                "security",
                write_confluent_like_security(&confluent.security).at(IntoTerraform, "security")?,
            ),
        SchemaRegistry::Glue(glue) => builder
            .attribute("type", Dynamic::string("Glue"))
            .attribute("region", Dynamic::string(&glue.region))
            .attribute("registry_name", string_value(glue.registry_name.as_deref()))
            .attribute(
                "security",
                write_glue_security(&glue.security).at(IntoTerraform, "security")?,
            ),
    };
    build_object(builder, &ty)
}

impl ResourceMapper for KafkaClusterMapper {
    const TYPE_NAME: &'static str = "conduktor_console_kafka_cluster_v2";

    type Metadata = KafkaClusterMetadata;
    type Spec = KafkaClusterSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<KafkaClusterResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to kafka cluster");
        let metadata = KafkaClusterMetadata {
            name: read_required_string(value, "name")?,
            labels: read_string_map(value, "labels")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(KafkaClusterSpec {
                display_name: read_required_string(spec, "display_name")?,
                bootstrap_servers: read_required_string(spec, "bootstrap_servers")?,
                properties: read_string_map(spec, "properties")?,
                color: read_string(spec, "color")?,
                icon: read_string(spec, "icon")?,
                ignore_untrusted_certificate: read_bool(spec, "ignore_untrusted_certificate")?,
                kafka_flavor: read_nested(spec, "kafka_flavor", read_kafka_flavor)?,
                schema_registry: read_nested(spec, "schema_registry", read_schema_registry)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &KafkaClusterResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping kafka cluster to terraform value"
        );
        let spec = &model.spec;
        let builder = ObjectBuilder::new()
            .attribute("display_name", Dynamic::string(&spec.display_name))
            .attribute("bootstrap_servers", Dynamic::string(&spec.bootstrap_servers))
            .attribute("color", string_value(spec.color.as_deref()))
            .attribute("icon", string_value(spec.icon.as_deref()))
            .attribute(
                "ignore_untrusted_certificate",
                bool_value(spec.ignore_untrusted_certificate),
            )
            .attribute("properties", string_map_value(&spec.properties, EmptyAs::Null)?)
            .attribute(
                "kafka_flavor",
                optional_object(
                    spec.kafka_flavor.as_ref(),
                    "spec.kafka_flavor",
                    write_kafka_flavor,
                )?,
            )
            .attribute(
                "schema_registry",
                optional_object(
                    spec.schema_registry.as_ref(),
                    "spec.schema_registry",
                    write_schema_registry,
                )?,
            );
        let spec = build_object(builder, &spec_type()).at(IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("labels", string_map_value(&model.metadata.labels, EmptyAs::Null)?)
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
#[path = "./kafka_cluster_test.rs"]
mod kafka_cluster_test;
