use crate::error::{Direction, Error, Result, ResultExt};
use crate::mapper::{
    build_object, flat_object, object_set_value, read_block, read_objects, read_required_string,
    read_string, read_string_map, read_strings, read_union_tag, string_map_value,
    string_set_value, string_value, write_objects, EmptyAs, ResourceMapper,
};
use crate::model::console::service_account::{
    AivenAcl, Authorization, KafkaAcl, ServiceAccountMetadata, ServiceAccountResource,
    ServiceAccountSpec,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::IntoTerraform;

pub struct ServiceAccountMapper;

const KAFKA_ACL: &str = "KAFKA_ACL";
const AIVEN_ACL: &str = "AIVEN_ACL";

/// One ACL type covering both Kafka and Aiven entries
fn acl_type() -> AttributeType {
    AttributeType::object([
        ("type", AttributeType::String),
        ("resource_type", AttributeType::String),
        ("name", AttributeType::String),
        ("pattern_type", AttributeType::String),
        ("connection_type", AttributeType::String),
        ("operations", AttributeType::set(AttributeType::String)),
        ("host", AttributeType::String),
        ("permission", AttributeType::String),
    ])
}

fn authorization_type() -> AttributeType {
    AttributeType::object([
        ("type", AttributeType::String),
        ("acls", AttributeType::set(acl_type())),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([("authorization", authorization_type())])
}

fn read_kafka_acl(obj: &Dynamic) -> Result<KafkaAcl> {
    Ok(KafkaAcl {
        resource_type: read_required_string(obj, "type")?,
        name: read_required_string(obj, "name")?,
        pattern_type: read_required_string(obj, "pattern_type")?,
        connection_type: read_string(obj, "connection_type")?,
        operations: read_strings(obj, "operations")?,
        host: read_string(obj, "host")?,
        permission: read_string(obj, "permission")?,
    })
}

fn read_aiven_acl(obj: &Dynamic) -> Result<AivenAcl> {
    Ok(AivenAcl {
        resource_type: read_required_string(obj, "resource_type")?,
        name: read_required_string(obj, "name")?,
        permission: read_required_string(obj, "permission")?,
    })
}

fn write_kafka_acl(acl: &KafkaAcl) -> Result<Dynamic> {
    let ty = acl_type();
    let builder = flat_object(&ty)
        .attribute("type", Dynamic::string(&acl.resource_type))
        .attribute("name", Dynamic::string(&acl.name))
        .attribute("pattern_type", Dynamic::string(&acl.pattern_type))
        .attribute("connection_type", string_value(acl.connection_type.as_deref()))
        .attribute("operations", string_set_value(&acl.operations, EmptyAs::Empty)?)
        .attribute("host", string_value(acl.host.as_deref()))
        .attribute("permission", string_value(acl.permission.as_deref()));
    build_object(builder, &ty)
}

fn write_aiven_acl(acl: &AivenAcl) -> Result<Dynamic> {
    let ty = acl_type();
    let builder = flat_object(&ty)
        .attribute("resource_type", Dynamic::string(&acl.resource_type))
        .attribute("name", Dynamic::string(&acl.name))
        .attribute("permission", Dynamic::string(&acl.permission));
    build_object(builder, &ty)
}

fn read_authorization(obj: &Dynamic) -> Result<Authorization> {
    const UNION: &str = "authorization";
    let tag = read_union_tag(obj, UNION)?;
    match tag.as_str() {
        KAFKA_ACL => Ok(Authorization::Kafka {
            acls: read_objects(obj, "acls", read_kafka_acl)?,
        }),
        AIVEN_ACL => Ok(Authorization::Aiven {
            acls: read_objects(obj, "acls", read_aiven_acl)?,
        }),
        _ => Err(Error::UnknownVariant {
            union: UNION,
            value: tag,
        }),
    }
}

fn write_authorization(authorization: &Authorization) -> Result<Dynamic> {
    let (tag, acls) = match authorization {
        Authorization::Kafka { acls } => (KAFKA_ACL, write_objects(acls, write_kafka_acl)),
        Authorization::Aiven { acls } => (AIVEN_ACL, write_objects(acls, write_aiven_acl)),
    };
    let acls = acls
        .and_then(|items| object_set_value(&acl_type(), items, EmptyAs::Empty))
        .at(IntoTerraform, "acls")?;
    let builder = ObjectBuilder::new()
        .attribute("type", Dynamic::string(tag))
        .attribute("acls", acls);
    build_object(builder, &authorization_type())
}

impl ResourceMapper for ServiceAccountMapper {
    const TYPE_NAME: &'static str = "conduktor_console_service_account_v1";

    type Metadata = ServiceAccountMetadata;
    type Spec = ServiceAccountSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("cluster", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<ServiceAccountResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to service account");
        let metadata = ServiceAccountMetadata {
            name: read_required_string(value, "name")?,
            cluster: read_required_string(value, "cluster")?,
            labels: read_string_map(value, "labels")?,
        };
        let spec = read_block(value, "spec", |spec| {
            let authorization = read_block(spec, "authorization", read_authorization)?;
            Ok(ServiceAccountSpec { authorization })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &ServiceAccountResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping service account to terraform value"
        );
        let authorization = write_authorization(&model.spec.authorization)
            .at(IntoTerraform, "spec.authorization")?;
        let spec = build_object(
            ObjectBuilder::new().attribute("authorization", authorization),
            &spec_type(),
        )
        .at(IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("cluster", Dynamic::string(&model.metadata.cluster))
            .attribute("labels", string_map_value(&model.metadata.labels, EmptyAs::Null)?)
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn kafka_account() -> ServiceAccountResource {
        Manifest::new(
            ServiceAccountMetadata {
                name: "sa-clicks".to_string(),
                cluster: "prod".to_string(),
                labels: BTreeMap::new(),
            },
            ServiceAccountSpec {
                authorization: Authorization::Kafka {
                    acls: vec![KafkaAcl {
                        resource_type: "TOPIC".to_string(),
                        name: "click.".to_string(),
                        pattern_type: "PREFIXED".to_string(),
                        connection_type: None,
                        operations: vec!["Read".to_string(), "Describe".to_string()],
                        host: Some("*".to_string()),
                        permission: Some("Allow".to_string()),
                    }],
                },
            },
        )
    }

    #[test]
    fn kafka_acls_round_trip() {
        let value = ServiceAccountMapper::internal_model_to_terraform(&kafka_account()).unwrap();
        let authorization = value.attribute("spec").unwrap().attribute("authorization").unwrap();
        assert_eq!(authorization.attribute("type").unwrap(), &Dynamic::string("KAFKA_ACL"));
        assert_eq!(ServiceAccountMapper::tf_to_internal_model(&value).unwrap(), kafka_account());
    }

    #[test]
    fn aiven_acls_round_trip() {
        let mut model = kafka_account();
        model.spec.authorization = Authorization::Aiven {
            acls: vec![AivenAcl {
                resource_type: "TOPIC".to_string(),
                name: "click-events".to_string(),
                permission: "read".to_string(),
            }],
        };
        let value = ServiceAccountMapper::internal_model_to_terraform(&model).unwrap();
        assert_eq!(ServiceAccountMapper::tf_to_internal_model(&value).unwrap(), model);

        let document: serde_json::Value =
            serde_json::from_slice(&model.to_client_resource().unwrap().json).unwrap();
        assert_eq!(
            document["spec"]["authorization"],
            json!({
                "type": "AIVEN_ACL",
                "acls": [{"resourceType": "TOPIC", "name": "click-events", "permission": "read"}]
            })
        );
    }

    #[test]
    fn kafka_acl_wire_format() {
        let document: serde_json::Value =
            serde_json::from_slice(&kafka_account().to_client_resource().unwrap().json).unwrap();
        assert_eq!(
            document["spec"]["authorization"]["acls"][0],
            json!({
                "type": "TOPIC",
                "name": "click.",
                "patternType": "PREFIXED",
                "operations": ["Read", "Describe"],
                "host": "*",
                "permission": "Allow"
            })
        );
    }

    #[test]
    fn missing_authorization_is_empty_union() {
        let value = Dynamic::Object(
            [
                ("name".to_string(), Dynamic::string("sa")),
                ("cluster".to_string(), Dynamic::string("prod")),
            ]
            .into(),
        );
        let err = ServiceAccountMapper::tf_to_internal_model(&value).unwrap_err();
        assert_eq!(err.path(), Some("spec.authorization"));
        assert!(matches!(err.root_cause(), Error::EmptyUnion { union: "authorization" }));
    }
}
