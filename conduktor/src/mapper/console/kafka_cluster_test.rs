use super::*;
use crate::model::security::{BasicAuth, GlueCredentials, GlueSecurity, ConfluentLikeSecurity};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

fn cluster() -> KafkaClusterResource {
    Manifest::new(
        KafkaClusterMetadata {
            name: "prod".to_string(),
            labels: BTreeMap::from([("env".to_string(), "prod".to_string())]),
        },
        KafkaClusterSpec {
            display_name: "Production".to_string(),
            bootstrap_servers: "broker-1:9092,broker-2:9092".to_string(),
            properties: BTreeMap::from([(
                "sasl.mechanism".to_string(),
                "PLAIN".to_string(),
            )]),
            color: Some("#FF0000".to_string()),
            icon: None,
            ignore_untrusted_certificate: Some(false),
            kafka_flavor: Some(KafkaFlavor::Confluent(ConfluentFlavor {
                key: "key".to_string(),
                secret: "secret".to_string(),
                confluent_environment_id: "env-123".to_string(),
                confluent_cluster_id: "lkc-456".to_string(),
            })),
            schema_registry: Some(SchemaRegistry::ConfluentLike(ConfluentLikeRegistry {
                url: "https://registry:8081".to_string(),
                properties: None,
                ignore_untrusted_certificate: None,
                security: ConfluentLikeSecurity::BasicAuth(BasicAuth {
                    username: "registry".to_string(),
                    password: "hunter2".to_string(),
                }),
            })),
        },
    )
}

fn set_attribute(value: &mut Dynamic, path: &[&str], new_value: Dynamic) {
    let mut current = value;
    for step in &path[..path.len() - 1] {
        current = match current {
            Dynamic::Object(attrs) => attrs.get_mut(*step).unwrap(),
            other => panic!("not an object: {:?}", other),
        };
    }
    match current {
        Dynamic::Object(attrs) => {
            attrs.insert(path[path.len() - 1].to_string(), new_value);
        }
        other => panic!("not an object: {:?}", other),
    }
}

#[test]
fn round_trips_through_terraform() {
    let value = KafkaClusterMapper::internal_model_to_terraform(&cluster()).unwrap();
    let back = KafkaClusterMapper::tf_to_internal_model(&value).unwrap();
    assert_eq!(back, cluster());
    assert_eq!(KafkaClusterMapper::internal_model_to_terraform(&back).unwrap(), value);
}

#[test]
fn flavor_block_is_flat() {
    let value = KafkaClusterMapper::internal_model_to_terraform(&cluster()).unwrap();
    let flavor = value.attribute("spec").unwrap().attribute("kafka_flavor").unwrap();
    assert_eq!(flavor.attribute("type").unwrap(), &Dynamic::string("Confluent"));
    assert_eq!(flavor.attribute("confluent_cluster_id").unwrap(), &Dynamic::string("lkc-456"));
    assert_eq!(flavor.attribute("api_token").unwrap(), &Dynamic::Null);
    assert_eq!(flavor.attribute("ignore_untrusted_certificate").unwrap(), &Dynamic::Null);
}

#[test]
fn wire_document_is_tagged() {
    let document: serde_json::Value =
        serde_json::from_slice(&cluster().to_client_resource().unwrap().json).unwrap();
    assert_eq!(
        document["spec"]["kafkaFlavor"],
        json!({
            "type": "Confluent",
            "key": "key",
            "secret": "secret",
            "confluentEnvironmentId": "env-123",
            "confluentClusterId": "lkc-456"
        })
    );
    assert_eq!(document["spec"]["schemaRegistry"]["type"], json!("ConfluentLike"));
    assert_eq!(document["spec"]["schemaRegistry"]["security"]["type"], json!("BasicAuth"));
    assert_eq!(document["metadata"]["labels"], json!({"env": "prod"}));
}

#[test]
fn empty_maps_become_null() {
    let mut model = cluster();
    model.metadata.labels.clear();
    model.spec.properties.clear();
    let value = KafkaClusterMapper::internal_model_to_terraform(&model).unwrap();
    assert_eq!(value.attribute("labels").unwrap(), &Dynamic::Null);
    assert_eq!(
        value.attribute("spec").unwrap().attribute("properties").unwrap(),
        &Dynamic::Null
    );
}

#[test]
fn glue_registry_round_trips() {
    let mut model = cluster();
    model.spec.kafka_flavor = None;
    model.spec.schema_registry = Some(SchemaRegistry::Glue(GlueRegistry {
        region: "eu-west-1".to_string(),
        registry_name: Some("default".to_string()),
        security: GlueSecurity::Credentials(GlueCredentials {
            access_key_id: "AKIA".to_string(),
            secret_key: "secret".to_string(),
        }),
    }));
    let value = KafkaClusterMapper::internal_model_to_terraform(&model).unwrap();
    assert_eq!(
        value.attribute("spec").unwrap().attribute("kafka_flavor").unwrap(),
        &Dynamic::Null
    );
    assert_eq!(KafkaClusterMapper::tf_to_internal_model(&value).unwrap(), model);
}

#[test]
fn flavor_without_type_is_rejected() {
    let mut value = KafkaClusterMapper::internal_model_to_terraform(&cluster()).unwrap();
    set_attribute(&mut value, &["spec", "kafka_flavor", "type"], Dynamic::Null);

    let err = KafkaClusterMapper::tf_to_internal_model(&value).unwrap_err();
    assert_eq!(err.path(), Some("spec.kafka_flavor"));
    assert!(matches!(err.root_cause(), Error::EmptyUnion { union: "kafka flavor" }));
}

#[test]
fn unknown_registry_type_is_rejected() {
    let mut value = KafkaClusterMapper::internal_model_to_terraform(&cluster()).unwrap();
    set_attribute(
        &mut value,
        &["spec", "schema_registry", "type"],
        Dynamic::string("Karapace"),
    );

    let err = KafkaClusterMapper::tf_to_internal_model(&value).unwrap_err();
    assert_eq!(err.path(), Some("spec.schema_registry"));
    assert_eq!(
        err.root_cause().to_string(),
        "unknown schema registry type \"Karapace\""
    );
}

#[test]
fn invalid_security_type_reports_nested_path() {
    let mut value = KafkaClusterMapper::internal_model_to_terraform(&cluster()).unwrap();
    set_attribute(
        &mut value,
        &["spec", "schema_registry", "security", "type"],
        Dynamic::string("Kerberos"),
    );

    let err = KafkaClusterMapper::tf_to_internal_model(&value).unwrap_err();
    assert_eq!(err.path(), Some("spec.schema_registry.security"));
}

#[test]
fn wrong_label_type_is_structural_error() {
    let mut value = KafkaClusterMapper::internal_model_to_terraform(&cluster()).unwrap();
    set_attribute(
        &mut value,
        &["labels"],
        Dynamic::Map(HashMap::from([("env".to_string(), Dynamic::Number(1.0))])),
    );

    let err = KafkaClusterMapper::tf_to_internal_model(&value).unwrap_err();
    assert_eq!(err.path(), Some("labels[\"env\"]"));
}
