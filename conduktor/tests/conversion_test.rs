//! End-to-end conversions through the resource registry

#![allow(clippy::disallowed_methods)] // Allow unwrap() in tests for clarity

use conduktor::{
    client_resource_to_terraform, resource_type, terraform_to_client_resource, Error, Resource,
};
use serde_json::{json, Value};
use tfplug::{AttributePath, Diagnostic, Dynamic, DynamicValue};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn resource(document: &Value) -> Resource {
    Resource::from_json(document.to_string().as_bytes()).unwrap()
}

/// Decode a Terraform value the way it arrives from Terraform core
fn terraform_value(type_name: &str, value: Value) -> Dynamic {
    let ty = resource_type(type_name).unwrap();
    DynamicValue::decode_json(value.to_string().as_bytes(), &ty)
        .unwrap()
        .value
}

/// Client document → Terraform → client document
fn round_trip(type_name: &str, document: Value) -> Value {
    let value = client_resource_to_terraform(type_name, &resource(&document)).unwrap();
    terraform_to_client_resource(type_name, &value)
        .unwrap()
        .document()
        .unwrap()
}

#[test]
fn application_group_with_external_groups() {
    init_tracing();
    let document = json!({
        "apiVersion": "v1",
        "kind": "ApplicationGroup",
        "metadata": {"name": "support", "application": "clickstream"},
        "spec": {
            "displayName": "Support",
            "description": "Support team access",
            "permissions": [{
                "appInstance": "clickstream-dev",
                "resourceType": "TOPIC",
                "patternType": "LITERAL",
                "name": "*",
                "permissions": ["topicViewConfig", "topicConsume"]
            }],
            "externalGroups": ["COMPANY-SUPPORT"]
        }
    });

    let value = client_resource_to_terraform(
        "conduktor_console_application_group_v1",
        &resource(&document),
    )
    .unwrap();
    let spec = value.attribute("spec").unwrap();
    assert_eq!(
        spec.attribute("external_groups").unwrap(),
        &Dynamic::Set(vec![Dynamic::string("COMPANY-SUPPORT")])
    );
    assert_eq!(spec.attribute("members").unwrap(), &Dynamic::Null);

    let back = terraform_to_client_resource("conduktor_console_application_group_v1", &value)
        .unwrap();
    assert_eq!(back.kind, "ApplicationGroup");
    assert_eq!(back.name, "support");
    assert_eq!(back.document().unwrap(), document);
}

#[test]
fn topic_round_trips() {
    let document = json!({
        "apiVersion": "v2",
        "kind": "Topic",
        "metadata": {
            "name": "orders",
            "cluster": "prod",
            "labels": {"domain": "sales"},
            "catalogVisibility": "PUBLIC",
            "sqlStorage": {"retentionTimeInSecond": 86400, "enabled": true}
        },
        "spec": {
            "partitions": 6,
            "replicationFactor": 3,
            "configs": {"cleanup.policy": "delete", "retention.ms": "604800000"}
        }
    });
    assert_eq!(round_trip("conduktor_console_topic_v2", document.clone()), document);
}

#[test]
fn kafka_cluster_round_trips() {
    let document = json!({
        "apiVersion": "v2",
        "kind": "KafkaCluster",
        "metadata": {"name": "prod"},
        "spec": {
            "displayName": "Production",
            "bootstrapServers": "broker-1:9092",
            "properties": {"security.protocol": "SASL_SSL"},
            "kafkaFlavor": {
                "type": "Aiven",
                "apiToken": "token",
                "project": "data",
                "serviceName": "kafka-prod"
            },
            "schemaRegistry": {
                "type": "ConfluentLike",
                "url": "https://registry:8081",
                "security": {"type": "BearerToken", "token": "abc"}
            }
        }
    });
    assert_eq!(round_trip("conduktor_console_kafka_cluster_v2", document.clone()), document);
}

#[test]
fn interceptor_config_survives_as_json() {
    let document = json!({
        "apiVersion": "gateway/v2",
        "kind": "Interceptor",
        "metadata": {"name": "enforce-partitions", "scope": {"vCluster": "passthrough"}},
        "spec": {
            "pluginClass": "io.conduktor.gateway.interceptor.safeguard.CreateTopicPolicyPlugin",
            "priority": 100,
            "config": {
                "topic": "orders.*",
                "numPartition": {"min": 1, "max": 3, "action": "BLOCK"}
            }
        }
    });
    let value =
        client_resource_to_terraform("conduktor_gateway_interceptor_v2", &resource(&document))
            .unwrap();
    let config = value
        .attribute("spec")
        .unwrap()
        .attribute("config")
        .unwrap()
        .as_optional_string()
        .unwrap()
        .unwrap();
    let parsed: Value = serde_json::from_str(config).unwrap();
    assert_eq!(parsed, document["spec"]["config"]);

    assert_eq!(
        round_trip("conduktor_gateway_interceptor_v2", document.clone()),
        document
    );
}

#[test]
fn terraform_plan_maps_to_wire_document() {
    let value = terraform_value(
        "conduktor_console_topic_policy_v1",
        json!({
            "name": "retention-policy",
            "spec": {
                "policies": {
                    "spec.configs.retention.ms": {
                        "range": {"min": 60000, "max": 3600000, "optional": true}
                    },
                    "metadata.labels.data-criticality": {
                        "one_of": {"values": ["C0", "C1", "C2"]}
                    }
                }
            }
        }),
    );

    let document = terraform_to_client_resource("conduktor_console_topic_policy_v1", &value)
        .unwrap()
        .document()
        .unwrap();
    assert_eq!(
        document,
        json!({
            "apiVersion": "v1",
            "kind": "TopicPolicy",
            "metadata": {"name": "retention-policy"},
            "spec": {
                "policies": {
                    "spec.configs.retention.ms": {
                        "constraint": "Range",
                        "optional": true,
                        "min": 60000,
                        "max": 3600000
                    },
                    "metadata.labels.data-criticality": {
                        "constraint": "OneOf",
                        "values": ["C0", "C1", "C2"]
                    }
                }
            }
        })
    );
}

#[test]
fn ambiguous_constraint_surfaces_as_diagnostic() {
    let value = terraform_value(
        "conduktor_console_topic_policy_v1",
        json!({
            "name": "partitions",
            "spec": {
                "policies": {
                    "spec.partitions": {
                        "range": {"min": 1, "max": 6},
                        "one_of": {"values": ["3", "6"]}
                    }
                }
            }
        }),
    );

    let err =
        terraform_to_client_resource("conduktor_console_topic_policy_v1", &value).unwrap_err();
    assert!(matches!(err.root_cause(), Error::AmbiguousUnion { .. }));

    let diagnostic = Diagnostic::from(&err);
    assert_eq!(diagnostic.summary, "Invalid polymorphic block");
    assert_eq!(
        diagnostic.attribute,
        Some(
            AttributePath::new("spec")
                .attribute("policies")
                .key("spec.partitions")
        )
    );
}

#[test]
fn constraint_without_rule_is_rejected() {
    let value = terraform_value(
        "conduktor_console_topic_policy_v1",
        json!({"name": "empty", "spec": {"policies": {"spec.partitions": {}}}}),
    );
    let err =
        terraform_to_client_resource("conduktor_console_topic_policy_v1", &value).unwrap_err();
    assert!(matches!(err.root_cause(), Error::EmptyUnion { .. }));
}

#[test]
fn flavor_without_type_is_rejected() {
    let value = terraform_value(
        "conduktor_console_kafka_cluster_v2",
        json!({
            "name": "prod",
            "spec": {
                "display_name": "Production",
                "bootstrap_servers": "broker-1:9092",
                "kafka_flavor": {"api_token": "token", "project": "data"}
            }
        }),
    );
    let err =
        terraform_to_client_resource("conduktor_console_kafka_cluster_v2", &value).unwrap_err();
    assert_eq!(err.path(), Some("spec.kafka_flavor"));
    assert_eq!(err.root_cause().to_string(), "kafka flavor has no type set");
}

#[test]
fn structural_error_carries_dotted_path() {
    // Raw JSON, not shaped by the resource type, so the bad element survives
    let value: Dynamic = serde_json::from_value(json!({
        "name": "alice@example.com",
        "spec": {
            "firstname": "Alice",
            "permissions": [
                {"resource_type": "PLATFORM", "permissions": ["userView"]},
                {"resource_type": 7, "permissions": []}
            ]
        }
    }))
    .unwrap();
    let err = terraform_to_client_resource("conduktor_console_user_v2", &value).unwrap_err();
    assert_eq!(err.path(), Some("spec.permissions[1].resource_type"));
}

#[test]
fn unknown_wire_variant_is_rejected() {
    let document = json!({
        "apiVersion": "v2",
        "kind": "KafkaConnectCluster",
        "metadata": {"name": "connect", "cluster": "prod"},
        "spec": {
            "displayName": "Connect",
            "urls": "http://connect:8083",
            "security": {"type": "Kerberos", "principal": "connect"}
        }
    });
    let err =
        client_resource_to_terraform("conduktor_console_kafka_connect_v2", &resource(&document))
            .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().contains("Kerberos"));
}

#[test]
fn kind_mismatch_is_rejected() {
    let document = json!({
        "apiVersion": "v2",
        "kind": "Topic",
        "metadata": {"name": "orders", "cluster": "prod"},
        "spec": {}
    });
    let err = client_resource_to_terraform("conduktor_console_user_v2", &resource(&document))
        .unwrap_err();
    assert!(matches!(err, Error::KindMismatch { expected: "User", .. }));
}

#[test]
fn terraform_value_survives_msgpack() {
    let document = json!({
        "apiVersion": "gateway/v2",
        "kind": "VirtualCluster",
        "metadata": {"name": "vc-sales"},
        "spec": {
            "aclEnabled": true,
            "superUsers": ["admin"],
            "type": "Standard"
        }
    });
    let value =
        client_resource_to_terraform("conduktor_gateway_virtual_cluster_v2", &resource(&document))
            .unwrap();
    let ty = resource_type("conduktor_gateway_virtual_cluster_v2").unwrap();

    let bytes = DynamicValue::new(value.clone()).encode_msgpack().unwrap();
    let decoded = DynamicValue::decode_msgpack(&bytes, &ty).unwrap();
    assert_eq!(decoded.value, value);
}
