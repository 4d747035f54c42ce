use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    bool_value, build_object, number_value, optional_object, read_block, read_bool, read_i64,
    read_nested, read_required_string, read_string, read_string_map, string_map_value,
    string_value, EmptyAs, ResourceMapper,
};
use crate::model::console::topic::{SqlStorage, TopicMetadata, TopicResource, TopicSpec};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct TopicMapper;

fn sql_storage_type() -> AttributeType {
    AttributeType::object([
        ("retention_time_in_second", AttributeType::Number),
        ("enabled", AttributeType::Bool),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("partitions", AttributeType::Number),
        ("replication_factor", AttributeType::Number),
        ("configs", AttributeType::map(AttributeType::String)),
    ])
}

fn read_sql_storage(obj: &Dynamic) -> Result<SqlStorage> {
    Ok(SqlStorage {
        retention_time_in_second: read_i64(obj, "retention_time_in_second")?,
        enabled: read_bool(obj, "enabled")?,
    })
}

fn write_sql_storage(storage: &SqlStorage) -> Result<Dynamic> {
    let builder = ObjectBuilder::new()
        .attribute(
            "retention_time_in_second",
            number_value(storage.retention_time_in_second),
        )
        .attribute("enabled", bool_value(storage.enabled));
    build_object(builder, &sql_storage_type())
}

impl ResourceMapper for TopicMapper {
    const TYPE_NAME: &'static str = "conduktor_console_topic_v2";

    type Metadata = TopicMetadata;
    type Spec = TopicSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("cluster", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("catalog_visibility", AttributeType::String),
            ("description_is_editable", AttributeType::Bool),
            ("description", AttributeType::String),
            ("sql_storage", sql_storage_type()),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<TopicResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to topic");
        let metadata = TopicMetadata {
            name: read_required_string(value, "name")?,
            cluster: read_required_string(value, "cluster")?,
            labels: read_string_map(value, "labels")?,
            catalog_visibility: read_string(value, "catalog_visibility")?,
            description_is_editable: read_bool(value, "description_is_editable")?,
            description: read_string(value, "description")?,
            sql_storage: read_nested(value, "sql_storage", read_sql_storage)?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(TopicSpec {
                partitions: read_i64(spec, "partitions")?,
                replication_factor: read_i64(spec, "replication_factor")?,
                configs: read_string_map(spec, "configs")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &TopicResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping topic to terraform value"
        );
        let metadata = &model.metadata;
        let spec = ObjectBuilder::new()
            .attribute("partitions", number_value(model.spec.partitions))
            .attribute("replication_factor", number_value(model.spec.replication_factor))
            .attribute(
                "configs",
                string_map_value(&model.spec.configs, EmptyAs::Null)?,
            );
        let spec = build_object(spec, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&metadata.name))
            .attribute("cluster", Dynamic::string(&metadata.cluster))
            .attribute("labels", string_map_value(&metadata.labels, EmptyAs::Null)?)
            .attribute(
                "catalog_visibility",
                string_value(metadata.catalog_visibility.as_deref()),
            )
            .attribute(
                "description_is_editable",
                bool_value(metadata.description_is_editable),
            )
            .attribute("description", string_value(metadata.description.as_deref()))
            .attribute(
                "sql_storage",
                optional_object(metadata.sql_storage.as_ref(), "sql_storage", write_sql_storage)?,
            )
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn topic() -> TopicResource {
        Manifest::new(
            TopicMetadata {
                name: "orders".to_string(),
                cluster: "prod".to_string(),
                labels: BTreeMap::from([("domain".to_string(), "sales".to_string())]),
                catalog_visibility: Some("PUBLIC".to_string()),
                description_is_editable: Some(true),
                description: Some("All orders".to_string()),
                sql_storage: Some(SqlStorage {
                    retention_time_in_second: Some(86400),
                    enabled: Some(true),
                }),
            },
            TopicSpec {
                partitions: Some(6),
                replication_factor: Some(3),
                configs: BTreeMap::from([
                    ("cleanup.policy".to_string(), "delete".to_string()),
                    ("retention.ms".to_string(), "604800000".to_string()),
                ]),
            },
        )
    }

    #[test]
    fn round_trips_through_terraform() {
        let value = TopicMapper::internal_model_to_terraform(&topic()).unwrap();
        assert_eq!(
            value.attribute("spec").unwrap().attribute("partitions").unwrap(),
            &Dynamic::Number(6.0)
        );
        assert_eq!(TopicMapper::tf_to_internal_model(&value).unwrap(), topic());
    }

    #[test]
    fn sql_storage_is_metadata_on_the_wire() {
        let document: serde_json::Value =
            serde_json::from_slice(&topic().to_client_resource().unwrap().json).unwrap();
        assert_eq!(
            document["metadata"]["sqlStorage"],
            json!({"retentionTimeInSecond": 86400, "enabled": true})
        );
        assert_eq!(document["metadata"]["descriptionIsEditable"], json!(true));
        assert_eq!(document["spec"]["replicationFactor"], json!(3));
    }

    #[test]
    fn fractional_partitions_are_rejected() {
        let mut value = TopicMapper::internal_model_to_terraform(&topic()).unwrap();
        if let Dynamic::Object(attrs) = &mut value {
            if let Some(Dynamic::Object(spec)) = attrs.get_mut("spec") {
                spec.insert("partitions".to_string(), Dynamic::Number(1.5));
            }
        }
        let err = TopicMapper::tf_to_internal_model(&value).unwrap_err();
        assert_eq!(err.path(), Some("spec.partitions"));
    }

    #[test]
    fn absent_optionals_stay_absent() {
        let model = Manifest::new(
            TopicMetadata {
                name: "bare".to_string(),
                cluster: "prod".to_string(),
                labels: BTreeMap::new(),
                catalog_visibility: None,
                description_is_editable: None,
                description: None,
                sql_storage: None,
            },
            TopicSpec::default(),
        );
        let value = TopicMapper::internal_model_to_terraform(&model).unwrap();
        assert_eq!(value.attribute("sql_storage").unwrap(), &Dynamic::Null);
        assert_eq!(value.attribute("description_is_editable").unwrap(), &Dynamic::Null);
        assert_eq!(TopicMapper::tf_to_internal_model(&value).unwrap(), model);

        let document: serde_json::Value =
            serde_json::from_slice(&model.to_client_resource().unwrap().json).unwrap();
        assert_eq!(document["spec"], json!({}));
    }
}
