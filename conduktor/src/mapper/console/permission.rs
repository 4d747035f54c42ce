//! Permission block shared by users and groups

use crate::error::Result;
use crate::mapper::{
    build_object, read_required_string, read_string, read_strings, string_set_value,
    string_value, EmptyAs,
};
use crate::model::console::permission::Permission;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub(crate) fn permission_type() -> AttributeType {
    AttributeType::object([
        ("resource_type", AttributeType::String),
        ("name", AttributeType::String),
        ("cluster", AttributeType::String),
        ("kafka_connect", AttributeType::String),
        ("ksqldb", AttributeType::String),
        ("pattern_type", AttributeType::String),
        ("permissions", AttributeType::set(AttributeType::String)),
    ])
}

pub(crate) fn read_permission(obj: &Dynamic) -> Result<Permission> {
    Ok(Permission {
        resource_type: read_required_string(obj, "resource_type")?,
        name: read_string(obj, "name")?,
        cluster: read_string(obj, "cluster")?,
        kafka_connect: read_string(obj, "kafka_connect")?,
        ksqldb: read_string(obj, "ksqldb")?,
        pattern_type: read_string(obj, "pattern_type")?,
        permissions: read_strings(obj, "permissions")?,
    })
}

pub(crate) fn write_permission(permission: &Permission) -> Result<Dynamic> {
    let builder = ObjectBuilder::new()
        .attribute("resource_type", Dynamic::string(&permission.resource_type))
        .attribute("name", string_value(permission.name.as_deref()))
        .attribute("cluster", string_value(permission.cluster.as_deref()))
        .attribute("kafka_connect", string_value(permission.kafka_connect.as_deref()))
        .attribute("ksqldb", string_value(permission.ksqldb.as_deref()))
        .attribute("pattern_type", string_value(permission.pattern_type.as_deref()))
        .attribute(
            "permissions",
            string_set_value(&permission.permissions, EmptyAs::Empty)?,
        );
    build_object(builder, &permission_type())
}
