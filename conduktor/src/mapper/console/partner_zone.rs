use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    bool_value, build_object, number_value, object_list_value, object_set_value,
    optional_object, read_block, read_bool, read_i64, read_nested, read_objects,
    read_required_string, read_string, read_string_map, string_map_value, string_value,
    write_objects, EmptyAs, ResourceMapper,
};
use crate::model::console::partner_zone::{
    AddedHeader, AuthenticationMode, Headers, Partner, PartnerZoneMetadata, PartnerZoneResource,
    PartnerZoneSpec, PartnerZoneTopic, RemovedHeader, TrafficControlPolicies,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::IntoTerraform;

pub struct PartnerZoneMapper;

fn authentication_mode_type() -> AttributeType {
    AttributeType::object([
        ("type", AttributeType::String),
        ("service_account", AttributeType::String),
    ])
}

fn topic_type() -> AttributeType {
    AttributeType::object([
        ("name", AttributeType::String),
        ("backing_topic", AttributeType::String),
        ("permission", AttributeType::String),
    ])
}

fn partner_type() -> AttributeType {
    AttributeType::object([
        ("name", AttributeType::String),
        ("role", AttributeType::String),
        ("email", AttributeType::String),
        ("phone", AttributeType::String),
    ])
}

fn traffic_control_type() -> AttributeType {
    AttributeType::object([
        ("max_produce_rate", AttributeType::Number),
        ("max_consume_rate", AttributeType::Number),
        ("limit_commit_offset", AttributeType::Number),
    ])
}

fn added_header_type() -> AttributeType {
    AttributeType::object([
        ("key", AttributeType::String),
        ("value", AttributeType::String),
        ("override_if_exists", AttributeType::Bool),
    ])
}

fn removed_header_type() -> AttributeType {
    AttributeType::object([("key_regex", AttributeType::String)])
}

fn headers_type() -> AttributeType {
    AttributeType::object([
        ("add_on_produce", AttributeType::list(added_header_type())),
        ("remove_on_consume", AttributeType::list(removed_header_type())),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("display_name", AttributeType::String),
        ("description", AttributeType::String),
        ("url", AttributeType::String),
        ("cluster", AttributeType::String),
        ("authentication_mode", authentication_mode_type()),
        ("topics", AttributeType::set(topic_type())),
        ("partner", partner_type()),
        ("traffic_control_policies", traffic_control_type()),
        ("headers", headers_type()),
    ])
}

fn read_topic(obj: &Dynamic) -> Result<PartnerZoneTopic> {
    Ok(PartnerZoneTopic {
        name: read_required_string(obj, "name")?,
        backing_topic: read_required_string(obj, "backing_topic")?,
        permission: read_required_string(obj, "permission")?,
    })
}

fn write_topic(topic: &PartnerZoneTopic) -> Result<Dynamic> {
    let builder = ObjectBuilder::new()
        .attribute("name", Dynamic::string(&topic.name))
        .attribute("backing_topic", Dynamic::string(&topic.backing_topic))
        .attribute("permission", Dynamic::string(&topic.permission));
    build_object(builder, &topic_type())
}

fn read_headers(obj: &Dynamic) -> Result<Headers> {
    Ok(Headers {
        add_on_produce: read_objects(obj, "add_on_produce", |header| {
            Ok(AddedHeader {
                key: read_required_string(header, "key")?,
                value: read_required_string(header, "value")?,
                override_if_exists: read_bool(header, "override_if_exists")?,
            })
        })?,
        remove_on_consume: read_objects(obj, "remove_on_consume", |header| {
            Ok(RemovedHeader {
                key_regex: read_required_string(header, "key_regex")?,
            })
        })?,
    })
}

fn write_headers(headers: &Headers) -> Result<Dynamic> {
    let added = write_objects(&headers.add_on_produce, |header| {
        let builder = ObjectBuilder::new()
            .attribute("key", Dynamic::string(&header.key))
            .attribute("value", Dynamic::string(&header.value))
            .attribute("override_if_exists", bool_value(header.override_if_exists));
        build_object(builder, &added_header_type())
    })
    .and_then(|items| object_list_value(&added_header_type(), items, EmptyAs::Null))
    .at(IntoTerraform, "add_on_produce")?;
    let removed = write_objects(&headers.remove_on_consume, |header| {
        let builder =
            ObjectBuilder::new().attribute("key_regex", Dynamic::string(&header.key_regex));
        build_object(builder, &removed_header_type())
    })
    .and_then(|items| object_list_value(&removed_header_type(), items, EmptyAs::Null))
    .at(IntoTerraform, "remove_on_consume")?;

    let builder = ObjectBuilder::new()
        .attribute("add_on_produce", added)
        .attribute("remove_on_consume", removed);
    build_object(builder, &headers_type())
}

impl ResourceMapper for PartnerZoneMapper {
    const TYPE_NAME: &'static str = "conduktor_console_partner_zone_v2";

    type Metadata = PartnerZoneMetadata;
    type Spec = PartnerZoneSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<PartnerZoneResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to partner zone");
        let metadata = PartnerZoneMetadata {
            name: read_required_string(value, "name")?,
            labels: read_string_map(value, "labels")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(PartnerZoneSpec {
                display_name: read_required_string(spec, "display_name")?,
                description: read_string(spec, "description")?,
                url: read_string(spec, "url")?,
                cluster: read_required_string(spec, "cluster")?,
                authentication_mode: read_nested(spec, "authentication_mode", |mode| {
                    Ok(AuthenticationMode {
                        mode_type: read_required_string(mode, "type")?,
                        service_account: read_string(mode, "service_account")?,
                    })
                })?,
                topics: read_objects(spec, "topics", read_topic)?,
                partner: read_nested(spec, "partner", |partner| {
                    Ok(Partner {
                        name: read_required_string(partner, "name")?,
                        role: read_string(partner, "role")?,
                        email: read_string(partner, "email")?,
                        phone: read_string(partner, "phone")?,
                    })
                })?,
                traffic_control_policies: read_nested(spec, "traffic_control_policies", |tc| {
                    Ok(TrafficControlPolicies {
                        max_produce_rate: read_i64(tc, "max_produce_rate")?,
                        max_consume_rate: read_i64(tc, "max_consume_rate")?,
                        limit_commit_offset: read_i64(tc, "limit_commit_offset")?,
                    })
                })?,
                headers: read_nested(spec, "headers", read_headers)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &PartnerZoneResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping partner zone to terraform value"
        );
        let spec = &model.spec;
        let authentication_mode = optional_object(
            spec.authentication_mode.as_ref(),
            "spec.authentication_mode",
            |mode| {
                let builder = ObjectBuilder::new()
                    .attribute("type", Dynamic::string(&mode.mode_type))
                    .attribute("service_account", string_value(mode.service_account.as_deref()));
                build_object(builder, &authentication_mode_type())
            },
        )?;
        let topics = write_objects(&spec.topics, write_topic)
            .and_then(|items| object_set_value(&topic_type(), items, EmptyAs::Empty))
            .at(IntoTerraform, "spec.topics")?;
        let partner = optional_object(spec.partner.as_ref(), "spec.partner", |partner| {
            let builder = ObjectBuilder::new()
                .attribute("name", Dynamic::string(&partner.name))
                .attribute("role", string_value(partner.role.as_deref()))
                .attribute("email", string_value(partner.email.as_deref()))
                .attribute("phone", string_value(partner.phone.as_deref()));
            build_object(builder, &partner_type())
        })?;
        let traffic_control = optional_object(
            spec.traffic_control_policies.as_ref(),
            "spec.traffic_control_policies",
            |tc| {
                let builder = ObjectBuilder::new()
                    .attribute("max_produce_rate", number_value(tc.max_produce_rate))
                    .attribute("max_consume_rate", number_value(tc.max_consume_rate))
                    .attribute("limit_commit_offset", number_value(tc.limit_commit_offset));
                build_object(builder, &traffic_control_type())
            },
        )?;
        let headers = optional_object(spec.headers.as_ref(), "spec.headers", write_headers)?;

        let builder = ObjectBuilder::new()
            .attribute("display_name", Dynamic::string(&spec.display_name))
            .attribute("description", string_value(spec.description.as_deref()))
            .attribute("url", string_value(spec.url.as_deref()))
            .attribute("cluster", Dynamic::string(&spec.cluster))
            .attribute("authentication_mode", authentication_mode)
            .attribute("topics", topics)
            .attribute("partner", partner)
            .attribute("traffic_control_policies", traffic_control)
            .attribute("headers", headers);
        let spec = build_object(builder, &spec_type()).at(IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("labels", string_map_value(&model.metadata.labels, EmptyAs::Null)?)
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
