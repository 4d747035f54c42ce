use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, object_set_value, read_block, read_objects, read_required_string, read_string,
    read_strings, string_set_value, string_value, write_objects, EmptyAs, ResourceMapper,
};
use crate::model::gateway::group::{
    GatewayGroupMetadata, GatewayGroupResource, GatewayGroupSpec, GroupMember,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct GatewayGroupMapper;

fn member_type() -> AttributeType {
    AttributeType::object([
        ("vcluster", AttributeType::String),
        ("name", AttributeType::String),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("members", AttributeType::set(member_type())),
        ("external_groups", AttributeType::set(AttributeType::String)),
    ])
}

impl ResourceMapper for GatewayGroupMapper {
    const TYPE_NAME: &'static str = "conduktor_gateway_group_v2";

    type Metadata = GatewayGroupMetadata;
    type Spec = GatewayGroupSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([("name", AttributeType::String), ("spec", spec_type())])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<GatewayGroupResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to gateway group");
        let metadata = GatewayGroupMetadata {
            name: read_required_string(value, "name")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(GatewayGroupSpec {
                members: read_objects(spec, "members", |member| {
                    Ok(GroupMember {
                        vcluster: read_string(member, "vcluster")?,
                        name: read_required_string(member, "name")?,
                    })
                })?,
                external_groups: read_strings(spec, "external_groups")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &GatewayGroupResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping gateway group to terraform value"
        );
        let members = write_objects(&model.spec.members, |member| {
            let builder = ObjectBuilder::new()
                .attribute("vcluster", string_value(member.vcluster.as_deref()))
                .attribute("name", Dynamic::string(&member.name));
            build_object(builder, &member_type())
        })
        .and_then(|items| object_set_value(&member_type(), items, EmptyAs::Empty))
        .at(Direction::IntoTerraform, "spec.members")?;
        let spec = ObjectBuilder::new()
            .attribute("members", members)
            .attribute(
                "external_groups",
                string_set_value(&model.spec.external_groups, EmptyAs::Empty)?,
            );
        let spec = build_object(spec, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
