use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, number_value, object_set_value, read_block, read_i64, read_objects,
    read_required_string, read_string, read_string_map, string_map_value, string_value,
    write_objects, EmptyAs, ResourceMapper,
};
use crate::model::avro::normalize_schema;
use crate::model::console::subject::{
    SchemaReference, SubjectMetadata, SubjectResource, SubjectSpec,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::{FromTerraform, IntoTerraform};

pub struct SubjectMapper;

fn reference_type() -> AttributeType {
    AttributeType::object([
        ("name", AttributeType::String),
        ("subject", AttributeType::String),
        ("version", AttributeType::Number),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("format", AttributeType::String),
        ("schema", AttributeType::String),
        ("compatibility", AttributeType::String),
        ("id", AttributeType::Number),
        ("version", AttributeType::Number),
        ("references", AttributeType::set(reference_type())),
    ])
}

fn read_reference(obj: &Dynamic) -> Result<SchemaReference> {
    Ok(SchemaReference {
        name: read_required_string(obj, "name")?,
        subject: read_required_string(obj, "subject")?,
        version: read_i64(obj, "version")?.unwrap_or_default(),
    })
}

fn write_reference(reference: &SchemaReference) -> Result<Dynamic> {
    let builder = ObjectBuilder::new()
        .attribute("name", Dynamic::string(&reference.name))
        .attribute("subject", Dynamic::string(&reference.subject))
        .attribute("version", number_value(Some(reference.version)));
    build_object(builder, &reference_type())
}

fn read_spec(spec: &Dynamic) -> Result<SubjectSpec> {
    let format = read_required_string(spec, "format")?;
    let schema = read_required_string(spec, "schema")?;
    let schema = normalize_schema(&schema, &format).at(FromTerraform, "schema")?;
    Ok(SubjectSpec {
        format,
        schema,
        compatibility: read_string(spec, "compatibility")?,
        id: read_i64(spec, "id")?,
        version: read_i64(spec, "version")?,
        references: read_objects(spec, "references", read_reference)?,
    })
}

impl ResourceMapper for SubjectMapper {
    const TYPE_NAME: &'static str = "conduktor_console_kafka_subject_v2";

    type Metadata = SubjectMetadata;
    type Spec = SubjectSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("cluster", AttributeType::String),
            ("labels", AttributeType::map(AttributeType::String)),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<SubjectResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to subject");
        let metadata = SubjectMetadata {
            name: read_required_string(value, "name")?,
            cluster: read_required_string(value, "cluster")?,
            labels: read_string_map(value, "labels")?,
        };
        let spec = read_block(value, "spec", read_spec)?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &SubjectResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping subject to terraform value"
        );
        let spec = &model.spec;
        // a schema the registry accepted but that does not parse is shown as-is
        let schema = normalize_schema(&spec.schema, &spec.format).unwrap_or_else(|err| {
            tracing::warn!(
                subject = %model.metadata.name,
                error = %err,
                "keeping schema text unnormalized"
            );
            err.original
        });
        let references = write_objects(&spec.references, write_reference)
            .and_then(|items| object_set_value(&reference_type(), items, EmptyAs::Null))
            .at(IntoTerraform, "spec.references")?;
        let builder = ObjectBuilder::new()
            .attribute("format", Dynamic::string(&spec.format))
            .attribute("schema", Dynamic::string(schema))
            .attribute("compatibility", string_value(spec.compatibility.as_deref()))
            .attribute("id", number_value(spec.id))
            .attribute("version", number_value(spec.version))
            .attribute("references", references);
        let spec = build_object(builder, &spec_type()).at(IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("cluster", Dynamic::string(&model.metadata.cluster))
            .attribute("labels", string_map_value(&model.metadata.labels, EmptyAs::Null)?)
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}
