//! Topic policies: a map of named constraints
//!
//! In Terraform a constraint is one object with an optional block per rule
//! kind, so "no rule" and "several rules" are both expressible there and must
//! be rejected on the way in.

use crate::error::{Direction, Error, Result, ResultExt};
use crate::mapper::{
    bool_value, build_object, key_path, number_value, read_block, read_bool, read_i64,
    read_object, read_required_string, read_strings, ResourceMapper,
};
use crate::model::console::topic_policy::{
    Constraint, ConstraintRule, TopicPolicyMetadata, TopicPolicyResource, TopicPolicySpec,
};
use crate::model::Manifest;
use std::collections::{BTreeMap, HashMap};
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::{FromTerraform, IntoTerraform};

pub struct TopicPolicyMapper;

const UNION: &str = "topic policy constraint";

fn values_type() -> AttributeType {
    AttributeType::object([
        ("values", AttributeType::list(AttributeType::String)),
        ("optional", AttributeType::Bool),
    ])
}

fn match_type() -> AttributeType {
    AttributeType::object([
        ("pattern", AttributeType::String),
        ("optional", AttributeType::Bool),
    ])
}

fn range_type() -> AttributeType {
    AttributeType::object([
        ("min", AttributeType::Number),
        ("max", AttributeType::Number),
        ("optional", AttributeType::Bool),
    ])
}

fn constraint_type() -> AttributeType {
    AttributeType::object([
        ("match", match_type()),
        ("none_of", values_type()),
        ("one_of", values_type()),
        ("range", range_type()),
    ])
}

fn spec_type() -> AttributeType {
    AttributeType::object([("policies", AttributeType::map(constraint_type()))])
}

fn read_constraint(obj: &Dynamic) -> Result<Constraint> {
    let blocks = [
        ("match", read_object(obj, "match")?),
        ("none_of", read_object(obj, "none_of")?),
        ("one_of", read_object(obj, "one_of")?),
        ("range", read_object(obj, "range")?),
    ];
    let set: Vec<(&str, &Dynamic)> = blocks
        .into_iter()
        .filter_map(|(name, block)| block.map(|block| (name, block)))
        .collect();

    let (name, block) = match set.as_slice() {
        [] => return Err(Error::EmptyUnion { union: UNION }),
        [only] => *only,
        several => {
            return Err(Error::AmbiguousUnion {
                union: UNION,
                variants: several
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        }
    };

    let read_rule = || -> Result<Constraint> {
        let rule = match name {
            "match" => ConstraintRule::Match {
                pattern: read_required_string(block, "pattern")?,
            },
            "none_of" => ConstraintRule::NoneOf {
                values: read_strings(block, "values")?,
            },
            "one_of" => ConstraintRule::OneOf {
                values: read_strings(block, "values")?,
            },
            _ => ConstraintRule::Range {
                min: read_i64(block, "min")?.unwrap_or_default(),
                max: read_i64(block, "max")?.unwrap_or_default(),
            },
        };
        Ok(Constraint {
            optional: read_bool(block, "optional")?,
            rule,
        })
    };
    read_rule().at(FromTerraform, name)
}

fn write_constraint(constraint: &Constraint) -> Result<Dynamic> {
    let ty = constraint_type();
    let optional = bool_value(constraint.optional);
    let strings = |values: &[String]| {
        tfplug::list_value(
            &AttributeType::String,
            values.iter().map(Dynamic::string).collect(),
        )
    };

    let (name, block, block_type) = match &constraint.rule {
        ConstraintRule::Match { pattern } => (
            "match",
            ObjectBuilder::new().attribute("pattern", Dynamic::string(pattern)),
            match_type(),
        ),
        ConstraintRule::NoneOf { values } => (
            "none_of",
            ObjectBuilder::new().attribute("values", strings(values)?),
            values_type(),
        ),
        ConstraintRule::OneOf { values } => (
            "one_of",
            ObjectBuilder::new().attribute("values", strings(values)?),
            values_type(),
        ),
        ConstraintRule::Range { min, max } => (
            "range",
            ObjectBuilder::new()
                .attribute("min", number_value(Some(*min)))
                .attribute("max", number_value(Some(*max))),
            range_type(),
        ),
    };
    let block = build_object(block.attribute("optional", optional), &block_type)
        .at(IntoTerraform, name)?;

    let builder = ObjectBuilder::new()
        .attribute("match", Dynamic::Null)
        .attribute("none_of", Dynamic::Null)
        .attribute("one_of", Dynamic::Null)
        .attribute("range", Dynamic::Null)
        .attribute(name, block);
    build_object(builder, &ty)
}

fn read_policies(spec: &Dynamic) -> Result<BTreeMap<String, Constraint>> {
    let value = spec.attribute("policies").at(FromTerraform, "policies")?;
    let Some(entries) = value.as_entries().at(FromTerraform, "policies")? else {
        return Ok(BTreeMap::new());
    };
    let mut policies = BTreeMap::new();
    for (key, constraint) in entries {
        let constraint = read_constraint(constraint)
            .at(FromTerraform, &key_path(key))
            .at(FromTerraform, "policies")?;
        policies.insert(key.clone(), constraint);
    }
    Ok(policies)
}

fn write_policies(policies: &BTreeMap<String, Constraint>) -> Result<Dynamic> {
    let mut entries = HashMap::new();
    for (key, constraint) in policies {
        let value = write_constraint(constraint).at(IntoTerraform, &key_path(key))?;
        entries.insert(key.clone(), value);
    }
    Ok(tfplug::map_value(&constraint_type(), entries)?)
}

impl ResourceMapper for TopicPolicyMapper {
    const TYPE_NAME: &'static str = "conduktor_console_topic_policy_v1";

    type Metadata = TopicPolicyMetadata;
    type Spec = TopicPolicySpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([("name", AttributeType::String), ("spec", spec_type())])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<TopicPolicyResource> {
        tracing::debug!(resource = Self::TYPE_NAME, "mapping terraform value to topic policy");
        let metadata = TopicPolicyMetadata {
            name: read_required_string(value, "name")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(TopicPolicySpec {
                policies: read_policies(spec)?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &TopicPolicyResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping topic policy to terraform value"
        );
        let policies = write_policies(&model.spec.policies)
            .at(IntoTerraform, "spec.policies")?;
        let spec = build_object(
            ObjectBuilder::new().attribute("policies", policies),
            &spec_type(),
        )
        .at(IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
#[path = "./topic_policy_test.rs"]
mod topic_policy_test;
