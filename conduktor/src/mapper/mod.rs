//! Conversions between Terraform values and the internal REST models
//!
//! Every resource type gets a `ResourceMapper`. The helpers below bridge the
//! two absence encodings: Terraform null (or unknown) on one side, `Option`,
//! empty strings and empty collections on the other.

pub mod console;
pub mod gateway;

use crate::error::{Direction, Error, Result, ResultExt};
use crate::model::{Manifest, ResourceKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

use Direction::{FromTerraform, IntoTerraform};

pub trait ResourceMapper {
    /// Terraform resource type name, e.g. `conduktor_console_topic_v2`
    const TYPE_NAME: &'static str;

    type Metadata: ResourceKind + Serialize + DeserializeOwned;
    type Spec: Serialize + DeserializeOwned;

    /// Object type of the whole Terraform resource
    fn resource_type() -> AttributeType;

    fn tf_to_internal_model(value: &Dynamic) -> Result<Manifest<Self::Metadata, Self::Spec>>;

    fn internal_model_to_terraform(model: &Manifest<Self::Metadata, Self::Spec>) -> Result<Dynamic>;
}

/// How an empty internal collection is written back to Terraform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmptyAs {
    Null,
    Empty,
}

pub(crate) fn index_path(idx: usize) -> String {
    format!("[{}]", idx)
}

pub(crate) fn key_path(key: &str) -> String {
    format!("[{:?}]", key)
}

// Reading from Terraform.

/// Optional string; null, unknown and empty all read as `None`
pub(crate) fn read_string(obj: &Dynamic, name: &str) -> Result<Option<String>> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    Ok(value
        .as_optional_string()
        .at(FromTerraform, name)?
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}

/// String the API always expects; null reads as empty
pub(crate) fn read_required_string(obj: &Dynamic, name: &str) -> Result<String> {
    Ok(read_string(obj, name)?.unwrap_or_default())
}

pub(crate) fn read_bool(obj: &Dynamic, name: &str) -> Result<Option<bool>> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    value.as_optional_bool().at(FromTerraform, name)
}

pub(crate) fn read_i64(obj: &Dynamic, name: &str) -> Result<Option<i64>> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    value.as_optional_i64().at(FromTerraform, name)
}

/// Strings of a set or list; null reads as empty
pub(crate) fn read_strings(obj: &Dynamic, name: &str) -> Result<Vec<String>> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    let elements = value.as_elements().at(FromTerraform, name)?;
    elements
        .iter()
        .enumerate()
        .map(|(idx, elem)| {
            elem.as_optional_string()
                .at(FromTerraform, &index_path(idx))
                .map(|s| s.unwrap_or_default().to_string())
        })
        .collect::<Result<Vec<_>>>()
        .at(FromTerraform, name)
}

/// String map; null reads as empty
pub(crate) fn read_string_map(obj: &Dynamic, name: &str) -> Result<BTreeMap<String, String>> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    string_map_from(value).at(FromTerraform, name)
}

/// String map held by `value`; null reads as empty
pub(crate) fn string_map_from(value: &Dynamic) -> Result<BTreeMap<String, String>> {
    let Some(entries) = value.as_entries()? else {
        return Ok(BTreeMap::new());
    };
    let mut map = BTreeMap::new();
    for (key, item) in entries {
        let item = item.as_optional_string().at(FromTerraform, &key_path(key))?;
        map.insert(key.clone(), item.unwrap_or_default().to_string());
    }
    Ok(map)
}

/// Nested object; `None` when null or unknown
pub(crate) fn read_object<'a>(obj: &'a Dynamic, name: &str) -> Result<Option<&'a Dynamic>> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    if value.is_null_or_unknown() {
        return Ok(None);
    }
    match value {
        Dynamic::Object(_) => Ok(Some(value)),
        other => Err(tfplug::TfplugError::TypeMismatch {
            expected: "object".to_string(),
            actual: other.type_name().to_string(),
        })
        .at(FromTerraform, name),
    }
}

/// Convert each element of a nested set or list of objects
pub(crate) fn read_objects<T>(
    obj: &Dynamic,
    name: &str,
    convert: impl Fn(&Dynamic) -> Result<T>,
) -> Result<Vec<T>> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    let elements = value.as_elements().at(FromTerraform, name)?;
    elements
        .iter()
        .enumerate()
        .map(|(idx, elem)| convert(elem).at(FromTerraform, &index_path(idx)))
        .collect::<Result<Vec<_>>>()
        .at(FromTerraform, name)
}

/// Variant tag of a flat polymorphic object, read from its `type` attribute
pub(crate) fn read_union_tag(obj: &Dynamic, union: &'static str) -> Result<String> {
    read_string(obj, "type")?.ok_or(Error::EmptyUnion { union })
}

/// Convert a nested object if present
pub(crate) fn read_nested<T>(
    obj: &Dynamic,
    name: &str,
    convert: impl FnOnce(&Dynamic) -> Result<T>,
) -> Result<Option<T>> {
    match read_object(obj, name)? {
        Some(nested) => convert(nested).at(FromTerraform, name).map(Some),
        None => Ok(None),
    }
}

/// Convert a required nested block. A null block reads as an object whose
/// attributes are all null.
pub(crate) fn read_block<T>(
    obj: &Dynamic,
    name: &str,
    convert: impl FnOnce(&Dynamic) -> Result<T>,
) -> Result<T> {
    let value = obj.attribute(name).at(FromTerraform, name)?;
    convert(value).at(FromTerraform, name)
}

// Writing into Terraform.

/// `None` and empty strings become null
pub(crate) fn string_value(value: Option<&str>) -> Dynamic {
    match value {
        Some(s) if !s.is_empty() => Dynamic::string(s),
        _ => Dynamic::Null,
    }
}

pub(crate) fn bool_value(value: Option<bool>) -> Dynamic {
    value.map(Dynamic::Bool).unwrap_or(Dynamic::Null)
}

pub(crate) fn number_value(value: Option<i64>) -> Dynamic {
    value
        .map(|n| Dynamic::Number(n as f64))
        .unwrap_or(Dynamic::Null)
}

pub(crate) fn string_set_value(values: &[String], empty: EmptyAs) -> Result<Dynamic> {
    let elements = values.iter().map(Dynamic::string).collect();
    collection(elements, empty, |elems| {
        tfplug::set_value(&AttributeType::String, elems)
    })
}

pub(crate) fn string_map_value(
    values: &BTreeMap<String, String>,
    empty: EmptyAs,
) -> Result<Dynamic> {
    if values.is_empty() && empty == EmptyAs::Null {
        return Ok(Dynamic::Null);
    }
    let entries: HashMap<String, Dynamic> = values
        .iter()
        .map(|(k, v)| (k.clone(), Dynamic::string(v)))
        .collect();
    Ok(tfplug::map_value(&AttributeType::String, entries)?)
}

/// Set of objects, each checked against `elem`
pub(crate) fn object_set_value(
    elem: &AttributeType,
    elements: Vec<Dynamic>,
    empty: EmptyAs,
) -> Result<Dynamic> {
    collection(elements, empty, |elems| tfplug::set_value(elem, elems))
}

/// List of objects, each checked against `elem`
pub(crate) fn object_list_value(
    elem: &AttributeType,
    elements: Vec<Dynamic>,
    empty: EmptyAs,
) -> Result<Dynamic> {
    collection(elements, empty, |elems| tfplug::list_value(elem, elems))
}

fn collection(
    elements: Vec<Dynamic>,
    empty: EmptyAs,
    build: impl FnOnce(Vec<Dynamic>) -> tfplug::Result<Dynamic>,
) -> Result<Dynamic> {
    if elements.is_empty() && empty == EmptyAs::Null {
        return Ok(Dynamic::Null);
    }
    Ok(build(elements)?)
}

/// Convert each item into a Terraform object, tagging failures with its index
pub(crate) fn write_objects<T>(
    items: &[T],
    convert: impl Fn(&T) -> Result<Dynamic>,
) -> Result<Vec<Dynamic>> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| convert(item).at(IntoTerraform, &index_path(idx)))
        .collect()
}

/// Finish an object, checking it against its declared type
pub(crate) fn build_object(builder: ObjectBuilder, ty: &AttributeType) -> Result<Dynamic> {
    Ok(builder.build(ty)?)
}

/// Builder for a flat polymorphic object with every attribute of `ty`
/// preset to null; the variant then fills in its own attributes.
pub(crate) fn flat_object(ty: &AttributeType) -> ObjectBuilder {
    ty.attribute_types()
        .into_iter()
        .flat_map(HashMap::keys)
        .fold(ObjectBuilder::new(), |builder, name| {
            builder.attribute(name, Dynamic::Null)
        })
}

/// Write an optional nested block; `None` becomes null
pub(crate) fn optional_object<T>(
    value: Option<&T>,
    path: &str,
    convert: impl FnOnce(&T) -> Result<Dynamic>,
) -> Result<Dynamic> {
    match value {
        Some(inner) => convert(inner).at(IntoTerraform, path),
        None => Ok(Dynamic::Null),
    }
}
