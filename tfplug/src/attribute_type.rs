//! Terraform attribute types
//!
//! An `AttributeType` describes the shape of a value. It is used to check
//! values a provider builds and to shape untyped values decoded from the wire.

use crate::error::{Result, TfplugError};
use crate::types::{AttributePath, Dynamic};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Number,
    Bool,
    List(Box<AttributeType>),
    Set(Box<AttributeType>),
    Map(Box<AttributeType>),
    Object(HashMap<String, AttributeType>),
}

impl AttributeType {
    pub fn list(elem: AttributeType) -> Self {
        AttributeType::List(Box::new(elem))
    }

    pub fn set(elem: AttributeType) -> Self {
        AttributeType::Set(Box::new(elem))
    }

    pub fn map(elem: AttributeType) -> Self {
        AttributeType::Map(Box::new(elem))
    }

    pub fn object<'a>(attrs: impl IntoIterator<Item = (&'a str, AttributeType)>) -> Self {
        AttributeType::Object(
            attrs
                .into_iter()
                .map(|(name, ty)| (name.to_string(), ty))
                .collect(),
        )
    }

    /// Attribute types of an object type, `None` for any other type
    pub fn attribute_types(&self) -> Option<&HashMap<String, AttributeType>> {
        match self {
            AttributeType::Object(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Human readable type, in Terraform's notation
    pub fn type_name(&self) -> String {
        match self {
            AttributeType::String => "string".to_string(),
            AttributeType::Number => "number".to_string(),
            AttributeType::Bool => "bool".to_string(),
            AttributeType::List(elem) => format!("list({})", elem.type_name()),
            AttributeType::Set(elem) => format!("set({})", elem.type_name()),
            AttributeType::Map(elem) => format!("map({})", elem.type_name()),
            AttributeType::Object(_) => "object".to_string(),
        }
    }

    fn mismatch(&self, value: &Dynamic) -> TfplugError {
        TfplugError::TypeMismatch {
            expected: self.type_name(),
            actual: value.type_name().to_string(),
        }
    }

    /// Check that `value` conforms to this type. Null and unknown conform to
    /// every type. Objects must carry exactly the declared attributes.
    pub fn validate(&self, value: &Dynamic) -> Result<()> {
        match (self, value) {
            (_, Dynamic::Null | Dynamic::Unknown) => Ok(()),
            (AttributeType::String, Dynamic::String(_))
            | (AttributeType::Number, Dynamic::Number(_))
            | (AttributeType::Bool, Dynamic::Bool(_)) => Ok(()),
            (AttributeType::List(elem), Dynamic::List(elems))
            | (AttributeType::Set(elem), Dynamic::Set(elems)) => {
                for (idx, item) in elems.iter().enumerate() {
                    elem.validate(item)
                        .map_err(|e| e.at(&AttributePath::root().index(idx as i64)))?;
                }
                Ok(())
            }
            (AttributeType::Map(elem), Dynamic::Map(entries)) => {
                for (key, item) in entries {
                    elem.validate(item)
                        .map_err(|e| e.at(&AttributePath::root().key(key)))?;
                }
                Ok(())
            }
            (AttributeType::Object(attr_types), Dynamic::Object(attrs)) => {
                validate_object(attr_types, attrs)
            }
            (ty, value) => Err(ty.mismatch(value)),
        }
    }

    /// Shape an untyped value decoded from the wire: lists become sets where
    /// the type says so, maps become objects, absent object attributes become
    /// null. Unexpected attributes and mismatched scalars are errors.
    pub fn coerce(&self, value: Dynamic) -> Result<Dynamic> {
        match (self, value) {
            (_, value @ (Dynamic::Null | Dynamic::Unknown)) => Ok(value),
            (AttributeType::String, value @ Dynamic::String(_))
            | (AttributeType::Number, value @ Dynamic::Number(_))
            | (AttributeType::Bool, value @ Dynamic::Bool(_)) => Ok(value),
            (AttributeType::List(elem), Dynamic::List(elems) | Dynamic::Set(elems)) => {
                Ok(Dynamic::List(coerce_elements(elem, elems)?))
            }
            (AttributeType::Set(elem), Dynamic::List(elems) | Dynamic::Set(elems)) => {
                Ok(Dynamic::Set(coerce_elements(elem, elems)?))
            }
            (AttributeType::Map(elem), Dynamic::Map(entries) | Dynamic::Object(entries)) => {
                let mut coerced = HashMap::with_capacity(entries.len());
                for (key, item) in entries {
                    let item = elem
                        .coerce(item)
                        .map_err(|e| e.at(&AttributePath::root().key(&key)))?;
                    coerced.insert(key, item);
                }
                Ok(Dynamic::Map(coerced))
            }
            (
                AttributeType::Object(attr_types),
                Dynamic::Map(mut attrs) | Dynamic::Object(mut attrs),
            ) => {
                if let Some(extra) = attrs.keys().find(|k| !attr_types.contains_key(*k)) {
                    return Err(TfplugError::UnexpectedAttribute(extra.clone()));
                }
                let mut coerced = HashMap::with_capacity(attr_types.len());
                for (name, ty) in attr_types {
                    let item = attrs.remove(name).unwrap_or(Dynamic::Null);
                    let item = ty
                        .coerce(item)
                        .map_err(|e| e.at(&AttributePath::new(name)))?;
                    coerced.insert(name.clone(), item);
                }
                Ok(Dynamic::Object(coerced))
            }
            (ty, value) => Err(ty.mismatch(&value)),
        }
    }
}

fn coerce_elements(elem: &AttributeType, elems: Vec<Dynamic>) -> Result<Vec<Dynamic>> {
    elems
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            elem.coerce(item)
                .map_err(|e| e.at(&AttributePath::root().index(idx as i64)))
        })
        .collect()
}

pub(crate) fn validate_object(
    attr_types: &HashMap<String, AttributeType>,
    attrs: &HashMap<String, Dynamic>,
) -> Result<()> {
    if let Some(extra) = attrs.keys().find(|k| !attr_types.contains_key(*k)) {
        return Err(TfplugError::UnexpectedAttribute(extra.clone()));
    }
    let mut names: Vec<&String> = attr_types.keys().collect();
    names.sort();
    for name in names {
        let item = attrs
            .get(name)
            .ok_or_else(|| TfplugError::MissingAttribute(name.clone()))?;
        attr_types[name]
            .validate(item)
            .map_err(|e| e.at(&AttributePath::new(name)))?;
    }
    Ok(())
}
