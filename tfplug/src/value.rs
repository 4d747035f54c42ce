//! Typed value constructors
//!
//! These build collection and object values and check them against the
//! declared attribute types, so a provider cannot hand Terraform a value whose
//! shape differs from its schema.

use crate::attribute_type::{validate_object, AttributeType};
use crate::error::{Result, TfplugError};
use crate::types::{AttributePath, Dynamic};
use std::collections::HashMap;

/// Build an object value. Every declared attribute must be present, no other
/// attribute may be, and each must conform to its type.
pub fn object_value(
    attr_types: &HashMap<String, AttributeType>,
    attributes: HashMap<String, Dynamic>,
) -> Result<Dynamic> {
    validate_object(attr_types, &attributes)?;
    Ok(Dynamic::Object(attributes))
}

/// Build a set value whose elements all conform to `elem`. Repeated elements
/// are dropped, keeping the first occurrence.
pub fn set_value(elem: &AttributeType, elements: Vec<Dynamic>) -> Result<Dynamic> {
    validate_elements(elem, &elements)?;
    let total = elements.len();
    let mut unique: Vec<Dynamic> = Vec::with_capacity(total);
    for item in elements {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    if unique.len() < total {
        tracing::debug!(dropped = total - unique.len(), "dropped duplicate set elements");
    }
    Ok(Dynamic::Set(unique))
}

/// Build a list value whose elements all conform to `elem`
pub fn list_value(elem: &AttributeType, elements: Vec<Dynamic>) -> Result<Dynamic> {
    validate_elements(elem, &elements)?;
    Ok(Dynamic::List(elements))
}

/// Build a map value whose entries all conform to `elem`
pub fn map_value(elem: &AttributeType, entries: HashMap<String, Dynamic>) -> Result<Dynamic> {
    for (key, item) in &entries {
        elem.validate(item)
            .map_err(|e| e.at(&AttributePath::root().key(key)))?;
    }
    Ok(Dynamic::Map(entries))
}

fn validate_elements(elem: &AttributeType, elements: &[Dynamic]) -> Result<()> {
    for (idx, item) in elements.iter().enumerate() {
        elem.validate(item)
            .map_err(|e| e.at(&AttributePath::root().index(idx as i64)))?;
    }
    Ok(())
}

/// Incremental builder for object values, checked on `build`
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    attributes: HashMap<String, Dynamic>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: &str, value: Dynamic) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    /// Check the collected attributes against an object type
    pub fn build(self, ty: &AttributeType) -> Result<Dynamic> {
        let attr_types = ty.attribute_types().ok_or_else(|| TfplugError::TypeMismatch {
            expected: "object".to_string(),
            actual: ty.type_name(),
        })?;
        object_value(attr_types, self.attributes)
    }
}
