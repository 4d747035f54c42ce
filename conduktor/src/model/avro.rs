//! Canonical key order for AVRO schema documents
//!
//! Schemas submitted to the registry come back with keys in whatever order the
//! server chose. Rewriting both sides into one order keeps the Terraform diff
//! stable. Values are never changed, only the order of object keys.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Keys emitted first, in this order, when present
const PRIORITY_FIELDS: [&str; 7] = ["name", "type", "fields", "symbols", "items", "values", "size"];

#[derive(Debug, thiserror::Error)]
#[error("failed to normalize AVRO schema: {source}")]
pub struct NormalizeError {
    /// The input, unchanged
    pub original: String,
    #[source]
    pub source: serde_json::Error,
}

impl From<NormalizeError> for crate::error::Error {
    fn from(err: NormalizeError) -> Self {
        crate::error::Error::AvroNormalization(err.source)
    }
}

/// Normalize `schema` when `format` is AVRO (any case); other formats are
/// returned as-is. On failure the error carries the original text.
pub fn normalize_schema(schema: &str, format: &str) -> Result<String, NormalizeError> {
    if !format.eq_ignore_ascii_case("AVRO") {
        tracing::trace!(format, "schema format is not AVRO, leaving schema untouched");
        return Ok(schema.to_string());
    }

    let fail = |source| NormalizeError {
        original: schema.to_string(),
        source,
    };
    let document: Value = serde_json::from_str(schema).map_err(fail)?;
    serde_json::to_string(&Canonical(&document)).map_err(fail)
}

/// Object keys in canonical order: priority fields, then the rest sorted
fn ordered_keys(object: &serde_json::Map<String, Value>) -> Vec<&str> {
    let mut keys: Vec<&str> = PRIORITY_FIELDS
        .iter()
        .copied()
        .filter(|key| object.contains_key(*key))
        .collect();
    let mut rest: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !PRIORITY_FIELDS.contains(key))
        .collect();
    rest.sort_unstable();
    keys.extend(rest);
    keys
}

struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Value::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for key in ordered_keys(object) {
                    map.serialize_entry(key, &Canonical(&object[key]))?;
                }
                map.end()
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Canonical(item))?;
                }
                seq.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}
