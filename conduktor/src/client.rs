//! Generic resource envelope exchanged with the Conduktor API client
//!
//! Every resource kind travels as `{kind, apiVersion, metadata, spec}`. The
//! envelope keeps the identifying fields next to the raw document so the
//! HTTP layer can route it without knowing the kind's schema.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub kind: String,
    pub version: String,
    pub name: String,
    pub metadata: Map<String, Value>,
    /// The complete JSON document
    pub json: Vec<u8>,
}

impl Resource {
    pub fn from_json(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// The document as a JSON value
    pub fn document(&self) -> serde_json::Result<Value> {
        serde_json::from_slice(&self.json)
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let document = Value::deserialize(deserializer)?;
        let object = document
            .as_object()
            .ok_or_else(|| D::Error::custom("resource must be a JSON object"))?;

        let text = |field: &str| -> String {
            object
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let kind = text("kind");
        let version = text("apiVersion");
        let metadata = match object.get("metadata") {
            Some(Value::Object(metadata)) => metadata.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => return Err(D::Error::custom("resource metadata must be a JSON object")),
        };
        let name = metadata
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let json = serde_json::to_vec(&document).map_err(D::Error::custom)?;

        Ok(Resource {
            kind,
            version,
            name,
            metadata,
            json,
        })
    }
}

impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let document: Value = serde_json::from_slice(&self.json).map_err(S::Error::custom)?;
        document.serialize(serializer)
    }
}
