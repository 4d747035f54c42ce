//! Core value types for tfplug
//!
//! `Dynamic` is the in-memory form of a Terraform value. Objects and sets are
//! kept distinct from maps and lists so that values built by a provider carry
//! the same shape the schema declares. Values decoded from the wire are untyped
//! until coerced with [`AttributeType::coerce`](crate::AttributeType::coerce).

use crate::attribute_type::AttributeType;
use crate::error::{Result, TfplugError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Marker used on the wire for values not yet known during planning
const UNKNOWN_SENTINEL: &str = "__unknown__";

static NULL: Dynamic = Dynamic::Null;

/// Dynamic represents Terraform values that can be of any type
#[derive(Debug, Clone)]
pub enum Dynamic {
    /// Explicit null value
    Null,
    /// Value not yet known (during planning)
    Unknown,
    Bool(bool),
    /// All numbers are f64 to match Terraform
    Number(f64),
    String(String),
    /// Ordered, allows duplicates
    List(Vec<Dynamic>),
    /// Unordered; equality ignores element order
    Set(Vec<Dynamic>),
    /// String keys to values of a single element type
    Map(HashMap<String, Dynamic>),
    /// Fixed set of named attributes
    Object(HashMap<String, Dynamic>),
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Null, Dynamic::Null) => true,
            (Dynamic::Unknown, Dynamic::Unknown) => true,
            (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
            (Dynamic::Number(a), Dynamic::Number(b)) => a == b,
            (Dynamic::String(a), Dynamic::String(b)) => a == b,
            (Dynamic::List(a), Dynamic::List(b)) => a == b,
            (Dynamic::Set(a), Dynamic::Set(b)) => same_elements(a, b),
            (Dynamic::Map(a), Dynamic::Map(b)) => a == b,
            (Dynamic::Object(a), Dynamic::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Multiset comparison: each element of `b` is matched at most once
fn same_elements(a: &[Dynamic], b: &[Dynamic]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    a.iter().all(|elem| {
        match (0..b.len()).find(|&idx| !matched[idx] && b[idx] == *elem) {
            Some(idx) => {
                matched[idx] = true;
                true
            }
            None => false,
        }
    })
}

impl Dynamic {
    pub fn string(value: impl Into<String>) -> Self {
        Dynamic::String(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    /// Null and unknown values both read as "not set" on the provider side
    pub fn is_null_or_unknown(&self) -> bool {
        matches!(self, Dynamic::Null | Dynamic::Unknown)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Unknown => "unknown",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Set(_) => "set",
            Dynamic::Map(_) => "map",
            Dynamic::Object(_) => "object",
        }
    }

    fn mismatch(&self, expected: &str) -> TfplugError {
        TfplugError::TypeMismatch {
            expected: expected.to_string(),
            actual: self.type_name().to_string(),
        }
    }

    pub fn as_optional_string(&self) -> Result<Option<&str>> {
        match self {
            Dynamic::Null | Dynamic::Unknown => Ok(None),
            Dynamic::String(s) => Ok(Some(s.as_str())),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn as_optional_bool(&self) -> Result<Option<bool>> {
        match self {
            Dynamic::Null | Dynamic::Unknown => Ok(None),
            Dynamic::Bool(b) => Ok(Some(*b)),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn as_optional_number(&self) -> Result<Option<f64>> {
        match self {
            Dynamic::Null | Dynamic::Unknown => Ok(None),
            Dynamic::Number(n) => Ok(Some(*n)),
            other => Err(other.mismatch("number")),
        }
    }

    /// Numbers that must hold whole values; fractional input is rejected
    pub fn as_optional_i64(&self) -> Result<Option<i64>> {
        match self.as_optional_number()? {
            None => Ok(None),
            Some(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 => {
                Ok(Some(n as i64))
            }
            Some(n) => Err(TfplugError::TypeMismatch {
                expected: "whole number".to_string(),
                actual: n.to_string(),
            }),
        }
    }

    /// Elements of a list or set; null and unknown collections are empty
    pub fn as_elements(&self) -> Result<&[Dynamic]> {
        match self {
            Dynamic::Null | Dynamic::Unknown => Ok(&[]),
            Dynamic::List(elems) | Dynamic::Set(elems) => Ok(elems.as_slice()),
            other => Err(other.mismatch("list or set")),
        }
    }

    /// Entries of a map or object; `None` for null and unknown values
    pub fn as_entries(&self) -> Result<Option<&HashMap<String, Dynamic>>> {
        match self {
            Dynamic::Null | Dynamic::Unknown => Ok(None),
            Dynamic::Map(entries) | Dynamic::Object(entries) => Ok(Some(entries)),
            other => Err(other.mismatch("map or object")),
        }
    }

    /// Attribute of an object. Attributes absent from the object, and every
    /// attribute of a null or unknown object, read as null.
    pub fn attribute(&self, name: &str) -> Result<&Dynamic> {
        match self {
            Dynamic::Null | Dynamic::Unknown => Ok(&NULL),
            Dynamic::Object(attrs) | Dynamic::Map(attrs) => Ok(attrs.get(name).unwrap_or(&NULL)),
            other => Err(other.mismatch("object")),
        }
    }
}

impl Serialize for Dynamic {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Dynamic::Null => serializer.serialize_unit(),
            Dynamic::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
            Dynamic::Bool(b) => serializer.serialize_bool(*b),
            Dynamic::Number(n) => serializer.serialize_f64(*n),
            Dynamic::String(s) => serializer.serialize_str(s),
            Dynamic::List(elems) | Dynamic::Set(elems) => elems.serialize(serializer),
            Dynamic::Map(entries) | Dynamic::Object(entries) => entries.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DynamicVisitor;

        impl<'de> Visitor<'de> for DynamicVisitor {
            type Value = Dynamic;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Terraform value")
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Null)
            }

            fn visit_some<D2>(self, deserializer: D2) -> std::result::Result<Dynamic, D2::Error>
            where
                D2: serde::Deserializer<'de>,
            {
                Dynamic::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Bool(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value as f64))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Dynamic, E> {
                Ok(Dynamic::Number(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Dynamic, E> {
                if value == UNKNOWN_SENTINEL {
                    Ok(Dynamic::Unknown)
                } else {
                    Ok(Dynamic::String(value.to_string()))
                }
            }

            fn visit_seq<V>(self, mut seq: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut elems = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    elems.push(elem);
                }
                Ok(Dynamic::List(elems))
            }

            fn visit_map<V>(self, mut map: V) -> std::result::Result<Dynamic, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut entries = HashMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    entries.insert(key, value);
                }
                Ok(Dynamic::Map(entries))
            }
        }

        deserializer.deserialize_any(DynamicVisitor)
    }
}

/// DynamicValue is a Terraform value as exchanged with Terraform core
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicValue {
    pub value: Dynamic,
}

impl DynamicValue {
    pub fn new(value: Dynamic) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self {
            value: Dynamic::Null,
        }
    }

    pub fn encode_msgpack(&self) -> Result<Vec<u8>> {
        if self.value.is_null() {
            return Ok(vec![]);
        }
        rmp_serde::encode::to_vec(&self.value)
            .map_err(|e| TfplugError::EncodingError(format!("msgpack encoding failed: {}", e)))
    }

    /// Decode msgpack and shape the result according to `ty`
    pub fn decode_msgpack(data: &[u8], ty: &AttributeType) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::null());
        }
        tracing::trace!(bytes = data.len(), "decoding msgpack value");
        let raw: Dynamic = rmp_serde::decode::from_slice(data)
            .map_err(|e| TfplugError::DecodingError(format!("msgpack decoding failed: {}", e)))?;
        Ok(Self::new(ty.coerce(raw)?))
    }

    pub fn encode_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.value)
            .map_err(|e| TfplugError::EncodingError(format!("json encoding failed: {}", e)))
    }

    /// Decode JSON and shape the result according to `ty`
    pub fn decode_json(data: &[u8], ty: &AttributeType) -> Result<Self> {
        tracing::trace!(bytes = data.len(), "decoding json value");
        let raw: Dynamic = serde_json::from_slice(data)
            .map_err(|e| TfplugError::DecodingError(format!("json decoding failed: {}", e)))?;
        Ok(Self::new(ty.coerce(raw)?))
    }
}

/// AttributePath represents a path to an attribute within a value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributePath {
    pub steps: Vec<AttributePathStep>,
}

impl AttributePath {
    pub fn new(name: &str) -> Self {
        Self {
            steps: vec![AttributePathStep::AttributeName(name.to_string())],
        }
    }

    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.steps
            .push(AttributePathStep::AttributeName(name.to_string()));
        self
    }

    pub fn index(mut self, idx: i64) -> Self {
        self.steps.push(AttributePathStep::ElementKeyInt(idx));
        self
    }

    pub fn key(mut self, key: &str) -> Self {
        self.steps
            .push(AttributePathStep::ElementKeyString(key.to_string()));
        self
    }

    /// Parse a rendered path such as `spec.permissions[0].name` or
    /// `policies["a.b"].range`. Quoted keys may contain dots.
    pub fn parse_dotted(path: &str) -> Self {
        let mut steps = Vec::new();
        let mut name = String::new();
        let mut chars = path.chars().peekable();

        fn flush(name: &mut String, steps: &mut Vec<AttributePathStep>) {
            if !name.is_empty() {
                steps.push(AttributePathStep::AttributeName(std::mem::take(name)));
            }
        }

        while let Some(c) = chars.next() {
            match c {
                '.' => flush(&mut name, &mut steps),
                '[' => {
                    flush(&mut name, &mut steps);
                    let mut inner = String::new();
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        while let Some(c) = chars.next() {
                            match c {
                                '\\' => inner.extend(chars.next()),
                                '"' => break,
                                c => inner.push(c),
                            }
                        }
                        chars.by_ref().find(|c| *c == ']');
                        steps.push(AttributePathStep::ElementKeyString(inner));
                    } else {
                        inner.extend(chars.by_ref().take_while(|c| *c != ']'));
                        match inner.parse::<i64>() {
                            Ok(idx) => steps.push(AttributePathStep::ElementKeyInt(idx)),
                            Err(_) => steps.push(AttributePathStep::ElementKeyString(inner)),
                        }
                    }
                }
                c => name.push(c),
            }
        }
        flush(&mut name, &mut steps);
        Self { steps }
    }

    /// Join two rendered paths, omitting the dot before an index step
    pub fn join_display(prefix: &str, suffix: &str) -> String {
        match (prefix.is_empty(), suffix.is_empty()) {
            (true, _) => suffix.to_string(),
            (_, true) => prefix.to_string(),
            _ if suffix.starts_with('[') => format!("{}{}", prefix, suffix),
            _ => format!("{}.{}", prefix, suffix),
        }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                AttributePathStep::AttributeName(name) if i == 0 => write!(f, "{}", name)?,
                AttributePathStep::AttributeName(name) => write!(f, ".{}", name)?,
                AttributePathStep::ElementKeyString(key) => write!(f, "[{:?}]", key)?,
                AttributePathStep::ElementKeyInt(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Individual step in an AttributePath
#[derive(Debug, Clone, PartialEq)]
pub enum AttributePathStep {
    /// Access attribute by name in object
    AttributeName(String),
    /// Access element by string key (for maps)
    ElementKeyString(String),
    /// Access element by integer index (for lists)
    ElementKeyInt(i64),
}

/// Diagnostic represents a warning or error reported back to Terraform
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub summary: String,
    pub detail: String,
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: &[(&str, Dynamic)]) -> Dynamic {
        Dynamic::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn set_equality_ignores_order() {
        let a = Dynamic::Set(vec![Dynamic::string("a"), Dynamic::string("b")]);
        let b = Dynamic::Set(vec![Dynamic::string("b"), Dynamic::string("a")]);
        assert_eq!(a, b);

        let list_a = Dynamic::List(vec![Dynamic::string("a"), Dynamic::string("b")]);
        let list_b = Dynamic::List(vec![Dynamic::string("b"), Dynamic::string("a")]);
        assert_ne!(list_a, list_b);
    }

    #[test]
    fn null_and_unknown_read_as_absent() {
        assert_eq!(Dynamic::Null.as_optional_string().unwrap(), None);
        assert_eq!(Dynamic::Unknown.as_optional_bool().unwrap(), None);
        assert!(Dynamic::Null.as_elements().unwrap().is_empty());
        assert!(Dynamic::Unknown.as_entries().unwrap().is_none());
        assert!(Dynamic::Null.attribute("anything").unwrap().is_null());
    }

    #[test]
    fn accessor_rejects_wrong_type() {
        let err = Dynamic::Number(1.0).as_optional_string().unwrap_err();
        assert!(matches!(
            err,
            TfplugError::TypeMismatch { ref expected, ref actual }
                if expected == "string" && actual == "number"
        ));
    }

    #[test]
    fn fractional_numbers_are_not_integers() {
        assert_eq!(Dynamic::Number(3.0).as_optional_i64().unwrap(), Some(3));
        assert!(Dynamic::Number(3.5).as_optional_i64().is_err());
    }

    #[test]
    fn set_equality_counts_repeats() {
        let a = Dynamic::string("a");
        let b = Dynamic::string("b");
        let repeated = Dynamic::Set(vec![a.clone(), a.clone()]);
        let distinct = Dynamic::Set(vec![a.clone(), b.clone()]);
        assert_ne!(repeated, distinct);
        assert_ne!(distinct, repeated);

        let twice_each = Dynamic::Set(vec![a.clone(), b.clone(), a.clone(), b.clone()]);
        let reordered = Dynamic::Set(vec![b.clone(), a.clone(), b, a]);
        assert_eq!(twice_each, reordered);
    }

    #[test]
    fn nested_sets_compare_unordered() {
        let inner =
            |items: &[&str]| Dynamic::Set(items.iter().map(|s| Dynamic::string(*s)).collect());
        let left = Dynamic::Set(vec![inner(&["x", "y"]), inner(&["z"])]);
        let right = Dynamic::Set(vec![inner(&["z"]), inner(&["y", "x"])]);
        assert_eq!(left, right);
    }

    #[test]
    fn path_display_uses_dots_and_brackets() {
        let path = AttributePath::new("spec")
            .attribute("policies")
            .key("metadata.labels.team")
            .attribute("one_of")
            .attribute("values")
            .index(2);
        assert_eq!(
            path.to_string(),
            "spec.policies[\"metadata.labels.team\"].one_of.values[2]"
        );
    }

    #[test]
    fn parse_dotted_keeps_quoted_keys_whole() {
        let path = AttributePath::parse_dotted("spec.policies[\"metadata.name\"].match");
        assert_eq!(
            path,
            AttributePath::new("spec")
                .attribute("policies")
                .key("metadata.name")
                .attribute("match")
        );
        assert_eq!(AttributePath::parse_dotted(&path.to_string()), path);
    }

    #[test]
    fn parse_dotted_reads_indexes() {
        let path = AttributePath::parse_dotted("spec.permissions[1].name");
        assert_eq!(
            path,
            AttributePath::new("spec")
                .attribute("permissions")
                .index(1)
                .attribute("name")
        );
    }

    #[test]
    fn json_round_trip_preserves_unknown() {
        let ty = AttributeType::object([
            ("name", AttributeType::String),
            ("id", AttributeType::Number),
        ]);
        let value = DynamicValue::new(object(&[
            ("name", Dynamic::string("alice")),
            ("id", Dynamic::Unknown),
        ]));

        let encoded = value.encode_json().unwrap();
        let decoded = DynamicValue::decode_json(&encoded, &ty).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn msgpack_round_trip_restores_sets() {
        let ty = AttributeType::object([("members", AttributeType::set(AttributeType::String))]);
        let value = DynamicValue::new(object(&[(
            "members",
            Dynamic::Set(vec![Dynamic::string("a"), Dynamic::string("b")]),
        )]));

        let encoded = value.encode_msgpack().unwrap();
        let decoded = DynamicValue::decode_msgpack(&encoded, &ty).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn empty_msgpack_is_null() {
        let decoded = DynamicValue::decode_msgpack(&[], &AttributeType::String).unwrap();
        assert!(decoded.value.is_null());
    }
}
