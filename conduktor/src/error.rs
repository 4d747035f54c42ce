//! Error types for the Conduktor provider

use std::fmt;
use tfplug::{Diagnostic, TfplugError};

/// Which way a conversion was going when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    FromTerraform,
    IntoTerraform,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::FromTerraform => f.write_str("FromTerraform"),
            Direction::IntoTerraform => f.write_str("IntoTerraform"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{direction} conversion failed at {path}: {source}")]
    Mapping {
        direction: Direction,
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Value(#[from] TfplugError),

    #[error("unknown {union} type {value:?}")]
    UnknownVariant { union: &'static str, value: String },

    #[error("{union} has no type set")]
    EmptyUnion { union: &'static str },

    #[error("{union} has more than one type set: {variants}")]
    AmbiguousUnion {
        union: &'static str,
        variants: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to normalize AVRO schema: {0}")]
    AvroNormalization(#[source] serde_json::Error),

    #[error("expected resource kind {expected}, got {actual}")]
    KindMismatch { expected: &'static str, actual: String },

    #[error("Unknown resource: {0}")]
    UnknownResourceType(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap with a field path and direction. Wrapping an error that already
    /// carries a path in the same direction prefixes that path instead of
    /// nesting, so the outermost error reads `spec.permissions[0].name`.
    pub fn at(self, direction: Direction, path: &str) -> Self {
        match self {
            Error::Mapping {
                direction: inner_direction,
                path: inner_path,
                source,
            } if inner_direction == direction => Error::Mapping {
                direction,
                path: tfplug::AttributePath::join_display(path, &inner_path),
                source,
            },
            other => Error::Mapping {
                direction,
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Field path of a mapping error
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Mapping { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The innermost error, with mapping context stripped
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Mapping { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Attach field context to any fallible conversion step
pub trait ResultExt<T> {
    fn at(self, direction: Direction, path: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn at(self, direction: Direction, path: &str) -> Result<T> {
        self.map_err(|e| e.into().at(direction, path))
    }
}

impl From<&Error> for Diagnostic {
    fn from(err: &Error) -> Self {
        let summary = match err.root_cause() {
            Error::UnknownVariant { .. }
            | Error::EmptyUnion { .. }
            | Error::AmbiguousUnion { .. } => "Invalid polymorphic block",
            Error::InvalidConfiguration(_) => "Invalid provider configuration",
            Error::Json(_) | Error::AvroNormalization(_) => "Invalid JSON",
            _ => "Conversion error",
        };
        let diagnostic = Diagnostic::error(summary, err.to_string());
        match err.path() {
            Some(path) => diagnostic.with_attribute(tfplug::AttributePath::parse_dotted(path)),
            None => diagnostic,
        }
    }
}
