//! tfplug - Terraform value model for Rust providers
//!
//! Carries the pieces of the Terraform plugin framework that provider code
//! converts to and from: dynamic values, attribute types, typed constructors,
//! attribute paths and diagnostics.

pub mod attribute_type;
pub mod error;
pub mod types;
pub mod value;

pub use attribute_type::AttributeType;
pub use error::{Result, TfplugError};
pub use types::{
    AttributePath, AttributePathStep, Diagnostic, DiagnosticSeverity, Dynamic, DynamicValue,
};
pub use value::{list_value, map_value, object_value, set_value, ObjectBuilder};
