//! Conduktor Terraform provider: resource conversions and configuration
//!
//! Each Terraform resource type has a mapper that turns a planned Terraform
//! value into the REST document the Conduktor Console or Gateway API expects,
//! and turns an API document back into Terraform state.

pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod resources;

pub use client::Resource;
pub use config::{ProviderConfig, ProviderMode};
pub use error::{Direction, Error, Result, ResultExt};
pub use mapper::ResourceMapper;
pub use model::{Manifest, ResourceKind};
pub use resources::{
    client_resource_to_terraform, provider_mode, resource_type, resource_type_names,
    terraform_to_client_resource,
};
