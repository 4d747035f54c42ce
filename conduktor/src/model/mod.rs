//! Internal REST models for Console and Gateway resources

pub mod avro;
pub mod console;
pub mod gateway;
pub mod security;

use crate::client;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifies the kind and API version a metadata type belongs to
pub trait ResourceKind {
    const KIND: &'static str;
    const API_VERSION: &'static str;
}

/// `{kind, apiVersion, metadata, spec}` document of one resource kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<M, S> {
    pub kind: String,
    pub api_version: String,
    pub metadata: M,
    pub spec: S,
}

impl<M: ResourceKind, S> Manifest<M, S> {
    pub fn new(metadata: M, spec: S) -> Self {
        Self {
            kind: M::KIND.to_string(),
            api_version: M::API_VERSION.to_string(),
            metadata,
            spec,
        }
    }
}

impl<M, S> Manifest<M, S>
where
    M: ResourceKind + Serialize + DeserializeOwned,
    S: Serialize + DeserializeOwned,
{
    pub fn to_client_resource(&self) -> Result<client::Resource> {
        let json = serde_json::to_vec(self)?;
        Ok(client::Resource::from_json(&json)?)
    }

    pub fn from_client_resource(resource: &client::Resource) -> Result<Self> {
        if resource.kind != M::KIND {
            tracing::warn!(
                expected = M::KIND,
                actual = %resource.kind,
                "client resource kind does not match"
            );
            return Err(Error::KindMismatch {
                expected: M::KIND,
                actual: resource.kind.clone(),
            });
        }
        Ok(serde_json::from_slice(&resource.json)?)
    }
}
