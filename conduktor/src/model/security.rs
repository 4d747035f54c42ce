//! Authentication settings shared by schema registries and Kafka Connect
//!
//! Each union is tagged on the wire by its `type` field. Decoding a document
//! with an unrecognized or missing `type` fails.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BearerToken {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslAuth {
    pub key: String,
    pub certificate_chain: String,
}

/// Confluent-compatible schema registry security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConfluentLikeSecurity {
    NoSecurity,
    BasicAuth(BasicAuth),
    BearerToken(BearerToken),
    #[serde(rename = "SSLAuth")]
    SslAuth(SslAuth),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlueCredentials {
    pub access_key_id: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlueFromContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlueFromRole {
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlueIamAnywhere {
    pub trust_anchor_arn: String,
    pub profile_arn: String,
    pub role_arn: String,
    pub certificate: String,
    pub private_key: String,
}

/// AWS Glue schema registry security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GlueSecurity {
    Credentials(GlueCredentials),
    FromContext(GlueFromContext),
    FromRole(GlueFromRole),
    #[serde(rename = "IAMAnywhere")]
    IamAnywhere(GlueIamAnywhere),
}

/// Kafka Connect cluster security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KafkaConnectSecurity {
    BasicAuth(BasicAuth),
    BearerToken(BearerToken),
    #[serde(rename = "SSLAuth")]
    SslAuth(SslAuth),
}
