//! Flat `security` blocks of schema registries and Kafka Connect clusters
//!
//! Terraform carries every variant's attributes side by side in one object;
//! `type` picks the variant and the attributes of other variants stay null.

use crate::error::{Error, Result};
use crate::mapper::{build_object, flat_object, read_required_string, read_string, read_union_tag};
use crate::model::security::{
    BasicAuth, BearerToken, ConfluentLikeSecurity, GlueCredentials, GlueFromContext,
    GlueFromRole, GlueIamAnywhere, GlueSecurity, KafkaConnectSecurity, SslAuth,
};
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

const CONNECT_ATTRIBUTES: [&str; 6] = [
    "type",
    "username",
    "password",
    "token",
    "key",
    "certificate_chain",
];

const GLUE_ATTRIBUTES: [&str; 9] = [
    "access_key_id",
    "secret_key",
    "profile",
    "role",
    "trust_anchor_arn",
    "profile_arn",
    "role_arn",
    "certificate",
    "private_key",
];

/// Security of a schema registry, covering both Confluent-like and Glue
pub(crate) fn registry_security_type() -> AttributeType {
    AttributeType::object(
        CONNECT_ATTRIBUTES
            .iter()
            .chain(GLUE_ATTRIBUTES.iter())
            .map(|name| (*name, AttributeType::String)),
    )
}

pub(crate) fn connect_security_type() -> AttributeType {
    AttributeType::object(
        CONNECT_ATTRIBUTES
            .iter()
            .map(|name| (*name, AttributeType::String)),
    )
}

fn read_basic_auth(obj: &Dynamic) -> Result<BasicAuth> {
    Ok(BasicAuth {
        username: read_required_string(obj, "username")?,
        password: read_required_string(obj, "password")?,
    })
}

fn read_bearer_token(obj: &Dynamic) -> Result<BearerToken> {
    Ok(BearerToken {
        token: read_required_string(obj, "token")?,
    })
}

fn read_ssl_auth(obj: &Dynamic) -> Result<SslAuth> {
    Ok(SslAuth {
        key: read_required_string(obj, "key")?,
        certificate_chain: read_required_string(obj, "certificate_chain")?,
    })
}

/// A null block reads as `NoSecurity`
pub(crate) fn read_confluent_like_security(obj: Option<&Dynamic>) -> Result<ConfluentLikeSecurity> {
    const UNION: &str = "schema registry security";
    let Some(obj) = obj else {
        return Ok(ConfluentLikeSecurity::NoSecurity);
    };
    let tag = read_union_tag(obj, UNION)?;
    match tag.as_str() {
        "NoSecurity" => Ok(ConfluentLikeSecurity::NoSecurity),
        "BasicAuth" => Ok(ConfluentLikeSecurity::BasicAuth(read_basic_auth(obj)?)),
        "BearerToken" => Ok(ConfluentLikeSecurity::BearerToken(read_bearer_token(obj)?)),
        "SSLAuth" => Ok(ConfluentLikeSecurity::SslAuth(read_ssl_auth(obj)?)),
        _ => Err(Error::UnknownVariant {
            union: UNION,
            value: tag,
        }),
    }
}

pub(crate) fn read_glue_security(obj: Option<&Dynamic>) -> Result<GlueSecurity> {
    const UNION: &str = "glue security";
    let Some(obj) = obj else {
        return Err(Error::EmptyUnion { union: UNION });
    };
    let tag = read_union_tag(obj, UNION)?;
    match tag.as_str() {
        "Credentials" => Ok(GlueSecurity::Credentials(GlueCredentials {
            access_key_id: read_required_string(obj, "access_key_id")?,
            secret_key: read_required_string(obj, "secret_key")?,
        })),
        "FromContext" => Ok(GlueSecurity::FromContext(GlueFromContext {
            profile: read_string(obj, "profile")?,
        })),
        "FromRole" => Ok(GlueSecurity::FromRole(GlueFromRole {
            role: read_required_string(obj, "role")?,
        })),
        "IAMAnywhere" => Ok(GlueSecurity::IamAnywhere(GlueIamAnywhere {
            trust_anchor_arn: read_required_string(obj, "trust_anchor_arn")?,
            profile_arn: read_required_string(obj, "profile_arn")?,
            role_arn: read_required_string(obj, "role_arn")?,
            certificate: read_required_string(obj, "certificate")?,
            private_key: read_required_string(obj, "private_key")?,
        })),
        _ => Err(Error::UnknownVariant {
            union: UNION,
            value: tag,
        }),
    }
}

pub(crate) fn read_connect_security(obj: &Dynamic) -> Result<KafkaConnectSecurity> {
    const UNION: &str = "kafka connect security";
    let tag = read_union_tag(obj, UNION)?;
    match tag.as_str() {
        "BasicAuth" => Ok(KafkaConnectSecurity::BasicAuth(read_basic_auth(obj)?)),
        "BearerToken" => Ok(KafkaConnectSecurity::BearerToken(read_bearer_token(obj)?)),
        "SSLAuth" => Ok(KafkaConnectSecurity::SslAuth(read_ssl_auth(obj)?)),
        _ => Err(Error::UnknownVariant {
            union: UNION,
            value: tag,
        }),
    }
}

fn with_basic_auth(builder: ObjectBuilder, auth: &BasicAuth) -> ObjectBuilder {
    builder
        .attribute("type", Dynamic::string("BasicAuth"))
        .attribute("username", Dynamic::string(&auth.username))
        .attribute("password", Dynamic::string(&auth.password))
}

fn with_bearer_token(builder: ObjectBuilder, auth: &BearerToken) -> ObjectBuilder {
    builder
        .attribute("type", Dynamic::string("BearerToken"))
        .attribute("token", Dynamic::string(&auth.token))
}

fn with_ssl_auth(builder: ObjectBuilder, auth: &SslAuth) -> ObjectBuilder {
    builder
        .attribute("type", Dynamic::string("SSLAuth"))
        .attribute("key", Dynamic::string(&auth.key))
        .attribute("certificate_chain", Dynamic::string(&auth.certificate_chain))
}

pub(crate) fn write_confluent_like_security(security: &ConfluentLikeSecurity) -> Result<Dynamic> {
    let ty = registry_security_type();
    let builder = flat_object(&ty);
    let builder = match security {
        ConfluentLikeSecurity::NoSecurity => {
            builder.attribute("type", Dynamic::string("NoSecurity"))
        }
        ConfluentLikeSecurity::BasicAuth(auth) => with_basic_auth(builder, auth),
        ConfluentLikeSecurity::BearerToken(auth) => with_bearer_token(builder, auth),
        ConfluentLikeSecurity::SslAuth(auth) => with_ssl_auth(builder, auth),
    };
    build_object(builder, &ty)
}

pub(crate) fn write_glue_security(security: &GlueSecurity) -> Result<Dynamic> {
    let ty = registry_security_type();
    let builder = flat_object(&ty);
    let builder = match security {
        GlueSecurity::Credentials(creds) => builder
            .attribute("type", Dynamic::string("Credentials"))
            .attribute("access_key_id", Dynamic::string(&creds.access_key_id))
            .attribute("secret_key", Dynamic::string(&creds.secret_key)),
        GlueSecurity::FromContext(context) => builder
            .attribute("type", Dynamic::string("FromContext"))
            .attribute("profile", crate::mapper::string_value(context.profile.as_deref())),
        GlueSecurity::FromRole(role) => builder
            .attribute("type", Dynamic::string("FromRole"))
            .attribute("role", Dynamic::string(&role.role)),
        GlueSecurity::IamAnywhere(iam) => builder
            .attribute("type", Dynamic::string("IAMAnywhere"))
            .attribute("trust_anchor_arn", Dynamic::string(&iam.trust_anchor_arn))
            .attribute("profile_arn", Dynamic::string(&iam.profile_arn))
            .attribute("role_arn", Dynamic::string(&iam.role_arn))
            .attribute("certificate", Dynamic::string(&iam.certificate))
            .attribute("private_key", Dynamic::string(&iam.private_key)),
    };
    build_object(builder, &ty)
}

pub(crate) fn write_connect_security(security: &KafkaConnectSecurity) -> Result<Dynamic> {
    let ty = connect_security_type();
    let builder = flat_object(&ty);
    let builder = match security {
        KafkaConnectSecurity::BasicAuth(auth) => with_basic_auth(builder, auth),
        KafkaConnectSecurity::BearerToken(auth) => with_bearer_token(builder, auth),
        KafkaConnectSecurity::SslAuth(auth) => with_ssl_auth(builder, auth),
    };
    build_object(builder, &ty)
}
