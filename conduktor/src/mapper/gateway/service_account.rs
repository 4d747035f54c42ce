use crate::error::{Direction, Result, ResultExt};
use crate::mapper::{
    build_object, read_block, read_required_string, read_string, read_strings,
    string_set_value, string_value, EmptyAs, ResourceMapper,
};
use crate::model::gateway::service_account::{
    GatewayServiceAccountMetadata, GatewayServiceAccountResource, GatewayServiceAccountSpec,
};
use crate::model::Manifest;
use tfplug::{AttributeType, Dynamic, ObjectBuilder};

pub struct GatewayServiceAccountMapper;

fn spec_type() -> AttributeType {
    AttributeType::object([
        ("type", AttributeType::String),
        ("external_names", AttributeType::set(AttributeType::String)),
    ])
}

impl ResourceMapper for GatewayServiceAccountMapper {
    const TYPE_NAME: &'static str = "conduktor_gateway_service_account_v2";

    type Metadata = GatewayServiceAccountMetadata;
    type Spec = GatewayServiceAccountSpec;

    fn resource_type() -> AttributeType {
        AttributeType::object([
            ("name", AttributeType::String),
            ("vcluster", AttributeType::String),
            ("spec", spec_type()),
        ])
    }

    fn tf_to_internal_model(value: &Dynamic) -> Result<GatewayServiceAccountResource> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            "mapping terraform value to gateway service account"
        );
        let metadata = GatewayServiceAccountMetadata {
            name: read_required_string(value, "name")?,
            vcluster: read_string(value, "vcluster")?,
        };
        let spec = read_block(value, "spec", |spec| {
            Ok(GatewayServiceAccountSpec {
                account_type: read_required_string(spec, "type")?,
                external_names: read_strings(spec, "external_names")?,
            })
        })?;
        Ok(Manifest::new(metadata, spec))
    }

    fn internal_model_to_terraform(model: &GatewayServiceAccountResource) -> Result<Dynamic> {
        tracing::debug!(
            resource = Self::TYPE_NAME,
            name = %model.metadata.name,
            "mapping gateway service account to terraform value"
        );
        let spec = ObjectBuilder::new()
            .attribute("type", Dynamic::string(&model.spec.account_type))
            .attribute(
                "external_names",
                string_set_value(&model.spec.external_names, EmptyAs::Null)?,
            );
        let spec = build_object(spec, &spec_type()).at(Direction::IntoTerraform, "spec")?;

        let resource = ObjectBuilder::new()
            .attribute("name", Dynamic::string(&model.metadata.name))
            .attribute("vcluster", string_value(model.metadata.vcluster.as_deref()))
            .attribute("spec", spec);
        build_object(resource, &Self::resource_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn external_account_round_trips() {
        let model = Manifest::new(
            GatewayServiceAccountMetadata {
                name: "user1".to_string(),
                vcluster: Some("vc-a".to_string()),
            },
            GatewayServiceAccountSpec {
                account_type: "EXTERNAL".to_string(),
                external_names: vec!["externalName".to_string()],
            },
        );
        let value = GatewayServiceAccountMapper::internal_model_to_terraform(&model).unwrap();
        assert_eq!(GatewayServiceAccountMapper::tf_to_internal_model(&value).unwrap(), model);

        let document: serde_json::Value =
            serde_json::from_slice(&model.to_client_resource().unwrap().json).unwrap();
        assert_eq!(document["apiVersion"], json!("gateway/v2"));
        assert_eq!(document["metadata"], json!({"name": "user1", "vCluster": "vc-a"}));
        assert_eq!(
            document["spec"],
            json!({"type": "EXTERNAL", "externalNames": ["externalName"]})
        );
    }

    #[test]
    fn local_account_has_null_names() {
        let model = Manifest::new(
            GatewayServiceAccountMetadata {
                name: "user2".to_string(),
                vcluster: None,
            },
            GatewayServiceAccountSpec {
                account_type: "LOCAL".to_string(),
                external_names: vec![],
            },
        );
        let value = GatewayServiceAccountMapper::internal_model_to_terraform(&model).unwrap();
        assert_eq!(value.attribute("vcluster").unwrap(), &Dynamic::Null);
        assert_eq!(
            value.attribute("spec").unwrap().attribute("external_names").unwrap(),
            &Dynamic::Null
        );
        assert_eq!(GatewayServiceAccountMapper::tf_to_internal_model(&value).unwrap(), model);
    }
}
