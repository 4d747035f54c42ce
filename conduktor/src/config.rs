//! Provider block configuration
//!
//! Every setting is read from the provider block first and falls back to
//! environment variables. Which variables apply depends on the mode.

use crate::error::{Error, Result};
use crate::resources;
use std::fmt;
use std::str::FromStr;
use tfplug::{AttributePath, AttributeType, Diagnostic, Dynamic};

/// Which Conduktor API the provider talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderMode {
    #[default]
    Console,
    Gateway,
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderMode::Console => f.write_str("console"),
            ProviderMode::Gateway => f.write_str("gateway"),
        }
    }
}

impl FromStr for ProviderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(ProviderMode::Console),
            "gateway" => Ok(ProviderMode::Gateway),
            other => Err(Error::InvalidConfiguration(format!(
                "mode must be \"console\" or \"gateway\", got {:?}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderConfig {
    pub mode: ProviderMode,
    pub base_url: String,
    pub api_token: Option<String>,
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    pub cert: Option<String>,
    pub cacert: Option<String>,
    pub key: Option<String>,
    pub insecure: bool,
    /// Settings that were accepted but have no effect
    pub warnings: Vec<Diagnostic>,
}

struct EnvNames {
    base_url: &'static [&'static str],
    api_token: &'static [&'static str],
    admin_user: &'static [&'static str],
    admin_password: &'static [&'static str],
    cert: &'static [&'static str],
    cacert: &'static [&'static str],
    key: &'static [&'static str],
    insecure: &'static [&'static str],
}

const CONSOLE_ENV: EnvNames = EnvNames {
    base_url: &["CDK_CONSOLE_BASE_URL", "CDK_BASE_URL"],
    api_token: &["CDK_API_TOKEN", "CDK_API_KEY"],
    admin_user: &["CDK_CONSOLE_USER", "CDK_ADMIN_EMAIL"],
    admin_password: &["CDK_CONSOLE_PASSWORD", "CDK_ADMIN_PASSWORD"],
    cert: &["CDK_CONSOLE_CERT", "CDK_CERT"],
    cacert: &["CDK_CONSOLE_CACERT", "CDK_CACERT"],
    key: &["CDK_CONSOLE_KEY", "CDK_KEY"],
    insecure: &["CDK_CONSOLE_INSECURE", "CDK_INSECURE"],
};

const GATEWAY_ENV: EnvNames = EnvNames {
    base_url: &["CDK_GATEWAY_BASE_URL"],
    api_token: &[],
    admin_user: &["CDK_GATEWAY_USER"],
    admin_password: &["CDK_GATEWAY_PASSWORD"],
    cert: &["CDK_GATEWAY_CERT"],
    cacert: &["CDK_GATEWAY_CACERT"],
    key: &["CDK_GATEWAY_KEY"],
    insecure: &["CDK_GATEWAY_INSECURE"],
};

const MODE_ENV: &str = "CDK_PROVIDER_MODE";

fn from_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()))
}

fn setting(config: &Dynamic, name: &str, env: &[&str]) -> Result<Option<String>> {
    let value = config
        .attribute(name)?
        .as_optional_string()?
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok(value.or_else(|| from_env(env)))
}

impl ProviderConfig {
    /// Object type of the provider block
    pub fn config_type() -> AttributeType {
        AttributeType::object([
            ("mode", AttributeType::String),
            ("base_url", AttributeType::String),
            ("api_token", AttributeType::String),
            ("admin_user", AttributeType::String),
            ("admin_password", AttributeType::String),
            ("cert", AttributeType::String),
            ("cacert", AttributeType::String),
            ("key", AttributeType::String),
            ("insecure", AttributeType::Bool),
        ])
    }

    /// Resolve the provider block against the environment and validate it
    pub fn from_terraform(config: &Dynamic) -> Result<Self> {
        let mode = match setting(config, "mode", &[MODE_ENV])? {
            Some(mode) => mode.parse()?,
            None => ProviderMode::default(),
        };
        let env = match mode {
            ProviderMode::Console => &CONSOLE_ENV,
            ProviderMode::Gateway => &GATEWAY_ENV,
        };

        let insecure = match config.attribute("insecure")?.as_optional_bool()? {
            Some(insecure) => insecure,
            None => match from_env(env.insecure) {
                Some(raw) => raw.parse::<bool>().map_err(|_| {
                    Error::InvalidConfiguration(format!(
                        "insecure must be true or false, got {:?}",
                        raw
                    ))
                })?,
                None => false,
            },
        };

        let api_token = setting(config, "api_token", env.api_token)?;
        let mut warnings = Vec::new();
        if mode == ProviderMode::Gateway && api_token.is_some() {
            tracing::warn!("api_token is ignored in gateway mode");
            warnings.push(
                Diagnostic::warning(
                    "Ignored provider setting",
                    "api_token is not used in gateway mode, set admin_user and admin_password",
                )
                .with_attribute(AttributePath::new("api_token")),
            );
        }

        let resolved = ProviderConfig {
            mode,
            base_url: setting(config, "base_url", env.base_url)?.unwrap_or_default(),
            api_token: api_token.filter(|_| mode == ProviderMode::Console),
            admin_user: setting(config, "admin_user", env.admin_user)?,
            admin_password: setting(config, "admin_password", env.admin_password)?,
            cert: setting(config, "cert", env.cert)?,
            cacert: setting(config, "cacert", env.cacert)?,
            key: setting(config, "key", env.key)?,
            insecure,
            warnings,
        };
        resolved.validate()?;
        tracing::debug!(
            mode = %resolved.mode,
            base_url = %resolved.base_url,
            "provider configured"
        );
        Ok(resolved)
    }

    fn validate(&self) -> Result<()> {
        let env = match self.mode {
            ProviderMode::Console => &CONSOLE_ENV,
            ProviderMode::Gateway => &GATEWAY_ENV,
        };
        if self.base_url.is_empty() {
            return Err(Error::InvalidConfiguration(format!(
                "base_url is required (set in provider config or {} env var)",
                env.base_url.join(" / ")
            )));
        }
        let has_login = self.admin_user.is_some() && self.admin_password.is_some();
        match self.mode {
            ProviderMode::Console if self.api_token.is_none() && !has_login => {
                Err(Error::InvalidConfiguration(
                    "console mode needs api_token or admin_user and admin_password".to_string(),
                ))
            }
            ProviderMode::Gateway if !has_login => Err(Error::InvalidConfiguration(
                "gateway mode needs admin_user and admin_password".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Whether resource `type_name` can be managed in the configured mode
    pub fn supports(&self, type_name: &str) -> bool {
        resources::provider_mode(type_name) == Some(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    const ALL_ENV: [&str; 24] = [
        "CDK_PROVIDER_MODE",
        "CDK_CONSOLE_BASE_URL",
        "CDK_BASE_URL",
        "CDK_API_TOKEN",
        "CDK_API_KEY",
        "CDK_CONSOLE_USER",
        "CDK_ADMIN_EMAIL",
        "CDK_CONSOLE_PASSWORD",
        "CDK_ADMIN_PASSWORD",
        "CDK_CONSOLE_CERT",
        "CDK_CERT",
        "CDK_CONSOLE_CACERT",
        "CDK_CACERT",
        "CDK_CONSOLE_KEY",
        "CDK_KEY",
        "CDK_CONSOLE_INSECURE",
        "CDK_INSECURE",
        "CDK_GATEWAY_BASE_URL",
        "CDK_GATEWAY_USER",
        "CDK_GATEWAY_PASSWORD",
        "CDK_GATEWAY_CERT",
        "CDK_GATEWAY_CACERT",
        "CDK_GATEWAY_KEY",
        "CDK_GATEWAY_INSECURE",
    ];

    fn clear_env() {
        for name in ALL_ENV {
            std::env::remove_var(name);
        }
    }

    fn block(entries: &[(&str, Dynamic)]) -> Dynamic {
        let mut attrs: HashMap<String, Dynamic> = ProviderConfig::config_type()
            .attribute_types()
            .unwrap()
            .keys()
            .map(|name| (name.clone(), Dynamic::Null))
            .collect();
        for (name, value) in entries {
            attrs.insert(name.to_string(), value.clone());
        }
        Dynamic::Object(attrs)
    }

    #[test]
    #[serial]
    fn console_settings_fall_back_to_env() {
        clear_env();
        std::env::set_var("CDK_BASE_URL", "http://localhost:8080");
        std::env::set_var("CDK_API_KEY", "secret-key");
        std::env::set_var("CDK_INSECURE", "true");

        let config = ProviderConfig::from_terraform(&block(&[])).unwrap();
        assert_eq!(config.mode, ProviderMode::Console);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.api_token.as_deref(), Some("secret-key"));
        assert!(config.insecure);

        clear_env();
    }

    #[test]
    #[serial]
    fn config_block_wins_over_env() {
        clear_env();
        std::env::set_var("CDK_CONSOLE_BASE_URL", "http://from-env:8080");
        std::env::set_var("CDK_API_TOKEN", "env-token");

        let config = ProviderConfig::from_terraform(&block(&[
            ("base_url", Dynamic::string("http://from-config:8080")),
            ("insecure", Dynamic::Bool(false)),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://from-config:8080");
        assert_eq!(config.api_token.as_deref(), Some("env-token"));
        assert!(!config.insecure);

        clear_env();
    }

    #[test]
    #[serial]
    fn console_user_variable_takes_precedence() {
        clear_env();
        std::env::set_var("CDK_CONSOLE_BASE_URL", "http://localhost:8080");
        std::env::set_var("CDK_CONSOLE_USER", "admin@console");
        std::env::set_var("CDK_ADMIN_EMAIL", "admin@legacy");
        std::env::set_var("CDK_ADMIN_PASSWORD", "pass");

        let config = ProviderConfig::from_terraform(&block(&[])).unwrap();
        assert_eq!(config.admin_user.as_deref(), Some("admin@console"));
        assert_eq!(config.admin_password.as_deref(), Some("pass"));

        clear_env();
    }

    #[test]
    #[serial]
    fn gateway_mode_uses_gateway_variables() {
        clear_env();
        std::env::set_var("CDK_PROVIDER_MODE", "gateway");
        std::env::set_var("CDK_BASE_URL", "http://console:8080");
        std::env::set_var("CDK_GATEWAY_BASE_URL", "http://gateway:8888");
        std::env::set_var("CDK_GATEWAY_USER", "admin");
        std::env::set_var("CDK_GATEWAY_PASSWORD", "conduktor");

        let config = ProviderConfig::from_terraform(&block(&[])).unwrap();
        assert_eq!(config.mode, ProviderMode::Gateway);
        assert_eq!(config.base_url, "http://gateway:8888");
        assert!(config.supports("conduktor_gateway_virtual_cluster_v2"));
        assert!(!config.supports("conduktor_console_topic_v2"));
        assert!(config.warnings.is_empty());

        clear_env();
    }

    #[test]
    #[serial]
    fn gateway_tls_settings_stay_in_gateway_mode() {
        clear_env();
        std::env::set_var("CDK_CERT", "console.pem");
        std::env::set_var("CDK_GATEWAY_CERT", "gateway.pem");
        std::env::set_var("CDK_GATEWAY_CACERT", "gateway-ca.pem");
        std::env::set_var("CDK_GATEWAY_KEY", "gateway.key");

        let gateway = ProviderConfig::from_terraform(&block(&[
            ("mode", Dynamic::string("gateway")),
            ("base_url", Dynamic::string("http://gateway:8888")),
            ("admin_user", Dynamic::string("admin")),
            ("admin_password", Dynamic::string("conduktor")),
        ]))
        .unwrap();
        assert_eq!(gateway.cert.as_deref(), Some("gateway.pem"));
        assert_eq!(gateway.cacert.as_deref(), Some("gateway-ca.pem"));
        assert_eq!(gateway.key.as_deref(), Some("gateway.key"));

        let console = ProviderConfig::from_terraform(&block(&[
            ("base_url", Dynamic::string("http://console:8080")),
            ("api_token", Dynamic::string("token")),
        ]))
        .unwrap();
        assert_eq!(console.cert.as_deref(), Some("console.pem"));
        assert_eq!(console.cacert, None);
        assert_eq!(console.key, None);

        clear_env();
    }

    #[test]
    #[serial]
    fn api_token_in_gateway_mode_is_reported() {
        clear_env();
        let config = ProviderConfig::from_terraform(&block(&[
            ("mode", Dynamic::string("gateway")),
            ("base_url", Dynamic::string("http://gateway:8888")),
            ("api_token", Dynamic::string("token")),
            ("admin_user", Dynamic::string("admin")),
            ("admin_password", Dynamic::string("conduktor")),
        ]))
        .unwrap();

        assert_eq!(config.api_token, None);
        assert_eq!(config.warnings.len(), 1);
        let warning = &config.warnings[0];
        assert_eq!(warning.severity, tfplug::DiagnosticSeverity::Warning);
        assert_eq!(warning.attribute, Some(AttributePath::new("api_token")));
    }

    #[test]
    #[serial]
    fn missing_base_url_is_rejected() {
        clear_env();
        let err = ProviderConfig::from_terraform(&block(&[(
            "api_token",
            Dynamic::string("token"),
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("base_url is required"));
    }

    #[test]
    #[serial]
    fn gateway_needs_credentials() {
        clear_env();
        let err = ProviderConfig::from_terraform(&block(&[
            ("mode", Dynamic::string("gateway")),
            ("base_url", Dynamic::string("http://gateway:8888")),
            ("api_token", Dynamic::string("token")),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(msg) if msg.contains("gateway mode")));
    }

    #[test]
    #[serial]
    fn invalid_mode_is_rejected() {
        clear_env();
        let err = ProviderConfig::from_terraform(&block(&[("mode", Dynamic::string("ksql"))]))
            .unwrap_err();
        assert!(err.to_string().contains("ksql"));
    }

    #[test]
    #[serial]
    fn invalid_insecure_env_is_rejected() {
        clear_env();
        std::env::set_var("CDK_INSECURE", "yes");
        let err = ProviderConfig::from_terraform(&block(&[
            ("base_url", Dynamic::string("http://localhost:8080")),
            ("api_token", Dynamic::string("token")),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("insecure"));
        clear_env();
    }
}
