//! Client configuration from environment variables.

use std::env;
use std::time::Duration;

use url::Url;

use crate::builder::{builder_from_name, BUILDER_TYPED};
use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::environment::EnvironmentKind;
use crate::{Credentials, Language, PayUError};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API login and key (`PAYU_API_LOGIN`, `PAYU_API_KEY`)
    pub credentials: Credentials,
    /// Merchant id used to sign orders
    pub merchant_id: Option<String>,
    pub language: Language,
    pub environment: EnvironmentKind,
    /// Overrides the environment's host (None = environment default)
    pub base_url: Option<String>,
    /// Confirmation URL attached to submitted orders
    pub notify_url: Option<String>,
    pub partner_id: Option<String>,
    /// Response builder name (`typed` or `raw`)
    pub response_builder: String,
    pub timeout: Duration,
    /// Overrides the environment's test flag (None = environment default)
    pub test: Option<bool>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        // Required: credentials
        let api_login =
            get("PAYU_API_LOGIN").ok_or(ConfigError::MissingRequired("PAYU_API_LOGIN"))?;
        let api_key = get("PAYU_API_KEY").ok_or(ConfigError::MissingRequired("PAYU_API_KEY"))?;

        let language = Language::resolve(get("PAYU_LANGUAGE").as_deref())
            .map_err(|_| invalid("PAYU_LANGUAGE", get("PAYU_LANGUAGE")))?;

        let environment = EnvironmentKind::resolve(get("PAYU_ENVIRONMENT").as_deref())
            .map_err(|_| invalid("PAYU_ENVIRONMENT", get("PAYU_ENVIRONMENT")))?;

        let base_url = get("PAYU_BASE_URL");
        if let Some(ref url) = base_url {
            Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        }

        let response_builder =
            get("PAYU_RESPONSE_BUILDER").unwrap_or_else(|| BUILDER_TYPED.to_string());
        builder_from_name(Some(response_builder.as_str()))?;

        let timeout = match get("PAYU_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| invalid("PAYU_TIMEOUT_SECS", Some(raw)))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let test = match get("PAYU_TEST") {
            Some(raw) => Some(parse_bool(&raw).ok_or_else(|| invalid("PAYU_TEST", Some(raw)))?),
            None => None,
        };

        Ok(Self {
            credentials: Credentials::new(api_login, api_key),
            merchant_id: get("PAYU_MERCHANT_ID"),
            language,
            environment,
            base_url,
            notify_url: get("PAYU_NOTIFY_URL"),
            partner_id: get("PAYU_PARTNER_ID"),
            response_builder,
            timeout,
            test,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn invalid(name: &'static str, value: Option<String>) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.unwrap_or_default(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Client(#[from] PayUError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    const CREDS: [(&str, &str); 2] = [("PAYU_API_LOGIN", "login"), ("PAYU_API_KEY", "key")];

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&CREDS)).unwrap();
        assert_eq!(config.credentials.api_login(), "login");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.environment, EnvironmentKind::Production);
        assert_eq!(config.response_builder, "typed");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.merchant_id.is_none());
        assert!(config.test.is_none());
    }

    #[test]
    fn test_missing_credentials() {
        let err = ClientConfig::from_lookup(lookup(&[("PAYU_API_LOGIN", "login")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired("PAYU_API_KEY")));

        let err = ClientConfig::from_lookup(lookup(&[
            ("PAYU_API_LOGIN", ""),
            ("PAYU_API_KEY", "key"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired("PAYU_API_LOGIN")));
    }

    #[test]
    fn test_full_config() {
        let mut vars = CREDS.to_vec();
        vars.extend([
            ("PAYU_MERCHANT_ID", "508029"),
            ("PAYU_LANGUAGE", "es"),
            ("PAYU_ENVIRONMENT", "sandbox"),
            ("PAYU_BASE_URL", "http://localhost:9000"),
            ("PAYU_NOTIFY_URL", "https://shop.example.com/notify"),
            ("PAYU_RESPONSE_BUILDER", "raw"),
            ("PAYU_TIMEOUT_SECS", "5"),
            ("PAYU_TEST", "false"),
        ]);
        let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.merchant_id.as_deref(), Some("508029"));
        assert_eq!(config.language, Language::Spanish);
        assert_eq!(config.environment, EnvironmentKind::Sandbox);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.response_builder, "raw");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.test, Some(false));
    }

    #[test]
    fn test_invalid_values() {
        for (name, value) in [
            ("PAYU_LANGUAGE", "fr"),
            ("PAYU_ENVIRONMENT", "staging"),
            ("PAYU_TIMEOUT_SECS", "0"),
            ("PAYU_TIMEOUT_SECS", "soon"),
            ("PAYU_TEST", "maybe"),
        ] {
            let mut vars = CREDS.to_vec();
            vars.push((name, value));
            let err = ClientConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { name: n, .. } if n == name),
                "{name}={value} gave {err:?}"
            );
        }

        let mut vars = CREDS.to_vec();
        vars.push(("PAYU_BASE_URL", "::nope"));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));

        let mut vars = CREDS.to_vec();
        vars.push(("PAYU_RESPONSE_BUILDER", "xml"));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&vars)).unwrap_err(),
            ConfigError::Client(PayUError::InvalidBuilder(_))
        ));
    }
}
