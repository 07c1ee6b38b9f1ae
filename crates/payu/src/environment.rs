//! Endpoint configuration: which host a request goes to and how.
//!
//! Production and sandbox differ only by base URL and the default test flag.
//! A custom base URL can replace either, which is how tests and egress
//! proxies point the client elsewhere.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::command::Context;
use crate::constants::{
    ACCEPT_JSON, CONTENT_TYPE_JSON, DEFAULT_TIMEOUT_SECS, ENV_PRODUCTION, ENV_SANDBOX,
    PAYMENTS_PATH, PRODUCTION_BASE_URL, REPORTS_PATH, SANDBOX_BASE_URL,
};
use crate::PayUError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EnvironmentKind {
    #[default]
    Production,
    Sandbox,
}

impl EnvironmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentKind::Production => ENV_PRODUCTION,
            EnvironmentKind::Sandbox => ENV_SANDBOX,
        }
    }

    /// Absent names select production.
    pub fn resolve(name: Option<&str>) -> Result<Self, PayUError> {
        match name {
            None => Ok(EnvironmentKind::default()),
            Some(name) => name.parse(),
        }
    }
}

impl FromStr for EnvironmentKind {
    type Err = PayUError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ENV_PRODUCTION => Ok(EnvironmentKind::Production),
            ENV_SANDBOX => Ok(EnvironmentKind::Sandbox),
            other => Err(PayUError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime endpoint configuration for one gateway deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    kind: EnvironmentKind,
    base_url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    test: bool,
}

impl Environment {
    pub fn production() -> Self {
        Self::new(EnvironmentKind::Production)
    }

    pub fn sandbox() -> Self {
        Self::new(EnvironmentKind::Sandbox)
    }

    pub fn new(kind: EnvironmentKind) -> Self {
        let base_url = match kind {
            EnvironmentKind::Production => PRODUCTION_BASE_URL,
            EnvironmentKind::Sandbox => SANDBOX_BASE_URL,
        };
        Self {
            kind,
            base_url: base_url.to_string(),
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                ("Accept".to_string(), ACCEPT_JSON.to_string()),
            ],
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            test: kind == EnvironmentKind::Sandbox,
        }
    }

    /// Build the environment named `name`, defaulting to production.
    pub fn from_name(name: Option<&str>) -> Result<Self, PayUError> {
        EnvironmentKind::resolve(name).map(Self::new)
    }

    /// Replace the base URL. Must be an absolute http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, PayUError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| PayUError::InvalidEnvironment(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PayUError::InvalidEnvironment(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    pub fn kind(&self) -> EnvironmentKind {
        self.kind
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full endpoint URL for the API serving `context`.
    pub fn url(&self, context: Context) -> String {
        let path = match context {
            Context::Payments => PAYMENTS_PATH,
            Context::Reports => REPORTS_PATH,
        };
        format!("{}{}", self.base_url, path)
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Value of the `test` flag sent in every request body.
    pub fn is_test(&self) -> bool {
        self.test
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::production()
    }
}
