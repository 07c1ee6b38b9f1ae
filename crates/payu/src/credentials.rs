use serde::{Deserialize, Serialize};

/// Merchant API identity presented with every request.
///
/// Serializes to the `merchant` object of the request envelope.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    api_login: String,
    api_key: String,
}

impl Credentials {
    pub fn new(api_login: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_login: api_login.into(),
            api_key: api_key.into(),
        }
    }

    pub fn api_login(&self) -> &str {
        &self.api_login
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_login", &self.api_login)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
