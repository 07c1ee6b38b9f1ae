/// Production API host.
pub const PRODUCTION_BASE_URL: &str = "https://api.payulatam.com";

/// Sandbox API host.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.api.payulatam.com";

/// Path of the payments API (payment submission, payment methods, banks).
pub const PAYMENTS_PATH: &str = "/payments-api/4.0/service.cgi";

/// Path of the reports API (ping, order and transaction queries).
pub const REPORTS_PATH: &str = "/reports-api/4.0/service.cgi";

pub const ENV_PRODUCTION: &str = "production";
pub const ENV_SANDBOX: &str = "sandbox";

pub const LANGUAGE_ENGLISH: &str = "en";
pub const LANGUAGE_SPANISH: &str = "es";
pub const LANGUAGE_PORTUGUESE: &str = "pt";

/// Content type sent with every request. The gateway answers in XML unless
/// JSON is both sent and accepted.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const ACCEPT_JSON: &str = "application/json";

/// Request timeout applied when the environment does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Key of the order value inside `additionalValues`. The signature is computed
/// over this amount.
pub const TX_VALUE: &str = "TX_VALUE";
