use crate::builder::{builder_from_name, ResponseBuilder, TypedResponseBuilder};
use crate::command::Command;
use crate::config::ClientConfig;
use crate::environment::Environment;
use crate::request::{CompileContext, Request};
use crate::response::{
    Bank, OrderDetail, PaymentMethodInfo, Response, TransactionDetail, TransactionResponse,
};
use crate::signature::SignatureAlgorithm;
use crate::transaction::Transaction;
use crate::{Credentials, Language, PayUError};

/// PayU API client.
///
/// Wraps `reqwest::Client`. Each operation compiles a [`Request`] against the
/// client's credentials and language, posts it to the environment endpoint
/// for the command, and hands the reply to the configured
/// [`ResponseBuilder`].
pub struct PayU {
    http: reqwest::Client,
    environment: Environment,
    builder: Box<dyn ResponseBuilder>,
    language: Language,
    merchant_id: Option<String>,
    credentials: Option<Credentials>,
    notify_url: Option<String>,
    partner_id: Option<String>,
    signature_algorithm: SignatureAlgorithm,
}

impl std::fmt::Debug for PayU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayU")
            .field("environment", &self.environment)
            .field("language", &self.language)
            .field("merchant_id", &self.merchant_id)
            .field("credentials", &self.credentials)
            .field("notify_url", &self.notify_url)
            .field("partner_id", &self.partner_id)
            .field("signature_algorithm", &self.signature_algorithm)
            .finish_non_exhaustive()
    }
}

impl PayU {
    pub fn new(
        environment: Environment,
        builder: Box<dyn ResponseBuilder>,
        language: Language,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            environment,
            builder,
            language,
            merchant_id: None,
            credentials: None,
            notify_url: None,
            partner_id: None,
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }

    /// Create a client with a custom reqwest::Client.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Create a client from language and environment names with the typed
    /// response builder. Absent names select English and production.
    pub fn factory(language: Option<&str>, environment: Option<&str>) -> Result<Self, PayUError> {
        Self::factory_with_builder(language, environment, None)
    }

    /// Like [`PayU::factory`], also selecting the response builder by name.
    pub fn factory_with_builder(
        language: Option<&str>,
        environment: Option<&str>,
        builder: Option<&str>,
    ) -> Result<Self, PayUError> {
        let environment = Environment::from_name(environment)?;
        let builder = builder_from_name(builder)?;
        let language = Language::resolve(language)?;
        Ok(Self::new(environment, builder, language))
    }

    /// Create a fully configured client.
    pub fn from_config(config: &ClientConfig) -> Result<Self, PayUError> {
        let mut environment = Environment::new(config.environment).with_timeout(config.timeout);
        if let Some(ref base_url) = config.base_url {
            environment = environment.with_base_url(base_url)?;
        }
        if let Some(test) = config.test {
            environment = environment.with_test(test);
        }

        let builder = builder_from_name(Some(config.response_builder.as_str()))?;
        let mut client = Self::new(environment, builder, config.language);
        client.set_credentials(config.credentials.clone());
        client.merchant_id = config.merchant_id.clone();
        client.notify_url = config.notify_url.clone();
        client.partner_id = config.partner_id.clone();
        Ok(client)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn set_merchant_id(&mut self, merchant_id: impl ToString) {
        self.merchant_id = Some(merchant_id.to_string());
    }

    pub fn merchant_id(&self) -> Option<&str> {
        self.merchant_id.as_deref()
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn set_notify_url(&mut self, url: impl Into<String>) {
        self.notify_url = Some(url.into());
    }

    pub fn notify_url(&self) -> Option<&str> {
        self.notify_url.as_deref()
    }

    pub fn set_partner_id(&mut self, id: impl Into<String>) {
        self.partner_id = Some(id.into());
    }

    pub fn partner_id(&self) -> Option<&str> {
        self.partner_id.as_deref()
    }

    /// Override the environment's `test` flag.
    pub fn set_test(&mut self, test: bool) {
        self.environment = std::mem::take(&mut self.environment).with_test(test);
    }

    pub fn set_signature_algorithm(&mut self, algorithm: SignatureAlgorithm) {
        self.signature_algorithm = algorithm;
    }

    /// Look up an order by its gateway id.
    pub async fn get_order_by_id(&self, order_id: u64) -> Result<Option<OrderDetail>, PayUError> {
        match self.typed(Request::order_detail(order_id)).await? {
            Response::Order(order) => Ok(order),
            other => Err(unexpected(Command::OrderDetail, &other)),
        }
    }

    /// Look up the orders carrying a merchant reference code.
    pub async fn get_order_by_reference(
        &self,
        reference_code: &str,
    ) -> Result<Vec<OrderDetail>, PayUError> {
        match self
            .typed(Request::order_detail_by_reference(reference_code))
            .await?
        {
            Response::Orders(orders) => Ok(orders),
            other => Err(unexpected(Command::OrderDetailByReferenceCode, &other)),
        }
    }

    pub async fn get_transaction_by_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<TransactionDetail>, PayUError> {
        match self
            .typed(Request::transaction_detail(transaction_id))
            .await?
        {
            Response::TransactionDetail(detail) => Ok(detail),
            other => Err(unexpected(Command::TransactionResponseDetail, &other)),
        }
    }

    /// Submit a payment. A declined payment is a successful call; check
    /// [`TransactionResponse::state`].
    pub async fn do_payment(
        &self,
        transaction: Transaction,
    ) -> Result<TransactionResponse, PayUError> {
        match self.typed(Request::submit_transaction(transaction)).await? {
            Response::Payment(tx) => Ok(tx),
            other => Err(unexpected(Command::SubmitTransaction, &other)),
        }
    }

    pub async fn get_payment_methods(&self) -> Result<Vec<PaymentMethodInfo>, PayUError> {
        match self.typed(Request::payment_methods()).await? {
            Response::PaymentMethods(methods) => Ok(methods),
            other => Err(unexpected(Command::GetPaymentMethods, &other)),
        }
    }

    /// List the banks available for a bank-transfer payment method (`PSE`).
    pub async fn get_banks_list(
        &self,
        payment_method: &str,
        payment_country: &str,
    ) -> Result<Vec<Bank>, PayUError> {
        match self
            .typed(Request::banks_list(payment_method, payment_country))
            .await?
        {
            Response::Banks(banks) => Ok(banks),
            other => Err(unexpected(Command::GetBanksList, &other)),
        }
    }

    /// Check connectivity and credentials against the configured environment.
    pub async fn send_ping(&self) -> Result<(), PayUError> {
        match self.typed(Request::ping()).await? {
            Response::Pong => Ok(()),
            other => Err(unexpected(Command::Ping, &other)),
        }
    }

    /// Ping the gateway with throwaway client settings.
    pub async fn ping(
        credentials: Credentials,
        language: Option<&str>,
        environment: Option<&str>,
    ) -> Result<(), PayUError> {
        let mut instance = Self::factory(language, environment)?;
        instance.set_credentials(credentials);
        instance.send_ping().await
    }

    /// Send a request and build the response with the configured builder.
    pub async fn request(&self, request: &Request) -> Result<Response, PayUError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(PayUError::MissingCredentials)?;

        let url = self.environment.url(request.context());

        let ctx = CompileContext {
            credentials,
            language: self.language,
            test: self.environment.is_test(),
            merchant_id: self.merchant_id.as_deref(),
            notify_url: self.notify_url.as_deref(),
            partner_id: self.partner_id.as_deref(),
            signature_algorithm: self.signature_algorithm,
        };
        let body = request.compile(&ctx)?;

        tracing::debug!(command = %request.command(), %url, "sending gateway request");

        let mut req = self
            .http
            .post(&url)
            .timeout(self.environment.timeout());
        for (name, value) in self.environment.headers() {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.body(body).send().await.map_err(|e| {
            tracing::error!(command = %request.command(), "gateway request failed: {e}");
            PayUError::Http(format!("request failed: {e}"))
        })?;

        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| PayUError::Http(format!("failed to read response body: {e}")))?;

        let result = self.builder.build(request, status, &bytes);
        match &result {
            Err(PayUError::Gateway { message }) => {
                tracing::warn!(command = %request.command(), "gateway returned an error: {message}")
            }
            Err(PayUError::HttpStatus { status, .. }) => {
                tracing::warn!(command = %request.command(), status, "unexpected gateway status")
            }
            _ => {}
        }
        result
    }

    /// Send `request` and coerce raw builder output into the typed form.
    async fn typed(&self, request: Request) -> Result<Response, PayUError> {
        self.request(&request)
            .await?
            .into_typed(request.command())
    }
}

impl Default for PayU {
    /// Production, English, typed responses.
    fn default() -> Self {
        Self::new(
            Environment::default(),
            Box::new(TypedResponseBuilder),
            Language::default(),
        )
    }
}

fn unexpected(command: Command, response: &Response) -> PayUError {
    PayUError::UnexpectedResponse {
        command: command.as_str(),
        detail: format!("got {} response", response.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvironmentKind;
    use std::time::Duration;

    #[test]
    fn test_factory_selects_distinct_environments() {
        let sandbox = PayU::factory(Some("en"), Some("sandbox")).unwrap();
        let production = PayU::factory(Some("en"), Some("production")).unwrap();
        assert_eq!(sandbox.environment().kind(), EnvironmentKind::Sandbox);
        assert_eq!(production.environment().kind(), EnvironmentKind::Production);
        assert_ne!(
            sandbox.environment().base_url(),
            production.environment().base_url()
        );
    }

    #[test]
    fn test_factory_defaults() {
        let client = PayU::factory(None, None).unwrap();
        assert_eq!(client.language(), Language::English);
        assert_eq!(client.environment().kind(), EnvironmentKind::Production);
        assert!(client.credentials().is_none());
    }

    #[test]
    fn test_factory_rejects_invalid_names() {
        assert!(matches!(
            PayU::factory(Some("fr"), None).unwrap_err(),
            PayUError::InvalidLanguage(_)
        ));
        assert!(matches!(
            PayU::factory(None, Some("staging")).unwrap_err(),
            PayUError::InvalidEnvironment(_)
        ));
        assert!(matches!(
            PayU::factory_with_builder(None, None, Some("soap")).unwrap_err(),
            PayUError::InvalidBuilder(_)
        ));
    }

    #[test]
    fn test_setters() {
        let mut client = PayU::default();
        client.set_merchant_id(508029);
        client.set_notify_url("https://shop.example.com/notify");
        client.set_partner_id("p-1");
        client.set_credentials(Credentials::new("login", "key"));
        assert_eq!(client.merchant_id(), Some("508029"));
        assert_eq!(client.notify_url(), Some("https://shop.example.com/notify"));
        assert_eq!(client.partner_id(), Some("p-1"));
        assert_eq!(client.credentials().unwrap().api_login(), "login");

        assert!(!client.environment().is_test());
        client.set_test(true);
        assert!(client.environment().is_test());
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig {
            credentials: Credentials::new("login", "key"),
            merchant_id: Some("508029".to_string()),
            language: Language::Spanish,
            environment: EnvironmentKind::Sandbox,
            base_url: Some("http://127.0.0.1:4010".to_string()),
            notify_url: None,
            partner_id: None,
            response_builder: "raw".to_string(),
            timeout: Duration::from_secs(3),
            test: Some(false),
        };
        let client = PayU::from_config(&config).unwrap();
        assert_eq!(client.language(), Language::Spanish);
        assert_eq!(client.environment().base_url(), "http://127.0.0.1:4010");
        assert_eq!(client.environment().timeout(), Duration::from_secs(3));
        assert!(!client.environment().is_test());
        assert_eq!(client.merchant_id(), Some("508029"));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let mut client = PayU::default();
        client.set_credentials(Credentials::new("login", "very-secret-key"));
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("very-secret-key"));
    }

    #[tokio::test]
    async fn test_request_without_credentials_fails_before_io() {
        // Unroutable base URL: any network attempt would surface as Http.
        let env = Environment::sandbox()
            .with_base_url("http://192.0.2.1:9")
            .unwrap();
        let client = PayU::new(env, Box::new(TypedResponseBuilder), Language::English);
        let err = client.request(&Request::ping()).await.unwrap_err();
        assert!(matches!(err, PayUError::MissingCredentials));
    }
}
