//! Gateway requests and the envelope they compile to.
//!
//! Every body carries `language`, `command`, `merchant` and `test`; the
//! command's payload adds `details`, `transaction` or `bankListInformation`.

use serde::Serialize;

use crate::command::{Command, Context};
use crate::signature::{sign_order, SignatureAlgorithm};
use crate::transaction::Transaction;
use crate::{Credentials, Language, PayUError};

/// What a command operates on.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    OrderId(u64),
    ReferenceCode(String),
    TransactionId(String),
    Transaction(Box<Transaction>),
    BankList {
        payment_method: String,
        payment_country: String,
    },
}

/// Client state a request is compiled against.
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    pub credentials: &'a Credentials,
    pub language: Language,
    pub test: bool,
    pub merchant_id: Option<&'a str>,
    pub notify_url: Option<&'a str>,
    pub partner_id: Option<&'a str>,
    pub signature_algorithm: SignatureAlgorithm,
}

impl<'a> CompileContext<'a> {
    pub fn new(credentials: &'a Credentials, language: Language, test: bool) -> Self {
        Self {
            credentials,
            language,
            test,
            merchant_id: None,
            notify_url: None,
            partner_id: None,
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }
}

/// A command tagged with its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    command: Command,
    payload: Payload,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Details<'a> {
    OrderId(u64),
    ReferenceCode(&'a str),
    TransactionId(&'a str),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BankListInformation<'a> {
    payment_method: &'a str,
    payment_country: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    language: Language,
    command: Command,
    merchant: &'a Credentials,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Details<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction: Option<Transaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_list_information: Option<BankListInformation<'a>>,
    test: bool,
}

impl Request {
    pub fn new(command: Command, payload: Payload) -> Self {
        Self { command, payload }
    }

    pub fn ping() -> Self {
        Self::new(Command::Ping, Payload::None)
    }

    pub fn order_detail(order_id: u64) -> Self {
        Self::new(Command::OrderDetail, Payload::OrderId(order_id))
    }

    pub fn order_detail_by_reference(reference_code: impl Into<String>) -> Self {
        Self::new(
            Command::OrderDetailByReferenceCode,
            Payload::ReferenceCode(reference_code.into()),
        )
    }

    pub fn transaction_detail(transaction_id: impl Into<String>) -> Self {
        Self::new(
            Command::TransactionResponseDetail,
            Payload::TransactionId(transaction_id.into()),
        )
    }

    pub fn submit_transaction(transaction: Transaction) -> Self {
        Self::new(
            Command::SubmitTransaction,
            Payload::Transaction(Box::new(transaction)),
        )
    }

    pub fn payment_methods() -> Self {
        Self::new(Command::GetPaymentMethods, Payload::None)
    }

    pub fn banks_list(payment_method: impl Into<String>, payment_country: impl Into<String>) -> Self {
        Self::new(
            Command::GetBanksList,
            Payload::BankList {
                payment_method: payment_method.into(),
                payment_country: payment_country.into(),
            },
        )
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn context(&self) -> Context {
        self.command.context()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Compile into the JSON body posted to the gateway.
    pub fn compile(&self, ctx: &CompileContext<'_>) -> Result<String, PayUError> {
        let mut envelope = Envelope {
            language: ctx.language,
            command: self.command,
            merchant: ctx.credentials,
            details: None,
            transaction: None,
            bank_list_information: None,
            test: ctx.test,
        };

        match &self.payload {
            Payload::None => {}
            Payload::OrderId(id) => envelope.details = Some(Details::OrderId(*id)),
            Payload::ReferenceCode(code) => {
                envelope.details = Some(Details::ReferenceCode(code))
            }
            Payload::TransactionId(id) => envelope.details = Some(Details::TransactionId(id)),
            Payload::Transaction(tx) => {
                envelope.transaction = Some(prepare_transaction(tx, ctx)?);
            }
            Payload::BankList {
                payment_method,
                payment_country,
            } => {
                envelope.bank_list_information = Some(BankListInformation {
                    payment_method,
                    payment_country,
                });
            }
        }

        Ok(serde_json::to_string(&envelope)?)
    }
}

/// Fill order fields the caller left to the client and sign the order.
fn prepare_transaction(
    transaction: &Transaction,
    ctx: &CompileContext<'_>,
) -> Result<Transaction, PayUError> {
    let mut tx = transaction.clone();
    let order = &mut tx.order;

    order.language.get_or_insert(ctx.language);
    if order.notify_url.is_none() {
        order.notify_url = ctx.notify_url.map(str::to_string);
    }
    if order.partner_id.is_none() {
        order.partner_id = ctx.partner_id.map(str::to_string);
    }
    if order.signature.is_none() {
        let merchant_id = ctx.merchant_id.ok_or(PayUError::MissingMerchantId)?;
        order.signature = Some(sign_order(
            ctx.signature_algorithm,
            ctx.credentials,
            merchant_id,
            order,
        )?);
    }

    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{Money, Order, TransactionType};
    use rust_decimal::Decimal;
    use serde_json::Value;

    fn creds() -> Credentials {
        Credentials::new("pRRXKOl8ikMmt9u", "4Vj8eK4rloUd272L48hsrarnUA")
    }

    fn compile(request: &Request, ctx: &CompileContext<'_>) -> Value {
        serde_json::from_str(&request.compile(ctx).unwrap()).unwrap()
    }

    fn sample_transaction() -> Transaction {
        let order = Order::new(
            "512321",
            "TestPayU",
            "Test order",
            Money::new(Decimal::new(3, 0), "USD"),
        );
        Transaction::new(order, TransactionType::AuthorizationAndCapture, "VISA", "PA")
    }

    #[test]
    fn test_ping_envelope() {
        let creds = creds();
        let ctx = CompileContext::new(&creds, Language::English, false);
        let body = compile(&Request::ping(), &ctx);
        assert_eq!(
            body,
            serde_json::json!({
                "language": "en",
                "command": "PING",
                "merchant": {
                    "apiLogin": "pRRXKOl8ikMmt9u",
                    "apiKey": "4Vj8eK4rloUd272L48hsrarnUA",
                },
                "test": false,
            })
        );
    }

    #[test]
    fn test_language_field_for_every_language() {
        let creds = creds();
        for lang in Language::ALL {
            let ctx = CompileContext::new(&creds, lang, true);
            let body = compile(&Request::ping(), &ctx);
            assert_eq!(body["language"], lang.as_str());
            assert_eq!(body["test"], true);
        }
    }

    #[test]
    fn test_query_details() {
        let creds = creds();
        let ctx = CompileContext::new(&creds, Language::Spanish, false);

        let body = compile(&Request::order_detail(844182), &ctx);
        assert_eq!(body["command"], "ORDER_DETAIL");
        assert_eq!(body["details"], serde_json::json!({ "orderId": 844182 }));

        let body = compile(&Request::order_detail_by_reference("ref-7"), &ctx);
        assert_eq!(body["command"], "ORDER_DETAIL_BY_REFERENCE_CODE");
        assert_eq!(body["details"], serde_json::json!({ "referenceCode": "ref-7" }));

        let body = compile(&Request::transaction_detail("tx-1"), &ctx);
        assert_eq!(body["command"], "TRANSACTION_RESPONSE_DETAIL");
        assert_eq!(body["details"], serde_json::json!({ "transactionId": "tx-1" }));
    }

    #[test]
    fn test_bank_list_information() {
        let creds = creds();
        let ctx = CompileContext::new(&creds, Language::Spanish, false);
        let body = compile(&Request::banks_list("PSE", "CO"), &ctx);
        assert_eq!(body["command"], "GET_BANKS_LIST");
        assert_eq!(
            body["bankListInformation"],
            serde_json::json!({ "paymentMethod": "PSE", "paymentCountry": "CO" })
        );
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_submit_transaction_fills_order_defaults() {
        let creds = creds();
        let mut ctx = CompileContext::new(&creds, Language::Portuguese, true);
        ctx.merchant_id = Some("508029");
        ctx.notify_url = Some("https://shop.example.com/payu/notify");
        ctx.partner_id = Some("partner-9");

        let body = compile(&Request::submit_transaction(sample_transaction()), &ctx);
        assert_eq!(body["command"], "SUBMIT_TRANSACTION");
        let order = &body["transaction"]["order"];
        assert_eq!(order["language"], "pt");
        assert_eq!(order["notifyUrl"], "https://shop.example.com/payu/notify");
        assert_eq!(order["partnerId"], "partner-9");
        assert_eq!(order["signature"], "ba9ffa71559580175585e45ce70b6c37");
    }

    #[test]
    fn test_submit_transaction_keeps_explicit_order_fields() {
        let creds = creds();
        let ctx = CompileContext::new(&creds, Language::English, false);

        let mut tx = sample_transaction();
        tx.order.language = Some(Language::Spanish);
        tx.order.signature = Some("precomputed".to_string());

        let body = compile(&Request::submit_transaction(tx), &ctx);
        let order = &body["transaction"]["order"];
        assert_eq!(order["language"], "es");
        assert_eq!(order["signature"], "precomputed");
        assert!(order.get("notifyUrl").is_none());
    }

    #[test]
    fn test_submit_transaction_requires_merchant_id_to_sign() {
        let creds = creds();
        let ctx = CompileContext::new(&creds, Language::English, false);
        let err = Request::submit_transaction(sample_transaction())
            .compile(&ctx)
            .unwrap_err();
        assert!(matches!(err, PayUError::MissingMerchantId));
    }
}
