//! Typed results of gateway replies.
//!
//! Replies share one envelope: `code` (`SUCCESS` or `ERROR`), `error`, and a
//! command-specific body under `result.payload`, `transactionResponse`,
//! `paymentMethods` or `banks`. Most fields are optional because the gateway
//! omits or nulls them depending on payment method and state.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::transaction::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Success,
    Error,
}

/// Outcome of a transaction as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    Approved,
    Declined,
    Error,
    Expired,
    Pending,
    Submitted,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    InProgress,
    Authorized,
    Captured,
    Cancelled,
    Declined,
    Refunded,
    #[serde(other)]
    Unknown,
}

/// Date fields come back either as epoch milliseconds or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

/// Processing result of a single transaction.
///
/// Returned by `SUBMIT_TRANSACTION` and, without the ids, by
/// `TRANSACTION_RESPONSE_DETAIL`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub state: TransactionState,
    #[serde(default)]
    pub payment_network_response_code: Option<String>,
    #[serde(default)]
    pub payment_network_response_error_message: Option<String>,
    #[serde(default)]
    pub trazability_code: Option<String>,
    #[serde(default)]
    pub authorization_code: Option<String>,
    #[serde(default)]
    pub pending_reason: Option<String>,
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub transaction_time: Option<String>,
    #[serde(default)]
    pub operation_date: Option<Timestamp>,
    #[serde(default)]
    pub extra_parameters: Option<BTreeMap<String, serde_json::Value>>,
}

impl TransactionResponse {
    pub fn is_approved(&self) -> bool {
        self.state == TransactionState::Approved
    }
}

/// `TRANSACTION_RESPONSE_DETAIL` payload.
pub type TransactionDetail = TransactionResponse;

/// Buyer as echoed back in order reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBuyer {
    #[serde(default)]
    pub merchant_buyer_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub dni_number: Option<String>,
}

/// A transaction attached to a reported order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTransaction {
    pub id: String,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub parent_transaction_id: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_country: Option<String>,
    #[serde(default)]
    pub transaction_response: Option<TransactionResponse>,
    #[serde(default)]
    pub extra_parameters: Option<BTreeMap<String, serde_json::Value>>,
}

/// An order as returned by the reports API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: u64,
    #[serde(default)]
    pub account_id: Option<u64>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub reference_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub notify_url: Option<String>,
    #[serde(default)]
    pub buyer: Option<OrderBuyer>,
    #[serde(default)]
    pub additional_values: Option<BTreeMap<String, Money>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transactions: Vec<OrderTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// PSE bank entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub description: String,
    pub pse_code: String,
}

/// Result of one gateway call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Pong,
    /// `None` when no order matches the id.
    Order(Option<OrderDetail>),
    Orders(Vec<OrderDetail>),
    /// `None` when no transaction matches the id.
    TransactionDetail(Option<TransactionDetail>),
    Payment(TransactionResponse),
    PaymentMethods(Vec<PaymentMethodInfo>),
    Banks(Vec<Bank>),
    /// Untyped reply, produced by the raw builder.
    Raw(serde_json::Value),
}

impl Response {
    pub fn kind(&self) -> &'static str {
        match self {
            Response::Pong => "pong",
            Response::Order(_) => "order",
            Response::Orders(_) => "orders",
            Response::TransactionDetail(_) => "transaction_detail",
            Response::Payment(_) => "payment",
            Response::PaymentMethods(_) => "payment_methods",
            Response::Banks(_) => "banks",
            Response::Raw(_) => "raw",
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
