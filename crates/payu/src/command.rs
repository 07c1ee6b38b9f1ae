use std::fmt;

use serde::Serialize;

/// Gateway API a command is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Payments,
    Reports,
}

/// Gateway operation identifier, sent as the `command` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Ping,
    OrderDetail,
    OrderDetailByReferenceCode,
    TransactionResponseDetail,
    SubmitTransaction,
    GetPaymentMethods,
    GetBanksList,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Ping => "PING",
            Command::OrderDetail => "ORDER_DETAIL",
            Command::OrderDetailByReferenceCode => "ORDER_DETAIL_BY_REFERENCE_CODE",
            Command::TransactionResponseDetail => "TRANSACTION_RESPONSE_DETAIL",
            Command::SubmitTransaction => "SUBMIT_TRANSACTION",
            Command::GetPaymentMethods => "GET_PAYMENT_METHODS",
            Command::GetBanksList => "GET_BANKS_LIST",
        }
    }

    /// Queries go to the reports API, everything that touches money or
    /// payment configuration to the payments API.
    pub fn context(&self) -> Context {
        match self {
            Command::Ping
            | Command::OrderDetail
            | Command::OrderDetailByReferenceCode
            | Command::TransactionResponseDetail => Context::Reports,
            Command::SubmitTransaction | Command::GetPaymentMethods | Command::GetBanksList => {
                Context::Payments
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
