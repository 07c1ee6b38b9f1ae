//! Turning raw gateway replies into [`Response`] values.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::command::Command;
use crate::request::Request;
use crate::response::{Response, ResponseCode};
use crate::PayUError;

pub const BUILDER_TYPED: &str = "typed";
pub const BUILDER_RAW: &str = "raw";

/// Longest slice of an unexpected body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Maps a gateway reply to a [`Response`].
///
/// Implementations must surface gateway `ERROR` replies as
/// [`PayUError::Gateway`].
pub trait ResponseBuilder: Send + Sync {
    fn build(&self, request: &Request, status: u16, body: &[u8]) -> Result<Response, PayUError>;
}

/// Parses each reply into the typed variant for the request's command.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedResponseBuilder;

impl ResponseBuilder for TypedResponseBuilder {
    fn build(&self, request: &Request, status: u16, body: &[u8]) -> Result<Response, PayUError> {
        let reply = check_reply(status, body)?;
        parse_typed(request.command(), reply)
    }
}

/// Keeps the reply as JSON after checking for gateway errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawResponseBuilder;

impl ResponseBuilder for RawResponseBuilder {
    fn build(&self, _request: &Request, status: u16, body: &[u8]) -> Result<Response, PayUError> {
        check_reply(status, body).map(Response::Raw)
    }
}

/// Select a builder by name. `None` selects the typed builder.
pub fn builder_from_name(name: Option<&str>) -> Result<Box<dyn ResponseBuilder>, PayUError> {
    match name {
        None | Some(BUILDER_TYPED) => Ok(Box::new(TypedResponseBuilder)),
        Some(BUILDER_RAW) => Ok(Box::new(RawResponseBuilder)),
        Some(other) => Err(PayUError::InvalidBuilder(other.to_string())),
    }
}

/// Decode the envelope and reject error replies.
pub fn check_reply(status: u16, body: &[u8]) -> Result<Value, PayUError> {
    let ok_status = (200..300).contains(&status);

    let reply: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) if !ok_status => return Err(status_error(status, body)),
        Err(e) => return Err(PayUError::MalformedResponse(format!("invalid JSON: {e}"))),
    };

    let code = match reply.get("code") {
        Some(code) => serde_json::from_value::<ResponseCode>(code.clone())
            .map_err(|_| PayUError::MalformedResponse(format!("unknown response code {code}")))?,
        None if !ok_status => return Err(status_error(status, body)),
        None => return Err(PayUError::MalformedResponse("missing response code".to_string())),
    };

    match code {
        ResponseCode::Error => Err(PayUError::Gateway {
            message: reply
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unspecified gateway error")
                .to_string(),
        }),
        ResponseCode::Success if !ok_status => Err(status_error(status, body)),
        ResponseCode::Success => Ok(reply),
    }
}

/// Extract the typed result for `command` from a successful reply.
pub fn parse_typed(command: Command, mut reply: Value) -> Result<Response, PayUError> {
    let mut take = |pointer: &str| {
        reply
            .pointer_mut(pointer)
            .map(Value::take)
            .unwrap_or(Value::Null)
    };

    Ok(match command {
        Command::Ping => Response::Pong,
        Command::OrderDetail => Response::Order(decode(command, take("/result/payload"))?),
        Command::OrderDetailByReferenceCode => Response::Orders(
            decode::<Option<_>>(command, take("/result/payload"))?.unwrap_or_default(),
        ),
        Command::TransactionResponseDetail => {
            Response::TransactionDetail(decode(command, take("/result/payload"))?)
        }
        Command::SubmitTransaction => {
            let tx = decode::<Option<_>>(command, take("/transactionResponse"))?.ok_or_else(
                || PayUError::MalformedResponse(format!("{command}: missing transactionResponse")),
            )?;
            Response::Payment(tx)
        }
        Command::GetPaymentMethods => Response::PaymentMethods(
            decode::<Option<_>>(command, take("/paymentMethods"))?.unwrap_or_default(),
        ),
        Command::GetBanksList => {
            Response::Banks(decode::<Option<_>>(command, take("/banks"))?.unwrap_or_default())
        }
    })
}

impl Response {
    /// Typed form of this response. Raw replies are re-parsed for `command`.
    pub fn into_typed(self, command: Command) -> Result<Response, PayUError> {
        match self {
            Response::Raw(reply) => parse_typed(command, reply),
            typed => Ok(typed),
        }
    }
}

fn decode<T: DeserializeOwned>(command: Command, value: Value) -> Result<T, PayUError> {
    serde_json::from_value(value).map_err(|e| PayUError::MalformedResponse(format!("{command}: {e}")))
}

fn status_error(status: u16, body: &[u8]) -> PayUError {
    let body = String::from_utf8_lossy(body);
    let cut = body.char_indices().nth(MAX_ERROR_BODY).map(|(idx, _)| idx);
    let body = match cut {
        Some(idx) => format!("{}...", &body[..idx]),
        None => body.into_owned(),
    };
    PayUError::HttpStatus { status, body }
}
