use thiserror::Error;

/// Errors returned by PayU client operations.
#[derive(Debug, Error)]
pub enum PayUError {
    #[error("invalid language: {0}")]
    InvalidLanguage(String),

    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("invalid response builder: {0}")]
    InvalidBuilder(String),

    #[error("merchant credentials are not set")]
    MissingCredentials,

    #[error("merchant id is required to sign orders")]
    MissingMerchantId,

    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("unexpected http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("gateway error: {message}")]
    Gateway { message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unexpected response for {command}: {detail}")]
    UnexpectedResponse {
        command: &'static str,
        detail: String,
    },

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
