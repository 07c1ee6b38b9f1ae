//! Client SDK for the PayU Latam payments and reports API.
//!
//! Builds the JSON envelope for each gateway command, posts it to the
//! endpoint of the selected environment, and parses the reply into typed
//! results.
//!
//! # Quick example
//!
//! ```no_run
//! use payu::{Credentials, PayU};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), payu::PayUError> {
//! let mut client = PayU::factory(Some("es"), Some("sandbox"))?;
//! client.set_credentials(Credentials::new("pRRXKOl8ikMmt9u", "4Vj8eK4rloUd272L48hsrarnUA"));
//! client.set_merchant_id("508029");
//!
//! if let Some(order) = client.get_order_by_id(844182).await? {
//!     println!("order {} is {:?}", order.id, order.status);
//! }
//! # Ok(())
//! # }
//! ```

// Data model
pub mod command;
pub mod constants;
pub mod credentials;
pub mod environment;
pub mod error;
pub mod language;
pub mod transaction;

// Request / response translation
pub mod builder;
pub mod request;
pub mod response;
pub mod signature;

// Client
pub mod client;
pub mod config;

// Re-exports
pub use builder::{RawResponseBuilder, ResponseBuilder, TypedResponseBuilder};
pub use client::PayU;
pub use command::{Command, Context};
pub use config::{ClientConfig, ConfigError};
pub use credentials::Credentials;
pub use environment::{Environment, EnvironmentKind};
pub use error::PayUError;
pub use language::Language;
pub use request::{Payload, Request};
pub use response::*;
pub use rust_decimal::Decimal;
pub use signature::SignatureAlgorithm;
pub use transaction::{
    Address, Buyer, CreditCard, Money, Order, Payer, Transaction, TransactionType,
};
