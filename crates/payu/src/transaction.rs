//! Payment submission input: the `transaction` object of a
//! `SUBMIT_TRANSACTION` request.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::TX_VALUE;
use crate::Language;

/// Amount in a given ISO 4217 currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Person the order is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_buyer_id: Option<String>,
    pub full_name: String,
    pub email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}

/// Person paying. May differ from the buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_payer_id: Option<String>,
    pub full_name: String,
    pub email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
    /// `YYYY/MM`
    pub expiration_date: String,
    pub name: String,
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last4 = self
            .number
            .get(self.number.len().saturating_sub(4)..)
            .unwrap_or_default();
        f.debug_struct("CreditCard")
            .field("number", &format!("****{last4}"))
            .field("security_code", &self.security_code.as_ref().map(|_| "[REDACTED]"))
            .field("expiration_date", &self.expiration_date)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub account_id: String,
    pub reference_code: String,
    pub description: String,
    /// Filled from the client language when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Computed from the credentials and merchant id when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    pub additional_values: BTreeMap<String, Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}

impl Order {
    /// Order for `value`, recorded as the `TX_VALUE` additional value.
    pub fn new(
        account_id: impl Into<String>,
        reference_code: impl Into<String>,
        description: impl Into<String>,
        value: Money,
    ) -> Self {
        let mut additional_values = BTreeMap::new();
        additional_values.insert(TX_VALUE.to_string(), value);
        Self {
            account_id: account_id.into(),
            reference_code: reference_code.into(),
            description: description.into(),
            language: None,
            signature: None,
            notify_url: None,
            partner_id: None,
            additional_values,
            buyer: None,
            shipping_address: None,
        }
    }

    pub fn tx_value(&self) -> Option<&Money> {
        self.additional_values.get(TX_VALUE)
    }

    pub fn with_buyer(mut self, buyer: Buyer) -> Self {
        self.buyer = Some(buyer);
        self
    }

    pub fn with_shipping_address(mut self, address: Address) -> Self {
        self.shipping_address = Some(address);
        self
    }

    pub fn with_additional_value(mut self, key: impl Into<String>, value: Money) -> Self {
        self.additional_values.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Authorization,
    Capture,
    AuthorizationAndCapture,
    Void,
    Refund,
}

/// A payment to submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_token_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_parameters: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Gateway payment method code, e.g. `VISA`, `PSE`, `BALOTO`.
    pub payment_method: String,
    /// ISO 3166 alpha-2 country code.
    pub payment_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Transaction {
    pub fn new(
        order: Order,
        transaction_type: TransactionType,
        payment_method: impl Into<String>,
        payment_country: impl Into<String>,
    ) -> Self {
        Self {
            order,
            payer: None,
            credit_card: None,
            credit_card_token_id: None,
            extra_parameters: BTreeMap::new(),
            transaction_type,
            payment_method: payment_method.into(),
            payment_country: payment_country.into(),
            device_session_id: None,
            ip_address: None,
            cookie: None,
            user_agent: None,
        }
    }

    pub fn with_payer(mut self, payer: Payer) -> Self {
        self.payer = Some(payer);
        self
    }

    pub fn with_credit_card(mut self, card: CreditCard) -> Self {
        self.credit_card = Some(card);
        self
    }

    pub fn with_extra_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra_parameters.insert(key.into(), value.into());
        self
    }

    /// Anti-fraud device fingerprint fields.
    pub fn with_device(
        mut self,
        device_session_id: impl Into<String>,
        ip_address: impl Into<String>,
        cookie: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        self.device_session_id = Some(device_session_id.into());
        self.ip_address = Some(ip_address.into());
        self.cookie = Some(cookie.into());
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CreditCard {
        CreditCard {
            number: "4097440000000004".to_string(),
            security_code: Some("321".to_string()),
            expiration_date: "2030/12".to_string(),
            name: "APPROVED".to_string(),
        }
    }

    #[test]
    fn test_order_records_tx_value() {
        let order = Order::new(
            "512321",
            "ref-1",
            "test",
            Money::new(Decimal::new(20000, 0), "COP"),
        );
        let value = order.tx_value().unwrap();
        assert_eq!(value.value, Decimal::new(20000, 0));
        assert_eq!(value.currency, "COP");
    }

    #[test]
    fn test_transaction_wire_shape() {
        let order = Order::new(
            "512321",
            "ref-1",
            "test",
            Money::new(Decimal::new(10050, 2), "USD"),
        );
        let tx = Transaction::new(order, TransactionType::AuthorizationAndCapture, "VISA", "PA")
            .with_credit_card(card())
            .with_extra_parameter("INSTALLMENTS_NUMBER", 1);
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "AUTHORIZATION_AND_CAPTURE");
        assert_eq!(json["paymentMethod"], "VISA");
        assert_eq!(json["paymentCountry"], "PA");
        assert_eq!(json["extraParameters"]["INSTALLMENTS_NUMBER"], 1);
        assert_eq!(json["creditCard"]["expirationDate"], "2030/12");
        assert_eq!(json["order"]["accountId"], "512321");
        assert_eq!(json["order"]["additionalValues"]["TX_VALUE"]["value"], 100.5);
        assert_eq!(json["order"]["additionalValues"]["TX_VALUE"]["currency"], "USD");
        assert!(json.get("payer").is_none());
        assert!(json["order"].get("signature").is_none());
    }

    #[test]
    fn test_credit_card_debug_masks_number() {
        let dbg = format!("{:?}", card());
        assert!(dbg.contains("****0004"));
        assert!(!dbg.contains("4097440000000004"));
        assert!(!dbg.contains("321\""));
    }
}
