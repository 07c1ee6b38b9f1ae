use md5::Md5;
use sha2::{Digest, Sha256};

use crate::transaction::Order;
use crate::{Credentials, PayUError};

/// Digest used for the order signature. The gateway accepts either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Md5,
    Sha256,
}

/// Compute the order signature over
/// `apiKey~merchantId~referenceCode~value~currency`.
/// Returns the lowercase hex digest.
pub fn compute_signature(
    algorithm: SignatureAlgorithm,
    api_key: &str,
    merchant_id: &str,
    reference_code: &str,
    value: &str,
    currency: &str,
) -> String {
    let plain = format!("{api_key}~{merchant_id}~{reference_code}~{value}~{currency}");
    match algorithm {
        SignatureAlgorithm::Md5 => hex::encode(Md5::digest(plain.as_bytes())),
        SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(plain.as_bytes())),
    }
}

/// Sign `order` with the merchant's key. The amount is the order's
/// `TX_VALUE`, rendered without trailing zeros.
pub fn sign_order(
    algorithm: SignatureAlgorithm,
    credentials: &Credentials,
    merchant_id: &str,
    order: &Order,
) -> Result<String, PayUError> {
    let tx_value = order.tx_value().ok_or_else(|| {
        PayUError::InvalidTransaction(format!(
            "order {} has no TX_VALUE to sign",
            order.reference_code
        ))
    })?;
    Ok(compute_signature(
        algorithm,
        credentials.api_key(),
        merchant_id,
        &order.reference_code,
        &tx_value.value.normalize().to_string(),
        &tx_value.currency,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Money;
    use rust_decimal::Decimal;

    #[test]
    fn test_md5_known_vector() {
        // md5("4Vj8eK4rloUd272L48hsrarnUA~508029~TestPayU~3~USD")
        let sig = compute_signature(
            SignatureAlgorithm::Md5,
            "4Vj8eK4rloUd272L48hsrarnUA",
            "508029",
            "TestPayU",
            "3",
            "USD",
        );
        assert_eq!(sig, "ba9ffa71559580175585e45ce70b6c37");
    }

    #[test]
    fn test_sha256_is_hex_64() {
        let sig = compute_signature(SignatureAlgorithm::Sha256, "k", "1", "r", "10", "COP");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_order_normalizes_value() {
        let creds = Credentials::new("login", "4Vj8eK4rloUd272L48hsrarnUA");
        let order = Order::new(
            "512321",
            "TestPayU",
            "desc",
            Money::new(Decimal::new(300, 2), "USD"),
        );
        let sig = sign_order(SignatureAlgorithm::Md5, &creds, "508029", &order).unwrap();
        assert_eq!(sig, "ba9ffa71559580175585e45ce70b6c37");
    }

    #[test]
    fn test_different_inputs_differ() {
        let a = compute_signature(SignatureAlgorithm::Md5, "k", "1", "r", "10", "COP");
        let b = compute_signature(SignatureAlgorithm::Md5, "k", "1", "r", "11", "COP");
        assert_ne!(a, b);
    }
}
