//! Request signatures for the AnyPay API
//!
//! Every API call carries a `sign` parameter: the lowercase hex SHA-256 of
//! `endpoint || account_id || variable_part || api_key`. Payment links use a
//! separate scheme, MD5 over colon-delimited fields keyed by the
//! notification secret.

use crate::error::{AnypayError, Result};
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fmt;

/// Upstream API endpoints, named by their URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Balance,
    Rates,
    Commissions,
    Payments,
    Payouts,
    CreatePayout,
    IpNotification,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Balance => "balance",
            Endpoint::Rates => "rates",
            Endpoint::Commissions => "commissions",
            Endpoint::Payments => "payments",
            Endpoint::Payouts => "payouts",
            Endpoint::CreatePayout => "create-payout",
            Endpoint::IpNotification => "ip-notification",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the API request signature.
///
/// # Examples
///
/// ```
/// use anypay_lib::signer::sign;
///
/// let digest = sign("balance", "ABC", "", "KEY");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn sign(endpoint: &str, account_id: &str, variable_part: &str, secret_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(endpoint.as_bytes());
    hasher.update(account_id.as_bytes());
    hasher.update(variable_part.as_bytes());
    hasher.update(secret_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the payment link signature.
///
/// The receiving page recomputes this from the query string, so the fields
/// must be exactly the strings that end up in the link.
pub fn sign_link(
    currency: &str,
    amount: &str,
    notification_secret: &str,
    merchant_id: &str,
    pay_id: &str,
) -> String {
    let payload = format!("{currency}:{amount}:{notification_secret}:{merchant_id}:{pay_id}");
    hex::encode(Md5::digest(payload.as_bytes()))
}

/// Render an amount the way it is both signed and transmitted.
///
/// Always plain decimal notation: integral values keep one fractional digit
/// (`100.0`), everything else uses the shortest digits that round-trip
/// (`150.5`, `0.00001`). Amounts must be finite and positive.
pub fn format_amount(amount: f64) -> Result<String> {
    if !amount.is_finite() {
        return Err(AnypayError::signing(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount <= 0.0 {
        return Err(AnypayError::signing(format!(
            "amount must be positive, got {amount}"
        )));
    }
    // `Display` for f64 never switches to exponent notation.
    let mut rendered = amount.to_string();
    if !rendered.contains('.') {
        rendered.push_str(".0");
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_balance_vector() {
        assert_eq!(
            sign("balance", "ABC", "", "KEY"),
            "ee6bee04e8eb7dbb8ca6448c5c778bd22914a2ef593dd0fe22be9aa0ef95a52d"
        );
    }

    #[test]
    fn test_sign_is_plain_concatenation() {
        // Moving a byte between segments must not change the digest.
        assert_eq!(
            sign("commissions", "ABC", "P1", "KEY"),
            sign("commissionsABC", "", "P1KEY", "")
        );
    }

    #[test]
    fn test_sign_link_vector() {
        assert_eq!(
            sign_link("rub", "100.0", "s3cr3t", "42", "7"),
            "134d4eb33657abc43c995211392e7a52"
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0).unwrap(), "100.0");
        assert_eq!(format_amount(150.5).unwrap(), "150.5");
        assert_eq!(format_amount(0.01).unwrap(), "0.01");
        assert_eq!(format_amount(123.45).unwrap(), "123.45");
    }

    #[test]
    fn test_format_amount_never_uses_exponent() {
        assert_eq!(format_amount(1e16).unwrap(), "10000000000000000.0");
        assert_eq!(format_amount(0.00001).unwrap(), "0.00001");
        assert_eq!(format_amount(2.5e-7).unwrap(), "0.00000025");
    }

    #[test]
    fn test_format_amount_rejects_non_positive() {
        assert!(matches!(format_amount(-5.0), Err(AnypayError::Signing(_))));
        assert!(matches!(format_amount(0.0), Err(AnypayError::Signing(_))));
        assert!(format_amount(-0.0).is_err());
    }

    #[test]
    fn test_format_amount_rejects_non_finite() {
        assert!(matches!(
            format_amount(f64::NAN),
            Err(AnypayError::Signing(_))
        ));
        assert!(format_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::CreatePayout.as_str(), "create-payout");
        assert_eq!(Endpoint::IpNotification.to_string(), "ip-notification");
    }
}
