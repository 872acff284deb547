//! Payment links for the hosted AnyPay payment page.
//!
//! A link is a URL the seller hands to a customer. No request is made here;
//! the payment page verifies the `sign` parameter when the customer opens it.

use crate::enums::{Language, PaymentCurrency, PaymentMethod, WireValue};
use crate::error::{AnypayError, Result};
use crate::params::Params;
use crate::signer::{format_amount, sign_link};
use reqwest::Url;
use tracing::warn;

/// Parameter names the link itself controls. Extras may not reuse them.
const RESERVED_KEYS: &[&str] = &[
    "merchant_id",
    "pay_id",
    "amount",
    "currency",
    "desc",
    "email",
    "phone",
    "method",
    "lang",
    "sign",
];

/// Contents of a payment link.
///
/// # Examples
///
/// ```
/// use anypay_lib::link::{build_payment_link, PaymentLinkRequest};
/// use anypay_lib::enums::Language;
///
/// let request = PaymentLinkRequest::new(7, 100.0)
///     .description("Order #7")
///     .language(Language::English);
/// let url = build_payment_link("https://anypay.io/merchant", "42", "s3cr3t", &request).unwrap();
/// assert!(url.as_str().contains("sign="));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLinkRequest {
    /// Seller-side order id
    pub pay_id: u64,
    pub amount: f64,
    pub currency: PaymentCurrency,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Preselected payment method
    pub method: Option<PaymentMethod>,
    pub language: Option<Language>,
    /// Additional unsigned query parameters, e.g. `success_url`
    pub extra: Vec<(String, Option<String>)>,
}

impl PaymentLinkRequest {
    pub fn new(pay_id: u64, amount: f64) -> Self {
        Self {
            pay_id,
            amount,
            currency: PaymentCurrency::Ruble,
            description: None,
            email: None,
            phone: None,
            method: None,
            language: None,
            extra: Vec::new(),
        }
    }

    #[must_use]
    pub fn currency(mut self, currency: PaymentCurrency) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Add an extra query parameter. `None` values are dropped.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.extra.push((key.into(), value.map(Into::into)));
        self
    }
}

/// Render a signed payment link on top of `base_url`.
pub fn build_payment_link(
    base_url: &str,
    merchant_id: &str,
    notification_secret: &str,
    request: &PaymentLinkRequest,
) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| AnypayError::invalid_url(base_url, e))?;

    let amount = format_amount(request.amount)?;
    let pay_id = request.pay_id.to_string();
    let sign = sign_link(
        request.currency.as_str(),
        &amount,
        notification_secret,
        merchant_id,
        &pay_id,
    );

    let mut params = Params::new()
        .push("merchant_id", merchant_id)?
        .push("pay_id", &pay_id)?
        .push("amount", &amount)?
        .push("currency", request.currency)?
        .push("desc", &request.description)?
        .push("email", &request.email)?
        .push("phone", &request.phone)?
        .push("method", request.method)?
        .push("lang", request.language)?;

    for (key, value) in &request.extra {
        if RESERVED_KEYS.contains(&key.as_str()) {
            warn!(key = %key, "ignoring extra payment link parameter that shadows a signed field");
            continue;
        }
        params.insert(key, value)?;
    }

    params.insert("sign", sign.as_str())?;

    url.query_pairs_mut().extend_pairs(params.as_slice());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keys_cover_builtin_params() {
        let request = PaymentLinkRequest::new(1, 1.0)
            .description("d")
            .email("e@example.com")
            .phone("+1")
            .method(PaymentMethod::Card)
            .language(Language::Russian);
        let url = build_payment_link("https://pay.example/merchant", "1", "s", &request).unwrap();
        for (key, _) in url.query_pairs() {
            assert!(RESERVED_KEYS.contains(&&*key), "{key} is not reserved");
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let request = PaymentLinkRequest::new(1, 1.0);
        let err = build_payment_link("not a url", "1", "s", &request).unwrap_err();
        assert!(matches!(err, AnypayError::InvalidUrl { .. }));
    }

    #[test]
    fn test_non_finite_amount_is_signing_error() {
        let request = PaymentLinkRequest::new(1, f64::NAN);
        let err = build_payment_link("https://pay.example/merchant", "1", "s", &request).unwrap_err();
        assert!(matches!(err, AnypayError::Signing(_)));
    }
}
