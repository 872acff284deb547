//! Library API - high-level client for the AnyPay merchant API
//!
//! [`AnypayClient`] turns each API operation into one signed GET request and
//! decodes the answer into the typed records from [`crate::models`]. All
//! shared state is read-only after construction, so one client can serve any
//! number of concurrent calls.

use crate::config::{Config, Credentials};
use crate::constants::{API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT, MERCHANT_URL};
use crate::enums::{CommissionType, PayoutCurrency, PayoutMethod, WireValue};
use crate::error::{AnypayError, Result};
use crate::http::{HttpClientBuilder, HttpResponse, Transport};
use crate::link::{build_payment_link, PaymentLinkRequest};
use crate::models::{
    BalancePayload, Commissions, IpNotificationPayload, Payment, PaymentsPayload, Payout,
    PayoutsPayload, Rates,
};
use crate::params::Params;
use crate::signer::{format_amount, sign, Endpoint};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

/// Client for the AnyPay API.
///
/// # Example
/// ```no_run
/// # use anypay_lib::{AnypayClient, Credentials};
/// # async fn example() -> anypay_lib::Result<()> {
/// let client = AnypayClient::new(Credentials::new("ABC", "KEY"))?;
/// let balance = client.balance().await?;
/// println!("{balance}");
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AnypayClient {
    credentials: Arc<Credentials>,
    base_url: String,
    merchant_url: String,
    transport: Arc<dyn Transport>,
}

impl AnypayClient {
    /// Create a client backed by a pooled HTTPS connection with default
    /// timeout and user agent.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = HttpClientBuilder::new()
            .timeout(DEFAULT_HTTP_TIMEOUT_SECS)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self::with_transport(credentials, Arc::new(http)))
    }

    /// Create a client on top of a caller-provided transport.
    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials: Arc::new(credentials),
            base_url: API_URL.to_string(),
            merchant_url: MERCHANT_URL.to_string(),
            transport,
        }
    }

    /// Create a client from a validated configuration.
    ///
    /// Honors the configured API and payment page URLs, timeout and user agent.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with_http(config, config.http_client_builder())
    }

    /// Like [`AnypayClient::from_config`], with a caller-adjusted HTTP builder.
    ///
    /// Start from [`Config::http_client_builder`] to keep the configured
    /// timeouts and user agent.
    pub fn from_config_with_http(config: &Config, http: HttpClientBuilder) -> Result<Self> {
        config.validate()?;
        let http = http.build()?;

        Ok(Self::with_transport(config.credentials(), Arc::new(http))
            .base_url(config.api_url())
            .merchant_url(config.merchant_url()))
    }

    /// Override the API base URL (`https://anypay.io/api` by default).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the payment page URL used by [`AnypayClient::payment_link`].
    #[must_use]
    pub fn merchant_url(mut self, url: impl Into<String>) -> Self {
        self.merchant_url = url.into();
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Current account balance.
    pub async fn balance(&self) -> Result<f64> {
        let payload: BalancePayload = self.call(Endpoint::Balance, "", Params::new()).await?;
        Ok(payload.balance)
    }

    /// Currency conversion rates for incoming payments and outgoing payouts.
    pub async fn rates(&self) -> Result<Rates> {
        self.call(Endpoint::Rates, "", Params::new()).await
    }

    /// Commission percentages of the configured project.
    pub async fn commissions(&self) -> Result<Commissions> {
        let project_id = self.credentials.require_project_id("commissions")?;
        let params = Params::new().push("project_id", project_id)?;
        self.call(Endpoint::Commissions, project_id, params).await
    }

    /// Incoming payments of the configured project, in upstream order.
    pub async fn payments(&self, query: &PaymentsQuery) -> Result<Vec<Payment>> {
        let project_id = self.credentials.require_project_id("payments")?;
        let params = Params::new()
            .push("project_id", project_id)?
            .push("trans_id", query.transaction_id)?
            .push("pay_id", query.pay_id)?
            .push("offset", query.offset)?;

        let payload: PaymentsPayload = self.call(Endpoint::Payments, project_id, params).await?;
        Ok(payload.payments)
    }

    /// Outgoing payouts, in upstream order.
    pub async fn payouts(&self, query: &PayoutsQuery) -> Result<Vec<Payout>> {
        let params = Params::new()
            .push("trans_id", query.transaction_id)?
            .push("payout_id", query.payout_id)?
            .push("offset", query.offset)?;

        let payload: PayoutsPayload = self.call(Endpoint::Payouts, "", params).await?;
        Ok(payload.payouts)
    }

    /// Send money to a wallet, card or phone number.
    pub async fn create_payout(&self, payout: &NewPayout) -> Result<Payout> {
        // The signed variable part and the query must carry identical strings.
        let payout_id = payout.payout_id.to_string();
        let method = payout.method.as_str();
        let amount = format_amount(payout.amount)?;
        let variable_part = format!("{payout_id}{method}{amount}{}", payout.wallet);

        let params = Params::new()
            .push("payout_id", &payout_id)?
            .push("payout_type", method)?
            .push("amount", &amount)?
            .push("wallet", &payout.wallet)?
            .push("commission_type", payout.commission_type)?
            .push("currency", payout.currency)?
            .push("status_url", &payout.status_url)?;

        self.call(Endpoint::CreatePayout, &variable_part, params).await
    }

    /// Addresses AnyPay sends payment notifications from.
    pub async fn ip_notifications(&self) -> Result<Vec<Ipv4Addr>> {
        let payload: IpNotificationPayload =
            self.call(Endpoint::IpNotification, "", Params::new()).await?;
        Ok(payload.ip)
    }

    /// Signed link to the hosted payment page. Makes no request.
    pub fn payment_link(&self, request: &PaymentLinkRequest) -> Result<Url> {
        let merchant_id = self.credentials.require_project_id("payment link")?;
        let secret = self.credentials.require_secret("payment link")?;
        build_payment_link(&self.merchant_url, merchant_id, secret, request)
    }

    /// Release the client and its pooled connection.
    ///
    /// Dropping the client has the same effect; this makes the end of its
    /// lifetime explicit at the call site.
    pub fn close(self) {
        debug!(account_id = %self.credentials.account_id, "closing AnyPay client");
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        variable_part: &str,
        mut params: Params,
    ) -> Result<T> {
        let url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint,
            self.credentials.account_id
        );
        debug!(%endpoint, params = ?params.keys(), "calling AnyPay API");

        let signature = sign(
            endpoint.as_str(),
            &self.credentials.account_id,
            variable_part,
            &self.credentials.api_key,
        );
        params.insert("sign", signature.as_str())?;

        let response = self.transport.get(&url, params.as_slice()).await?;
        debug!(%endpoint, status = response.status_code, "received response");
        decode_response(endpoint, &response)
    }
}

impl std::fmt::Debug for AnypayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnypayClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("merchant_url", &self.merchant_url)
            .finish_non_exhaustive()
    }
}

/// Filters for [`AnypayClient::payments`]. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentsQuery {
    /// AnyPay transaction id
    pub transaction_id: Option<u64>,
    /// Seller-side payment id
    pub pay_id: Option<u64>,
    /// Paging offset
    pub offset: Option<u64>,
}

impl PaymentsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn transaction_id(mut self, id: u64) -> Self {
        self.transaction_id = Some(id);
        self
    }

    #[must_use]
    pub fn pay_id(mut self, id: u64) -> Self {
        self.pay_id = Some(id);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Filters for [`AnypayClient::payouts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayoutsQuery {
    pub transaction_id: Option<u64>,
    pub payout_id: Option<u64>,
    pub offset: Option<u64>,
}

impl PayoutsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn transaction_id(mut self, id: u64) -> Self {
        self.transaction_id = Some(id);
        self
    }

    #[must_use]
    pub fn payout_id(mut self, id: u64) -> Self {
        self.payout_id = Some(id);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// A payout to create.
///
/// `commission_type` and `currency` are sent only when set; AnyPay charges
/// the commission to the payout in rubles otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayout {
    /// Seller-side payout id, unique per account
    pub payout_id: u64,
    pub method: PayoutMethod,
    pub amount: f64,
    pub wallet: String,
    pub commission_type: Option<CommissionType>,
    pub currency: Option<PayoutCurrency>,
    /// Where AnyPay reports status changes
    pub status_url: Option<Url>,
}

impl NewPayout {
    pub fn new(payout_id: u64, method: PayoutMethod, amount: f64, wallet: impl Into<String>) -> Self {
        Self {
            payout_id,
            method,
            amount,
            wallet: wallet.into(),
            commission_type: None,
            currency: None,
            status_url: None,
        }
    }

    #[must_use]
    pub fn commission_type(mut self, commission_type: CommissionType) -> Self {
        self.commission_type = Some(commission_type);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: PayoutCurrency) -> Self {
        self.currency = Some(currency);
        self
    }

    #[must_use]
    pub fn status_url(mut self, url: Url) -> Self {
        self.status_url = Some(url);
        self
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Check the status, parse the body and unwrap the `result` envelope.
fn decode_response<T: DeserializeOwned>(endpoint: Endpoint, response: &HttpResponse) -> Result<T> {
    if !response.is_success() {
        return Err(AnypayError::HttpStatus {
            status: response.status_code,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        });
    }

    let value: Value = serde_json::from_str(&response.body_string()?).map_err(|e| {
        let content_type = response
            .get_header("content-type")
            .map_or("unknown", String::as_str);
        AnypayError::protocol(format!(
            "{endpoint} returned invalid JSON (content-type {content_type}): {e}"
        ))
    })?;

    let payload = unwrap_envelope(endpoint, value)?;

    serde_json::from_value(payload)
        .map_err(|e| AnypayError::decoding(format!("{endpoint}: {e}")))
}

fn unwrap_envelope(endpoint: Endpoint, value: Value) -> Result<Value> {
    let Value::Object(mut body) = value else {
        return Err(AnypayError::protocol(format!(
            "{endpoint} returned a non-object JSON body"
        )));
    };

    match body.remove("error") {
        None | Some(Value::Null) => {}
        Some(error) => {
            let ApiErrorBody { code, message } = match error {
                Value::String(message) => ApiErrorBody { code: 0, message },
                other => serde_json::from_value(other).map_err(|e| {
                    AnypayError::protocol(format!("{endpoint} returned a malformed error: {e}"))
                })?,
            };
            return Err(AnypayError::Api { code, message });
        }
    }

    Ok(body.remove("result").unwrap_or(Value::Object(body)))
}
