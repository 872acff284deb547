//! anypay-lib - Client library for the AnyPay merchant API
//!
//! This library provides request signing, the typed API client, payment link
//! construction, the HTTP transport and configuration management.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod client;
pub mod config;
pub mod constants;
pub mod de;
pub mod enums;
pub mod error;
pub mod http;
pub mod link;
pub mod models;
pub mod params;
pub mod signer;

pub use client::{AnypayClient, NewPayout, PaymentsQuery, PayoutsQuery};
pub use config::{Config, ConfigBuilder, Credentials};
pub use enums::{
    CommissionType, Language, PaymentCurrency, PaymentMethod, PaymentStatus, PayoutCurrency,
    PayoutMethod, PayoutStatus, WireValue,
};
pub use error::{AnypayError, Result};
pub use http::{HttpClient, HttpClientBuilder, HttpResponse, Transport};
pub use link::{build_payment_link, PaymentLinkRequest};
pub use models::{Commissions, IncomingRates, OutgoingRates, Payment, Payout, Rates};
pub use params::{Params, ToParam};
pub use signer::{format_amount, sign, sign_link, Endpoint};

// Re-exported so callers can build `status_url` values without a direct dependency.
pub use reqwest::Url;
