//! Typed records returned by the AnyPay API.

use crate::de::{flexible_f64, flexible_u64, keyed_list, optional_timestamp};
use crate::enums::{
    CommissionType, PaymentMethod, PaymentStatus, PayoutMethod, PayoutStatus, WireValue,
};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use tracing::debug;

/// Conversion rates for incoming payments in foreign currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomingRates {
    #[serde(rename = "wmz", deserialize_with = "flexible_f64")]
    pub webmoney_dollar: f64,
    #[serde(rename = "usd", deserialize_with = "flexible_f64")]
    pub dollar: f64,
    #[serde(rename = "eur", deserialize_with = "flexible_f64")]
    pub euro: f64,
    #[serde(rename = "btc", deserialize_with = "flexible_f64")]
    pub bitcoin: f64,
    #[serde(rename = "ltc", deserialize_with = "flexible_f64")]
    pub litecoin: f64,
    #[serde(rename = "dash", deserialize_with = "flexible_f64")]
    pub dash: f64,
    #[serde(rename = "zec", deserialize_with = "flexible_f64")]
    pub zcash: f64,
}

/// Conversion rates applied to outgoing payouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutgoingRates {
    #[serde(rename = "wmz", deserialize_with = "flexible_f64")]
    pub webmoney_dollar: f64,
    #[serde(rename = "uah", deserialize_with = "flexible_f64")]
    pub hryvnia: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    #[serde(rename = "in")]
    pub incoming: IncomingRates,
    #[serde(rename = "out")]
    pub outgoing: OutgoingRates,
}

/// Commission percentage for every payment method.
///
/// Decoding fails unless every [`PaymentMethod`] is present, so lookups
/// never miss. Keys for methods this crate does not know are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Commissions {
    rates: HashMap<PaymentMethod, f64>,
}

impl Commissions {
    /// Commission percentage charged for `method`.
    pub fn get(&self, method: PaymentMethod) -> f64 {
        self.rates[&method]
    }

    /// `(method, percentage)` pairs in [`PaymentMethod::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PaymentMethod, f64)> + '_ {
        PaymentMethod::ALL
            .iter()
            .map(move |method| (*method, self.get(*method)))
    }

    /// Build from an explicit table, requiring every method.
    pub fn from_rates(rates: HashMap<PaymentMethod, f64>) -> Result<Self, String> {
        let missing: Vec<&str> = PaymentMethod::ALL
            .iter()
            .filter(|m| !rates.contains_key(*m))
            .map(WireValue::as_str)
            .collect();
        if missing.is_empty() {
            Ok(Self { rates })
        } else {
            Err(format!("missing commission for: {}", missing.join(", ")))
        }
    }
}

impl Serialize for Commissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PaymentMethod::ALL.len()))?;
        for (method, rate) in self.iter() {
            map.serialize_entry(method.as_str(), &rate)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Commissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Rate(#[serde(deserialize_with = "flexible_f64")] f64);

        let raw = HashMap::<String, Rate>::deserialize(deserializer)?;
        let mut rates = HashMap::with_capacity(raw.len());
        for (key, Rate(rate)) in raw {
            match PaymentMethod::from_wire(&key) {
                Some(method) => {
                    rates.insert(method, rate);
                }
                // Methods added upstream must not break decoding of the known ones.
                None => debug!(method = %key, "ignoring commission for unknown payment method"),
            }
        }
        Commissions::from_rates(rates).map_err(serde::de::Error::custom)
    }
}

/// An incoming payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Id assigned by AnyPay
    #[serde(deserialize_with = "flexible_u64")]
    pub transaction_id: u64,
    /// Id assigned by the seller when the payment was created
    #[serde(deserialize_with = "flexible_u64")]
    pub pay_id: u64,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    #[serde(deserialize_with = "flexible_f64")]
    pub amount: f64,
    /// Amount credited to the seller after commission
    #[serde(deserialize_with = "flexible_f64")]
    pub profit: f64,
    pub email: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(rename = "date")]
    pub created_at: String,
    #[serde(
        rename = "pay_date",
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<String>,
}

/// An outgoing payout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    /// Id assigned by AnyPay
    #[serde(deserialize_with = "flexible_u64")]
    pub transaction_id: u64,
    /// Id assigned by the seller
    #[serde(deserialize_with = "flexible_u64")]
    pub payout_id: u64,
    #[serde(rename = "payout_type")]
    pub method: PayoutMethod,
    pub status: PayoutStatus,
    #[serde(deserialize_with = "flexible_f64")]
    pub amount: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub commission: f64,
    pub commission_type: CommissionType,
    #[serde(deserialize_with = "flexible_f64")]
    pub rate: f64,
    /// Destination wallet, card or phone number
    pub wallet: String,
    #[serde(rename = "date")]
    pub created_at: String,
    #[serde(
        rename = "complete_date",
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<String>,
}

// ==================== Endpoint payloads ====================

#[derive(Debug, Deserialize)]
pub(crate) struct BalancePayload {
    #[serde(deserialize_with = "flexible_f64")]
    pub balance: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentsPayload {
    #[serde(deserialize_with = "keyed_list")]
    pub payments: Vec<Payment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayoutsPayload {
    #[serde(deserialize_with = "keyed_list")]
    pub payouts: Vec<Payout>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IpNotificationPayload {
    pub ip: Vec<Ipv4Addr>,
}
