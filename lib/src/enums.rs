//! Closed sets of wire codes used by the AnyPay API.
//!
//! Each enum serializes to exactly one lowercase wire string. Decoding an
//! unknown string is an error rather than a silent fallback.

use crate::error::{AnypayError, Result};
use crate::params::ToParam;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Shared behavior of every wire enumeration.
pub trait WireValue: Copy + Sized + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Name used in error messages
    const KIND: &'static str;

    /// The wire string for this variant.
    fn as_str(&self) -> &'static str;

    /// Look up a variant by its wire string.
    fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

/// Declares a wire enum together with its `Display`, `FromStr`, serde and
/// request-parameter impls.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl WireValue for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];
            const KIND: &'static str = $kind;

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AnypayError;

            fn from_str(s: &str) -> Result<Self> {
                <$name as WireValue>::from_wire(s).ok_or_else(|| unknown_wire_value::<$name>(s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$name as WireValue>::from_wire(&raw).ok_or_else(|| {
                    serde::de::Error::custom(unknown_wire_value::<$name>(&raw))
                })
            }
        }

        impl ToParam for $name {
            fn to_param(&self) -> Result<Option<String>> {
                Ok(Some(self.as_str().to_string()))
            }
        }
    };
}

fn unknown_wire_value<T: WireValue>(raw: &str) -> AnypayError {
    let expected: Vec<&str> = T::ALL.iter().map(WireValue::as_str).collect();
    AnypayError::decoding(format!(
        "unknown {} '{raw}', expected one of: {}",
        T::KIND,
        expected.join(", ")
    ))
}

wire_enum! {
    /// Lifecycle state of an incoming payment.
    PaymentStatus, "payment status" {
        Paid => "paid",
        Waiting => "waiting",
        Refund => "refund",
        Canceled => "canceled",
        Expired => "expired",
        Error => "error",
    }
}

wire_enum! {
    /// Method a customer used to pay.
    PaymentMethod, "payment method" {
        Card => "card",
        ApplePay => "applepay",
        GooglePay => "googlepay",
        SamsungPay => "samsungpay",
        Qiwi => "qiwi",
        YandexMoney => "ym",
        WebMoney => "wm",
        Payeer => "payeer",
        Bitcoin => "btc",
        Litecoin => "ltc",
        Dash => "dash",
        Zcash => "zec",
        PerfectMoney => "pm",
        Advcash => "advcash",
        Exmo => "exmo",
        Mts => "mts",
        Beeline => "beeline",
        Megafon => "megafon",
        Tele2 => "tele2",
        /// QIWI cash terminals
        QiwiTerminals => "term",
        Bank => "bank",
        Contact => "contact",
        Unistream => "unistream",
    }
}

wire_enum! {
    /// Destination system of a payout.
    PayoutMethod, "payout method" {
        Qiwi => "qiwi",
        YandexMoney => "ym",
        /// WebMoney dollar wallet
        WebMoney => "wm",
        /// Mobile phone balance
        Mobile => "mc",
        Card => "card",
    }
}

wire_enum! {
    /// Lifecycle state of a payout.
    PayoutStatus, "payout status" {
        Paid => "paid",
        InProcess => "in_process",
        Canceled => "canceled",
        Blocked => "blocked",
    }
}

wire_enum! {
    /// Where a payout commission is charged from.
    CommissionType, "commission type" {
        /// Deducted from the payout amount
        Payment => "payment",
        /// Charged to the account balance
        Balance => "balance",
    }
}

wire_enum! {
    PayoutCurrency, "payout currency" {
        Ruble => "rub",
        Hryvnia => "uah",
    }
}

wire_enum! {
    PaymentCurrency, "payment currency" {
        Ruble => "rub",
        Hryvnia => "uah",
        BelarusianRuble => "byn",
        Tenge => "kzt",
        Dollar => "usd",
        Euro => "eur",
    }
}

wire_enum! {
    /// Language of the hosted payment page.
    Language, "language" {
        Russian => "ru",
        English => "en",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_wire_table<T>()
    where
        T: WireValue + FromStr<Err = AnypayError> + PartialEq + fmt::Debug,
    {
        for variant in T::ALL {
            let wire = variant.as_str();
            assert_eq!(wire, wire.to_lowercase(), "{wire} is not lowercase");
            assert_eq!(&wire.parse::<T>().unwrap(), variant);
        }
        let mut seen: Vec<&str> = T::ALL.iter().map(WireValue::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), T::ALL.len(), "duplicate wire strings");
    }

    #[test]
    fn test_wire_tables_are_bijective() {
        assert_wire_table::<PaymentStatus>();
        assert_wire_table::<PaymentMethod>();
        assert_wire_table::<PayoutMethod>();
        assert_wire_table::<PayoutStatus>();
        assert_wire_table::<CommissionType>();
        assert_wire_table::<PayoutCurrency>();
        assert_wire_table::<PaymentCurrency>();
        assert_wire_table::<Language>();
    }

    #[test]
    fn test_variant_counts() {
        assert_eq!(PaymentMethod::ALL.len(), 23);
        assert_eq!(PaymentStatus::ALL.len(), 6);
        assert_eq!(PayoutMethod::ALL.len(), 5);
    }

    #[test]
    fn test_serde_uses_wire_string() {
        let json = serde_json::to_string(&PayoutStatus::InProcess).unwrap();
        assert_eq!(json, "\"in_process\"");
        let method: PaymentMethod = serde_json::from_str("\"term\"").unwrap();
        assert_eq!(method, PaymentMethod::QiwiTerminals);
    }

    #[test]
    fn test_unknown_wire_value_is_rejected() {
        let err = serde_json::from_str::<PaymentStatus>("\"refunded\"").unwrap_err();
        assert!(err.to_string().contains("unknown payment status 'refunded'"));

        let err = "QIWI".parse::<PayoutMethod>().unwrap_err();
        assert!(matches!(err, AnypayError::Decoding(_)));
    }

    #[test]
    fn test_display_is_wire_string_not_variant_name() {
        assert_eq!(PayoutMethod::YandexMoney.to_string(), "ym");
        assert_eq!(PaymentCurrency::Ruble.to_string(), "rub");
    }

    #[test]
    fn test_to_param() {
        assert_eq!(
            CommissionType::Balance.to_param().unwrap(),
            Some("balance".to_string())
        );
    }
}
