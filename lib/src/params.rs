//! Request parameter assembly.
//!
//! All request values pass through [`ToParam`], which is where absent values
//! are dropped and non-string values get their wire form.

use crate::error::Result;
use crate::signer::format_amount;
use reqwest::Url;

/// Conversion of a request value into its query-string form.
///
/// `Ok(None)` means the parameter is absent and must not be sent.
pub trait ToParam {
    fn to_param(&self) -> Result<Option<String>>;
}

impl ToParam for str {
    fn to_param(&self) -> Result<Option<String>> {
        Ok(Some(self.to_string()))
    }
}

impl ToParam for String {
    fn to_param(&self) -> Result<Option<String>> {
        Ok(Some(self.clone()))
    }
}

impl ToParam for f64 {
    fn to_param(&self) -> Result<Option<String>> {
        format_amount(*self).map(Some)
    }
}

impl ToParam for Url {
    fn to_param(&self) -> Result<Option<String>> {
        Ok(Some(self.as_str().to_string()))
    }
}

macro_rules! int_param {
    ($($ty:ty),+) => {
        $(
            impl ToParam for $ty {
                fn to_param(&self) -> Result<Option<String>> {
                    Ok(Some(self.to_string()))
                }
            }
        )+
    };
}

int_param!(u32, u64, i64);

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> Result<Option<String>> {
        (**self).to_param()
    }
}

impl<T: ToParam> ToParam for Option<T> {
    fn to_param(&self) -> Result<Option<String>> {
        match self {
            Some(value) => value.to_param(),
            None => Ok(None),
        }
    }
}

/// Ordered set of normalized request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, skipping it when the value is absent.
    pub fn push(mut self, key: &str, value: impl ToParam) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// In-place variant of [`Params::push`].
    pub fn insert(&mut self, key: &str, value: impl ToParam) -> Result<()> {
        if let Some(value) = value.to_param()? {
            self.pairs.push((key.to_string(), value));
        }
        Ok(())
    }

    /// Value of a parameter, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parameter names, in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::PayoutMethod;

    #[test]
    fn test_absent_values_are_dropped() {
        let params = Params::new()
            .push("project_id", "P1")
            .unwrap()
            .push("trans_id", None::<u64>)
            .unwrap()
            .push("offset", Some(20u64))
            .unwrap();

        assert_eq!(params.keys(), vec!["project_id", "offset"]);
        assert!(!params.contains("trans_id"));
    }

    #[test]
    fn test_values_are_normalized() {
        let url = Url::parse("https://shop.example/payout?id=5").unwrap();
        let params = Params::new()
            .push("amount", 150.5)
            .unwrap()
            .push("whole", 100.0)
            .unwrap()
            .push("payout_type", PayoutMethod::Mobile)
            .unwrap()
            .push("status_url", &url)
            .unwrap();

        assert_eq!(params.get("amount"), Some("150.5"));
        assert_eq!(params.get("whole"), Some("100.0"));
        assert_eq!(params.get("payout_type"), Some("mc"));
        assert_eq!(params.get("status_url"), Some("https://shop.example/payout?id=5"));
    }

    #[test]
    fn test_non_finite_amount_fails() {
        assert!(Params::new().push("amount", f64::NAN).is_err());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut params = Params::new();
        params.insert("b", "2").unwrap();
        params.insert("a", "1").unwrap();
        assert_eq!(
            params.into_pairs(),
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string())
            ]
        );
    }
}
