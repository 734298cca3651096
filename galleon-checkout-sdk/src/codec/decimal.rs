//! Decimal maps written as exact JSON numbers, e.g. tax lines.
//!
//! Scalar amounts use `rust_decimal::serde::arbitrary_precision` directly;
//! this module applies the same encoding to every value of a map. `null`
//! reads as an empty map.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct Amount(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

pub mod map {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &BTreeMap<String, Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(value.iter().map(|(key, amount)| (key, Amount(*amount))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Decimal>, D::Error> {
        Ok(Option::<BTreeMap<String, Amount>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .map(|(key, Amount(amount))| (key, amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Price {
        #[serde(with = "rust_decimal::serde::arbitrary_precision")]
        amount: Decimal,
        #[serde(with = "crate::codec::decimal::map", default)]
        taxes: BTreeMap<String, Decimal>,
    }

    #[test]
    fn test_decimal_fidelity() {
        let price = Price {
            amount: Decimal::from_str("4.99").unwrap(),
            taxes: BTreeMap::from([("vat".to_string(), Decimal::from_str("0.02").unwrap())]),
        };
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"amount":4.99,"taxes":{"vat":0.02}}"#);

        let decoded: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.amount.to_string(), "4.99");
        assert_eq!(decoded.taxes["vat"].to_string(), "0.02");
        assert_eq!(decoded, price);
    }

    #[test]
    fn test_precision_beyond_f64() {
        let decoded: Price =
            serde_json::from_str(r#"{"amount": 12345678901234567.89, "taxes": null}"#).unwrap();
        assert_eq!(decoded.amount.to_string(), "12345678901234567.89");
        assert!(decoded.taxes.is_empty());
    }

    #[test]
    fn test_map_values_must_be_numbers() {
        assert!(
            serde_json::from_str::<Price>(r#"{"amount": 1, "taxes": {"vat": true}}"#).is_err()
        );
    }
}
