//! Tax lookup for a price in a given location.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for looking up the tax on a price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRequest {
    /// ISO 3166-1 alpha-2.
    pub country_code: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

/// Tax lines for the requested price, keyed by tax name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResponse {
    #[serde(default)]
    pub should_display_price_including_tax: bool,
    #[serde(default, with = "crate::codec::decimal::map")]
    pub taxes: BTreeMap<String, Decimal>,
}

impl TaxResponse {
    pub fn total(&self) -> Decimal {
        self.taxes.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_tax_lines_are_exact() {
        let response: TaxResponse = serde_json::from_value(json!({
            "should_display_price_including_tax": true,
            "taxes": {"state": 0.07, "city": 0.02, "county": 0.01}
        }))
        .unwrap();
        assert_eq!(response.total(), Decimal::from_str("0.10").unwrap());
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"should_display_price_including_tax":true,"taxes":{"city":0.02,"county":0.01,"state":0.07}}"#
        );
    }

    #[test]
    fn test_null_taxes_read_as_empty() {
        let response: TaxResponse = serde_json::from_value(json!({"taxes": null})).unwrap();
        assert_eq!(response, TaxResponse::default());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"should_display_price_including_tax": false, "taxes": {}})
        );
    }

    #[test]
    fn test_request_amount() {
        let request: TaxRequest = serde_json::from_value(json!({
            "country_code": "US",
            "region": "CA",
            "amount": 19.99
        }))
        .unwrap();
        assert_eq!(request.amount.to_string(), "19.99");
        assert_eq!(request.postal_code, None);
    }
}
