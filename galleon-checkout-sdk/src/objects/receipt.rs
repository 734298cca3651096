//! Store receipt validation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Store that issued a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStore {
    AppStore,
    GooglePlay,
    Galleon,
}

/// Request body for validating a store receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidateReceiptRequest {
    pub product_id: String,
    /// Opaque receipt payload as issued by the store.
    pub receipt: String,
    pub store: ReceiptStore,
}

/// Response returned after a receipt is checked with its store.
///
/// `transaction_id` and `purchased_at` are only set for valid receipts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidateReceiptResponse {
    pub is_valid: bool,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub purchased_at: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn test_receipt_messages() {
        let request: ValidateReceiptRequest = serde_json::from_value(json!({
            "product_id": "coins_100",
            "receipt": "MIIT...",
            "store": "google_play"
        }))
        .unwrap();
        assert_eq!(request.store, ReceiptStore::GooglePlay);

        let response = ValidateReceiptResponse {
            is_valid: true,
            transaction_id: Some("GPA.1234".to_string()),
            purchased_at: Some(datetime!(2024-05-01 10:00:00 +02:00)),
        };
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded["purchased_at"], json!("2024-05-01T10:00:00+02:00"));
        let decoded: ValidateReceiptResponse = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, response);

        let invalid: ValidateReceiptResponse =
            serde_json::from_value(json!({"is_valid": false})).unwrap();
        assert_eq!(invalid.transaction_id, None);
        assert_eq!(invalid.purchased_at, None);
    }
}
