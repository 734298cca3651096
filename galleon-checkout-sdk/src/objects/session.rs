//! Checkout session lifecycle: create, charge, cancel.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::action::{Action, ValueMap};
use crate::codec::lenient::null_as_default;

/// Lifecycle state of a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Charged,
    Canceled,
    Failed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Pending => write!(f, "pending"),
            SessionStatus::Charged => write!(f, "charged"),
            SessionStatus::Canceled => write!(f, "canceled"),
            SessionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Server-side state of one checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: Uuid,
    pub status: SessionStatus,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax: Decimal,
    /// ISO 4217 code.
    pub currency: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ValueMap,
}

/// Request body for opening a checkout session for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ValueMap,
}

fn default_quantity() -> u32 {
    1
}

/// Response returned after a checkout session is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCheckoutSessionResponse {
    pub session: CheckoutSession,
}

/// Request body for charging a vaulted payment method within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub session_id: Uuid,
    /// Identifier of the vaulted method to charge.
    pub payment_method_id: String,
    /// Values produced by the charge actions the client already ran.
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: ValueMap,
}

/// Response returned after a charge attempt.
///
/// A non-empty `charge_actions` list means the charge is not final yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeResponse {
    pub session: CheckoutSession,
    /// Further steps the client must run, in order, e.g. a 3-D Secure
    /// challenge.
    #[serde(default, deserialize_with = "null_as_default")]
    pub charge_actions: Vec<Action>,
    pub is_success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body for canceling a pending session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelCheckoutSessionRequest {
    pub session_id: Uuid,
}

/// Response returned with the session in its final state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelCheckoutSessionResponse {
    pub session: CheckoutSession,
}
