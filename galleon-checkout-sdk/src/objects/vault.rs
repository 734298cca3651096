//! Vaulting and removing a user's payment methods.

use serde::{Deserialize, Serialize};

use super::action::ValueMap;
use super::user_payment_method::UserPaymentMethod;
use crate::codec::lenient::null_as_default;
use crate::registry::PaymentMethodKind;

/// Ask the server to vault a method of the given kind. `values` holds what
/// the vaulting actions produced (a tokenized card, a wallet token).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultPaymentMethodRequest {
    #[serde(rename = "type")]
    pub payment_method_type: PaymentMethodKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: ValueMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultPaymentMethodResponse {
    #[serde(alias = "payment_method")]
    pub user_payment_method: UserPaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemovePaymentMethodRequest {
    pub payment_method_id: String,
}

/// Returns the remaining methods so the client can refresh its list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovePaymentMethodResponse {
    pub removed_id: String,
    #[serde(
        default,
        alias = "payment_methods",
        deserialize_with = "null_as_default"
    )]
    pub user_payment_methods: Vec<UserPaymentMethod>,
}
