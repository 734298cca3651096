//! Session bootstrap and account updates for the signed-in user.

use serde::{Deserialize, Serialize};

use super::action::ValueMap;
use super::user_payment_method::UserPaymentMethod;
use crate::codec::lenient::null_as_default;

/// Sent once per client start, after authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeRequest {
    pub sdk_version: String,
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ValueMap,
}

/// The user's state: identity plus vaulted payment methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeResponse {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "payment_methods",
        deserialize_with = "null_as_default"
    )]
    pub user_payment_methods: Vec<UserPaymentMethod>,
    /// Client configuration flags chosen by the server.
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: ValueMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateEmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateEmailResponse {
    pub email: String,
    #[serde(default)]
    pub is_verified: bool,
}
