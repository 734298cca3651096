//! Listing the payment method definitions the app supports.

use serde::{Deserialize, Serialize};

use super::payment_method_definition::PaymentMethodDefinition;
use crate::codec::lenient::null_as_default;

/// Carries no fields today; kept as a record so filters can be added without
/// breaking older servers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentMethodDefinitionsRequest {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodDefinitionsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_method_definitions: Vec<PaymentMethodDefinition>,
}
