//! Payment methods vaulted for a user.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::action::{Action, ValueMap};
use crate::codec::fields::{self, FieldSpec, FieldType};
use crate::codec::timestamp::Timestamp;
use crate::codec::{CodecError, Family, scope};
use crate::registry::{FamilyId, PaymentMethodKind};

pub(crate) const BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldType::String),
    FieldSpec::optional("display_name", FieldType::String),
    FieldSpec::optional("icon_url", FieldType::String),
    FieldSpec::optional("is_selected", FieldType::Bool),
    FieldSpec::optional("charge_actions", FieldType::ActionList),
    FieldSpec::optional("metadata", FieldType::ValueMap),
    FieldSpec::optional("created_at", FieldType::DateTime),
];

const CREDIT_CARD_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("card_type", FieldType::String),
    FieldSpec::required("last_four_digits", FieldType::String),
    FieldSpec::optional("expiration_month", FieldType::Integer { min: 1, max: 12 }),
    FieldSpec::optional("expiration_year", FieldType::Integer { min: 0, max: 9999 }),
];

const WALLET_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("email", FieldType::String),
    FieldSpec::optional("token", FieldType::String),
];

pub(crate) fn variant_fields(kind: PaymentMethodKind) -> &'static [FieldSpec] {
    match kind {
        PaymentMethodKind::CreditCard => CREDIT_CARD_FIELDS,
        PaymentMethodKind::GooglePay | PaymentMethodKind::Paypal => WALLET_FIELDS,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserPaymentMethod {
    pub common: UserMethodCommon,
    pub details: UserMethodDetails,
}

/// Base fields of every user method. Optional fields are written back only
/// when the decoded document carried them; `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMethodCommon {
    /// Server-assigned identifier of the vaulted method.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Whether this is the user's current default method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl UserMethodCommon {
    pub fn is_selected(&self) -> bool {
        self.is_selected.unwrap_or(false)
    }

    pub fn charge_actions(&self) -> &[Action] {
        self.charge_actions.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserMethodDetails {
    CreditCard(CreditCardMethod),
    GooglePay(WalletMethod),
    Paypal(WalletMethod),
}

impl UserMethodDetails {
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            UserMethodDetails::CreditCard(_) => PaymentMethodKind::CreditCard,
            UserMethodDetails::GooglePay(_) => PaymentMethodKind::GooglePay,
            UserMethodDetails::Paypal(_) => PaymentMethodKind::Paypal,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCardMethod {
    /// Card network, e.g. `visa`.
    pub card_type: String,
    pub last_four_digits: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<u16>,
}

/// Google Pay and PayPal accounts share a shape but stay distinct variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletMethod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Provider-specific token for the vaulted account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserPaymentMethod {
    pub fn new(common: UserMethodCommon, details: UserMethodDetails) -> Self {
        Self { common, details }
    }

    pub fn id(&self) -> &str {
        &self.common.id
    }
}

impl Family for UserPaymentMethod {
    const FAMILY: FamilyId = FamilyId::UserPaymentMethod;

    fn kind(&self) -> PaymentMethodKind {
        self.details.kind()
    }

    fn from_document(kind: PaymentMethodKind, document: &Value) -> Result<Self, CodecError> {
        let context = Self::FAMILY.as_str();
        let common = fields::populate(context, document)?;
        let details = match kind {
            PaymentMethodKind::CreditCard => {
                UserMethodDetails::CreditCard(fields::populate(context, document)?)
            }
            PaymentMethodKind::GooglePay => {
                UserMethodDetails::GooglePay(fields::populate(context, document)?)
            }
            PaymentMethodKind::Paypal => {
                UserMethodDetails::Paypal(fields::populate(context, document)?)
            }
        };
        Ok(Self { common, details })
    }

    fn write_fields(&self, document: &mut Map<String, Value>) -> Result<(), CodecError> {
        fields::flatten(&self.common, document)?;
        match &self.details {
            UserMethodDetails::CreditCard(details) => fields::flatten(details, document),
            UserMethodDetails::GooglePay(details) | UserMethodDetails::Paypal(details) => {
                fields::flatten(details, document)
            }
        }
    }
}

impl Serialize for UserPaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        scope::serialize_member(self, serializer)
    }
}

impl<'de> Deserialize<'de> for UserPaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scope::deserialize_member(deserializer)
    }
}
