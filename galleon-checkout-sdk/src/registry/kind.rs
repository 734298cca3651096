use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::fields::FieldSpec;
use crate::codec::scope;
use crate::objects::{payment_method_definition, user_payment_method};

/// Every payment method variant known to this contract.
///
/// The wire string for each kind is *not* fixed here: it is looked up in the
/// [`VariantRegistry`](super::VariantRegistry) in use, so deployments can
/// remap `google_pay` to `gpay` (or back) without a rebuild.
///
/// On its own (for example the `type` field of a vault request) a kind is
/// written with the payment method definition vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentMethodKind {
    CreditCard,
    GooglePay,
    Paypal,
}

impl PaymentMethodKind {
    pub const ALL: [PaymentMethodKind; 3] = [
        PaymentMethodKind::CreditCard,
        PaymentMethodKind::GooglePay,
        PaymentMethodKind::Paypal,
    ];

    /// Stable identifier used in configuration files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodKind::CreditCard => "credit_card",
            PaymentMethodKind::GooglePay => "google_pay",
            PaymentMethodKind::Paypal => "paypal",
        }
    }

    /// Parse the stable identifier returned by [`as_str`](Self::as_str).
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl std::fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentMethodKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        scope::serialize_kind(FamilyId::PaymentMethodDefinition, *self, serializer)
    }
}

impl<'de> Deserialize<'de> for PaymentMethodKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scope::deserialize_kind(FamilyId::PaymentMethodDefinition, deserializer)
    }
}

/// The polymorphic families carried by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FamilyId {
    /// Catalog entries describing a supported payment method.
    PaymentMethodDefinition,
    /// A payment instrument vaulted for a user.
    UserPaymentMethod,
}

impl FamilyId {
    pub const ALL: [FamilyId; 2] = [FamilyId::PaymentMethodDefinition, FamilyId::UserPaymentMethod];

    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyId::PaymentMethodDefinition => "payment_method_definition",
            FamilyId::UserPaymentMethod => "user_payment_method",
        }
    }

    /// Fields shared by every variant of the family.
    pub fn base_fields(&self) -> &'static [FieldSpec] {
        match self {
            FamilyId::PaymentMethodDefinition => payment_method_definition::BASE_FIELDS,
            FamilyId::UserPaymentMethod => user_payment_method::BASE_FIELDS,
        }
    }

    /// Fields a variant adds on top of [`base_fields`](Self::base_fields).
    pub fn variant_fields(&self, kind: PaymentMethodKind) -> &'static [FieldSpec] {
        match self {
            FamilyId::PaymentMethodDefinition => payment_method_definition::variant_fields(kind),
            FamilyId::UserPaymentMethod => user_payment_method::variant_fields(kind),
        }
    }
}

impl std::fmt::Display for FamilyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
