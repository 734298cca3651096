//! Payment method definitions: the catalog of methods a user can set up.
//!
//! Wire form, with the variant's fields next to the base fields:
//!
//! ```json
//! {
//!   "type": "credit_card",
//!   "icon_url": "https://cdn.example/cc.png",
//!   "supported_card_types": ["visa", "master_card"],
//!   "vaulting_actions": [
//!     {"action": "get_tokenizer", "parameters": {}},
//!     {"action": "tokenize", "parameters": {}}
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::action::{Action, ValueMap};
use crate::codec::fields::{self, FieldSpec, FieldType};
use crate::codec::{CodecError, Family, scope};
use crate::registry::{FamilyId, PaymentMethodKind};

pub(crate) const BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("display_name", FieldType::String),
    FieldSpec::optional("icon_url", FieldType::String),
    FieldSpec::optional("logo_url", FieldType::String),
    FieldSpec::optional("initialization_actions", FieldType::ActionList),
    FieldSpec::optional("vaulting_actions", FieldType::ActionList),
    FieldSpec::optional("charge_actions", FieldType::ActionList),
    FieldSpec::optional("config", FieldType::ValueMap),
];

const CREDIT_CARD_FIELDS: &[FieldSpec] =
    &[FieldSpec::required("supported_card_types", FieldType::StringList)];

const WALLET_FIELDS: &[FieldSpec] = &[FieldSpec::optional("token", FieldType::String)];

pub(crate) fn variant_fields(kind: PaymentMethodKind) -> &'static [FieldSpec] {
    match kind {
        PaymentMethodKind::CreditCard => CREDIT_CARD_FIELDS,
        PaymentMethodKind::GooglePay | PaymentMethodKind::Paypal => WALLET_FIELDS,
    }
}

/// A catalog entry. `common` is shared by every variant, `details` carries
/// the variant.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodDefinition {
    pub common: DefinitionCommon,
    pub details: DefinitionDetails,
}

/// Base fields of every definition.
///
/// Each field records whether the document carried it, so an explicit
/// `""`, `[]` or `{}` is written back and an absent field stays absent.
/// `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionCommon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialization_actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaulting_actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_actions: Option<Vec<Action>>,
    /// Provider configuration handed to the client SDK as is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ValueMap>,
}

impl DefinitionCommon {
    pub fn initialization_actions(&self) -> &[Action] {
        self.initialization_actions.as_deref().unwrap_or(&[])
    }

    pub fn vaulting_actions(&self) -> &[Action] {
        self.vaulting_actions.as_deref().unwrap_or(&[])
    }

    pub fn charge_actions(&self) -> &[Action] {
        self.charge_actions.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionDetails {
    CreditCard(CreditCardDefinition),
    GooglePay(GooglePayDefinition),
    Paypal(PaypalDefinition),
}

impl DefinitionDetails {
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            DefinitionDetails::CreditCard(_) => PaymentMethodKind::CreditCard,
            DefinitionDetails::GooglePay(_) => PaymentMethodKind::GooglePay,
            DefinitionDetails::Paypal(_) => PaymentMethodKind::Paypal,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCardDefinition {
    /// Card network names, e.g. `visa`, `master_card`.
    pub supported_card_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GooglePayDefinition {
    /// Provider-specific token handed to the Google Pay client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaypalDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl PaymentMethodDefinition {
    pub fn new(common: DefinitionCommon, details: DefinitionDetails) -> Self {
        Self { common, details }
    }

    pub fn credit_card(common: DefinitionCommon, supported_card_types: Vec<String>) -> Self {
        Self::new(
            common,
            DefinitionDetails::CreditCard(CreditCardDefinition {
                supported_card_types,
            }),
        )
    }
}

impl Family for PaymentMethodDefinition {
    const FAMILY: FamilyId = FamilyId::PaymentMethodDefinition;

    fn kind(&self) -> PaymentMethodKind {
        self.details.kind()
    }

    fn from_document(kind: PaymentMethodKind, document: &Value) -> Result<Self, CodecError> {
        let context = Self::FAMILY.as_str();
        let common = fields::populate(context, document)?;
        let details = match kind {
            PaymentMethodKind::CreditCard => {
                DefinitionDetails::CreditCard(fields::populate(context, document)?)
            }
            PaymentMethodKind::GooglePay => {
                DefinitionDetails::GooglePay(fields::populate(context, document)?)
            }
            PaymentMethodKind::Paypal => {
                DefinitionDetails::Paypal(fields::populate(context, document)?)
            }
        };
        Ok(Self { common, details })
    }

    fn write_fields(&self, document: &mut Map<String, Value>) -> Result<(), CodecError> {
        fields::flatten(&self.common, document)?;
        match &self.details {
            DefinitionDetails::CreditCard(details) => fields::flatten(details, document),
            DefinitionDetails::GooglePay(details) => fields::flatten(details, document),
            DefinitionDetails::Paypal(details) => fields::flatten(details, document),
        }
    }
}

impl Serialize for PaymentMethodDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        scope::serialize_member(self, serializer)
    }
}

impl<'de> Deserialize<'de> for PaymentMethodDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scope::deserialize_member(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TaggedCodec;
    use serde_json::json;

    fn sample_credit_card() -> PaymentMethodDefinition {
        PaymentMethodDefinition::credit_card(
            DefinitionCommon {
                display_name: Some("Card".to_string()),
                icon_url: Some("https://cdn.example/cc.png".to_string()),
                vaulting_actions: Some(vec![
                    Action::new("get_tokenizer"),
                    Action::new("tokenize").with_parameter("provider", "stripe"),
                ]),
                config: Some(ValueMap::from_iter([("three_ds".to_string(), json!(true))])),
                ..Default::default()
            },
            vec!["visa".to_string(), "master_card".to_string()],
        )
    }

    #[test]
    fn test_end_to_end_credit_card() {
        let document = json!({
            "type": "credit_card",
            "icon_url": "http://x/i.png",
            "supported_card_types": ["visa", "master_card"],
            "vaulting_actions": [
                {"action": "get_tokenizer", "parameters": {}},
                {"action": "tokenize", "parameters": {}}
            ]
        });
        let codec = TaggedCodec::standard();
        let definition: PaymentMethodDefinition = codec.decode(&document).unwrap();

        assert_eq!(definition.kind(), PaymentMethodKind::CreditCard);
        assert_eq!(definition.common.icon_url.as_deref(), Some("http://x/i.png"));
        assert_eq!(
            definition.details,
            DefinitionDetails::CreditCard(CreditCardDefinition {
                supported_card_types: vec!["visa".to_string(), "master_card".to_string()],
            })
        );
        let steps: Vec<&str> = definition
            .common
            .vaulting_actions()
            .iter()
            .map(|step| step.action.as_str())
            .collect();
        assert_eq!(steps, ["get_tokenizer", "tokenize"]);

        assert_eq!(codec.encode(&definition).unwrap(), document);
    }

    #[test]
    fn test_round_trip_every_variant() {
        let codec = TaggedCodec::standard();
        let common = DefinitionCommon {
            display_name: Some("Wallet".to_string()),
            logo_url: Some("https://cdn.example/logo.svg".to_string()),
            initialization_actions: Some(vec![Action::new("load_sdk")]),
            charge_actions: Some(vec![Action::new("authorize"), Action::new("capture")]),
            ..Default::default()
        };
        let members = [
            sample_credit_card(),
            PaymentMethodDefinition::new(
                common.clone(),
                DefinitionDetails::GooglePay(GooglePayDefinition {
                    token: Some("gp-merchant-token".to_string()),
                }),
            ),
            PaymentMethodDefinition::new(
                common.clone(),
                DefinitionDetails::GooglePay(Default::default()),
            ),
            PaymentMethodDefinition::new(
                common,
                DefinitionDetails::Paypal(PaypalDefinition {
                    token: Some("pp-client-token".to_string()),
                }),
            ),
        ];
        for member in members {
            let encoded = codec.encode(&member).unwrap();
            let decoded: PaymentMethodDefinition = codec.decode(&encoded).unwrap();
            assert_eq!(decoded, member);
        }
    }

    #[test]
    fn test_flat_layout() {
        let encoded = TaggedCodec::standard().encode(&sample_credit_card()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "credit_card",
                "display_name": "Card",
                "icon_url": "https://cdn.example/cc.png",
                "vaulting_actions": [
                    {"action": "get_tokenizer", "parameters": {}},
                    {"action": "tokenize", "parameters": {"provider": "stripe"}}
                ],
                "config": {"three_ds": true},
                "supported_card_types": ["visa", "master_card"]
            })
        );
        assert!(encoded.get("data").is_none());
    }

    #[test]
    fn test_legacy_gpay_tag_is_written_with_primary_name() {
        let codec = TaggedCodec::standard();
        let definition: PaymentMethodDefinition = codec
            .decode(&json!({"type": "gpay", "display_name": "Google Pay"}))
            .unwrap();
        assert_eq!(definition.kind(), PaymentMethodKind::GooglePay);
        assert_eq!(
            codec.encode(&definition).unwrap(),
            json!({"type": "google_pay", "display_name": "Google Pay"})
        );
    }

    #[test]
    fn test_null_collections_read_as_defaults() {
        let definition: PaymentMethodDefinition = TaggedCodec::standard()
            .decode(&json!({
                "type": "paypal",
                "display_name": null,
                "charge_actions": null,
                "config": null,
                "token": null
            }))
            .unwrap();
        assert_eq!(
            definition,
            PaymentMethodDefinition::new(
                DefinitionCommon::default(),
                DefinitionDetails::Paypal(PaypalDefinition::default())
            )
        );
    }

    #[test]
    fn test_explicit_defaults_survive_reencode() {
        let codec = TaggedCodec::standard();
        let document = json!({
            "type": "paypal",
            "display_name": "",
            "charge_actions": [],
            "config": {}
        });
        let definition: PaymentMethodDefinition = codec.decode(&document).unwrap();
        assert_eq!(definition.common.display_name.as_deref(), Some(""));
        assert!(definition.common.charge_actions().is_empty());
        assert_eq!(codec.encode(&definition).unwrap(), document);

        let bare = json!({"type": "paypal"});
        let definition: PaymentMethodDefinition = codec.decode(&bare).unwrap();
        assert_eq!(codec.encode(&definition).unwrap(), bare);
    }

    #[test]
    fn test_variant_field_errors() {
        let codec = TaggedCodec::standard();
        assert_eq!(
            codec.decode::<PaymentMethodDefinition>(&json!({"type": "credit_card"})),
            Err(CodecError::MissingField("supported_card_types".to_string()))
        );
        assert_eq!(
            codec.decode::<PaymentMethodDefinition>(&json!({
                "type": "credit_card",
                "supported_card_types": ["visa", 4]
            })),
            Err(CodecError::TypeMismatch {
                field: "supported_card_types[1]".to_string(),
                expected: "string",
                actual: "number",
            })
        );
        // a credit card field means nothing to a paypal definition
        assert!(
            codec
                .decode::<PaymentMethodDefinition>(&json!({
                    "type": "paypal",
                    "supported_card_types": 12
                }))
                .is_ok()
        );
    }
}
