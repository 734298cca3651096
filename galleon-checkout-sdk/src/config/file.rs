//! TOML vocabulary file structures.
//!
//! ```toml
//! [payment_method_definition.google_pay]
//! name = "gpay"
//! aliases = ["google_pay"]
//!
//! [user_payment_method.credit_card]
//! name = "credit_card"
//! ```
//!
//! Sections are keyed by the canonical kind name (`credit_card`,
//! `google_pay`, `paypal`). A family without a section keeps the standard
//! vocabulary; a family with one registers exactly the kinds it lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::{FamilyId, VariantRegistry};

/// Wire names of each kind in one family, keyed by canonical kind name.
pub type FamilyVocabularyFile = BTreeMap<String, DiscriminatorEntry>;

/// Root structure of a vocabulary file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_definition: Option<FamilyVocabularyFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_payment_method: Option<FamilyVocabularyFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminatorEntry {
    /// Written on encode and accepted on decode.
    pub name: String,
    /// Accepted on decode only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl VocabularyFile {
    pub fn family(&self, family: FamilyId) -> Option<&FamilyVocabularyFile> {
        match family {
            FamilyId::PaymentMethodDefinition => self.payment_method_definition.as_ref(),
            FamilyId::UserPaymentMethod => self.user_payment_method.as_ref(),
        }
    }

    /// Describe every family of `registry` explicitly.
    pub fn from_registry(registry: &VariantRegistry) -> Self {
        let describe = |family: FamilyId| {
            let vocabulary = registry.vocabulary(family);
            vocabulary
                .kinds()
                .filter_map(|kind| {
                    let names = vocabulary.names(kind)?;
                    Some((
                        kind.as_str().to_owned(),
                        DiscriminatorEntry {
                            name: names.name.clone(),
                            aliases: names.aliases.clone(),
                        },
                    ))
                })
                .collect::<FamilyVocabularyFile>()
        };
        Self {
            payment_method_definition: Some(describe(FamilyId::PaymentMethodDefinition)),
            user_payment_method: Some(describe(FamilyId::UserPaymentMethod)),
        }
    }
}
