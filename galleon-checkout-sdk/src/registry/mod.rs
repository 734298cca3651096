//! Variant registry: discriminator strings to payment method kinds.
//!
//! A [`VariantRegistry`] holds one [`Vocabulary`] per polymorphic family and
//! is immutable once built. Codecs share it through an `Arc`; independent
//! registries (a remapped deployment, a test) can live side by side.

mod kind;
mod vocabulary;

pub use kind::{FamilyId, PaymentMethodKind};
pub use vocabulary::{DiscriminatorNames, Vocabulary};

use std::sync::Arc;

use lazy_static::lazy_static;
use thiserror::Error;

use crate::codec::CodecError;
use crate::codec::fields::FieldSpec;
use vocabulary::VocabularyBuilder;

/// Legacy wire name for Google Pay, still sent by older clients.
pub const LEGACY_GOOGLE_PAY_TAG: &str = "gpay";

lazy_static! {
    static ref STANDARD: Arc<VariantRegistry> = Arc::new(
        VariantRegistry::standard_builder()
            .build()
            .expect("standard vocabulary is valid")
    );
}

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{family}: discriminator {name:?} is registered for both {existing} and {conflicting}")]
    DuplicateDiscriminator {
        family: FamilyId,
        name: String,
        existing: PaymentMethodKind,
        conflicting: PaymentMethodKind,
    },

    #[error("{family}: empty discriminator registered for {kind}")]
    EmptyDiscriminator {
        family: FamilyId,
        kind: PaymentMethodKind,
    },

    #[error("{family}: {kind} has aliases but no primary name")]
    MissingPrimaryName {
        family: FamilyId,
        kind: PaymentMethodKind,
    },

    #[error("unknown payment method kind {0:?}")]
    UnknownKind(String),
}

/// The shape selected by a discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantShape {
    pub family: FamilyId,
    pub kind: PaymentMethodKind,
    /// Fields the variant adds on top of the family's base fields.
    pub fields: &'static [FieldSpec],
}

impl VariantShape {
    pub fn base_fields(&self) -> &'static [FieldSpec] {
        self.family.base_fields()
    }
}

/// Discriminator vocabularies for both polymorphic families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRegistry {
    definitions: Vocabulary,
    user_methods: Vocabulary,
}

impl VariantRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Builder preloaded with the standard vocabulary.
    ///
    /// Both families use `credit_card`, `google_pay` and `paypal`; the
    /// legacy `gpay` tag is accepted as a decode-only alias of `google_pay`.
    pub fn standard_builder() -> RegistryBuilder {
        let mut builder = RegistryBuilder::default();
        for family in FamilyId::ALL {
            builder = builder.with_standard_family(family);
        }
        builder
    }

    /// The shared standard registry, built once on first use.
    pub fn standard() -> Arc<VariantRegistry> {
        Arc::clone(&STANDARD)
    }

    pub fn vocabulary(&self, family: FamilyId) -> &Vocabulary {
        match family {
            FamilyId::PaymentMethodDefinition => &self.definitions,
            FamilyId::UserPaymentMethod => &self.user_methods,
        }
    }

    /// Resolve a discriminator to its variant shape.
    ///
    /// Never falls back to a default variant.
    pub fn resolve(&self, family: FamilyId, tag: &str) -> Result<VariantShape, CodecError> {
        let kind = self
            .vocabulary(family)
            .resolve(tag)
            .ok_or_else(|| CodecError::UnknownVariant(tag.to_owned()))?;
        tracing::trace!(%family, tag, %kind, "resolved discriminator");
        Ok(VariantShape {
            family,
            kind,
            fields: family.variant_fields(kind),
        })
    }

    /// Primary wire name written when encoding `kind`.
    pub fn wire_name(&self, family: FamilyId, kind: PaymentMethodKind) -> Result<&str, CodecError> {
        self.vocabulary(family)
            .wire_name(kind)
            .ok_or(CodecError::UnregisteredVariant { family, kind })
    }
}

/// Builder for [`VariantRegistry`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    definitions: VocabularyBuilder,
    user_methods: VocabularyBuilder,
}

impl RegistryBuilder {
    /// Set the primary wire name of `kind`, replacing any earlier one.
    pub fn register(
        mut self,
        family: FamilyId,
        kind: PaymentMethodKind,
        name: impl Into<String>,
    ) -> Self {
        self.family_mut(family).register(kind, name.into());
        self
    }

    /// Add a decode-only wire name for `kind`.
    pub fn alias(
        mut self,
        family: FamilyId,
        kind: PaymentMethodKind,
        alias: impl Into<String>,
    ) -> Self {
        self.family_mut(family).alias(kind, alias.into());
        self
    }

    /// Register the standard names of every kind for `family`.
    pub fn with_standard_family(self, family: FamilyId) -> Self {
        PaymentMethodKind::ALL
            .into_iter()
            .fold(self, |builder, kind| builder.register(family, kind, kind.as_str()))
            .alias(family, PaymentMethodKind::GooglePay, LEGACY_GOOGLE_PAY_TAG)
    }

    pub fn build(self) -> Result<VariantRegistry, RegistryError> {
        Ok(VariantRegistry {
            definitions: self.definitions.build(FamilyId::PaymentMethodDefinition)?,
            user_methods: self.user_methods.build(FamilyId::UserPaymentMethod)?,
        })
    }

    fn family_mut(&mut self, family: FamilyId) -> &mut VocabularyBuilder {
        match family {
            FamilyId::PaymentMethodDefinition => &mut self.definitions,
            FamilyId::UserPaymentMethod => &mut self.user_methods,
        }
    }
}
