use std::collections::{BTreeMap, HashMap};

use super::{FamilyId, PaymentMethodKind, RegistryError};

/// Discriminator vocabulary of one family.
///
/// Every wire string resolves to exactly one kind. Each registered kind has
/// one primary name, written on encode, and any number of decode-only
/// aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    by_wire: HashMap<String, PaymentMethodKind>,
    names: BTreeMap<PaymentMethodKind, DiscriminatorNames>,
}

/// Wire strings registered for a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorNames {
    pub name: String,
    pub aliases: Vec<String>,
}

impl Vocabulary {
    pub fn resolve(&self, tag: &str) -> Option<PaymentMethodKind> {
        self.by_wire.get(tag).copied()
    }

    pub fn wire_name(&self, kind: PaymentMethodKind) -> Option<&str> {
        self.names.get(&kind).map(|names| names.name.as_str())
    }

    pub fn names(&self, kind: PaymentMethodKind) -> Option<&DiscriminatorNames> {
        self.names.get(&kind)
    }

    /// Registered kinds in declaration order of [`PaymentMethodKind`].
    pub fn kinds(&self) -> impl Iterator<Item = PaymentMethodKind> + '_ {
        self.names.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Collects names for one family before validation.
#[derive(Debug, Clone, Default)]
pub(super) struct VocabularyBuilder {
    entries: BTreeMap<PaymentMethodKind, PendingNames>,
}

#[derive(Debug, Clone, Default)]
struct PendingNames {
    name: Option<String>,
    aliases: Vec<String>,
}

impl VocabularyBuilder {
    pub(super) fn register(&mut self, kind: PaymentMethodKind, name: String) {
        self.entries.entry(kind).or_default().name = Some(name);
    }

    pub(super) fn alias(&mut self, kind: PaymentMethodKind, alias: String) {
        self.entries.entry(kind).or_default().aliases.push(alias);
    }

    pub(super) fn build(self, family: FamilyId) -> Result<Vocabulary, RegistryError> {
        let mut vocabulary = Vocabulary::default();

        for (kind, pending) in self.entries {
            let name = pending
                .name
                .ok_or(RegistryError::MissingPrimaryName { family, kind })?;

            let mut aliases: Vec<String> = Vec::with_capacity(pending.aliases.len());
            for wire in std::iter::once(&name).chain(pending.aliases.iter()) {
                if wire.is_empty() {
                    return Err(RegistryError::EmptyDiscriminator { family, kind });
                }
                match vocabulary.by_wire.get(wire).copied() {
                    Some(existing) if existing != kind => {
                        return Err(RegistryError::DuplicateDiscriminator {
                            family,
                            name: wire.clone(),
                            existing,
                            conflicting: kind,
                        });
                    }
                    // the same string listed twice for one kind
                    Some(_) => continue,
                    None => {
                        vocabulary.by_wire.insert(wire.clone(), kind);
                        if *wire != name {
                            aliases.push(wire.clone());
                        }
                    }
                }
            }

            vocabulary
                .names
                .insert(kind, DiscriminatorNames { name, aliases });
        }

        Ok(vocabulary)
    }
}
