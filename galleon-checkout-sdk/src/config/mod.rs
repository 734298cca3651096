//! Discriminator vocabulary configuration.
//!
//! Deployments that talk to clients built against an older schema remap
//! wire names here instead of in code.

pub mod file;

pub use file::{DiscriminatorEntry, FamilyVocabularyFile, VocabularyFile};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::registry::{FamilyId, PaymentMethodKind, RegistryBuilder, RegistryError, VariantRegistry};

/// Errors that can occur while loading a vocabulary.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read vocabulary file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse vocabulary file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize vocabulary: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("invalid vocabulary: {0}")]
    Registry(#[from] RegistryError),
}

/// Loads a [`VariantRegistry`] from a TOML vocabulary file.
pub struct VocabularyLoader {
    path: PathBuf,
}

impl VocabularyLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<VariantRegistry, ConfigError> {
        let content = std::fs::read_to_string(&self.path)?;
        let registry = parse(&content)?;
        tracing::info!("Loaded discriminator vocabulary from {:?}", self.path);
        Ok(registry)
    }
}

/// Parse vocabulary TOML and build the registry it describes.
pub fn parse(content: &str) -> Result<VariantRegistry, ConfigError> {
    let file: VocabularyFile = toml::from_str(content)?;
    Ok(build_registry(&file)?)
}

pub fn build_registry(file: &VocabularyFile) -> Result<VariantRegistry, RegistryError> {
    let mut builder = VariantRegistry::builder();
    for family in FamilyId::ALL {
        builder = match file.family(family) {
            None => builder.with_standard_family(family),
            Some(entries) => register_family(builder, family, entries)?,
        };
    }
    builder.build()
}

fn register_family(
    mut builder: RegistryBuilder,
    family: FamilyId,
    entries: &FamilyVocabularyFile,
) -> Result<RegistryBuilder, RegistryError> {
    for (kind_name, entry) in entries {
        let kind = PaymentMethodKind::from_canonical(kind_name)
            .ok_or_else(|| RegistryError::UnknownKind(kind_name.clone()))?;
        builder = builder.register(family, kind, entry.name.as_str());
        for alias in &entry.aliases {
            builder = builder.alias(family, kind, alias.as_str());
        }
    }
    Ok(builder)
}

/// Render `registry` as vocabulary TOML.
pub fn render(registry: &VariantRegistry) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(&VocabularyFile::from_registry(registry))?)
}
