//! Tagged codec for the polymorphic payment method families.
//!
//! A member document is one flat JSON object: the `type` discriminator, the
//! family's base fields and the variant's fields side by side. Decoding reads
//! `type`, resolves it through a [`VariantRegistry`], checks base and variant
//! fields against their shapes and only then builds the typed value. Keys
//! outside both shapes are ignored, so they do not survive a decode/encode
//! round trip.

pub mod decimal;
mod error;
pub mod fields;
pub mod lenient;
pub(crate) mod scope;
pub mod timestamp;

pub use error::{CodecError, MessageError};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::registry::{FamilyId, PaymentMethodKind, VariantRegistry};

/// Discriminator key shared by both families.
pub const DISCRIMINATOR: &str = "type";

/// A polymorphic family the codec can decode and encode.
///
/// Implementors are a base record plus a closed enum of variant payloads.
/// Adding a variant touches the registry and the family type, never the
/// codec.
pub trait Family: Sized {
    const FAMILY: FamilyId;

    fn kind(&self) -> PaymentMethodKind;

    /// Build the value from a document already checked against the shape of
    /// `kind`.
    fn from_document(kind: PaymentMethodKind, document: &Value) -> Result<Self, CodecError>;

    /// Write base and variant fields, everything but the discriminator.
    fn write_fields(&self, document: &mut Map<String, Value>) -> Result<(), CodecError>;
}

/// Codec bound to one registry.
///
/// Cheap to clone and safe to share between threads; every call is a pure
/// function of its input.
#[derive(Debug, Clone)]
pub struct TaggedCodec {
    registry: Arc<VariantRegistry>,
}

impl Default for TaggedCodec {
    fn default() -> Self {
        Self::standard()
    }
}

impl TaggedCodec {
    pub fn new(registry: impl Into<Arc<VariantRegistry>>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    /// Codec using [`VariantRegistry::standard`].
    pub fn standard() -> Self {
        Self {
            registry: VariantRegistry::standard(),
        }
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Decode one member of family `F`.
    pub fn decode<F: Family>(&self, document: &Value) -> Result<F, CodecError> {
        decode_with(&self.registry, document)
    }

    /// Encode one member of family `F` into a flat JSON object.
    pub fn encode<F: Family>(&self, member: &F) -> Result<Value, CodecError> {
        encode_with(&self.registry, member)
    }

    /// Decode a contract message. Polymorphic fields use this codec's
    /// registry and their errors come back as [`MessageError::Codec`].
    pub fn decode_message<M: DeserializeOwned>(&self, document: Value) -> Result<M, MessageError> {
        if !document.is_object() {
            return Err(CodecError::MalformedDocument {
                found: fields::json_type(&document),
            }
            .into());
        }
        let (result, member_error) =
            scope::enter(&self.registry, || serde_json::from_value::<M>(document));
        result.map_err(|error| match member_error {
            Some(member_error) => MessageError::Codec(member_error),
            None => MessageError::Json(error),
        })
    }

    pub fn decode_message_str<M: DeserializeOwned>(&self, json: &str) -> Result<M, MessageError> {
        let document: Value = serde_json::from_str(json)?;
        self.decode_message(document)
    }

    /// Encode a contract message, writing polymorphic fields with this
    /// codec's registry.
    pub fn encode_message<M: Serialize>(&self, message: &M) -> Result<Value, MessageError> {
        let (result, member_error) = scope::enter(&self.registry, || serde_json::to_value(message));
        result.map_err(|error| match member_error {
            Some(member_error) => MessageError::Codec(member_error),
            None => MessageError::Json(error),
        })
    }

    pub fn encode_message_string<M: Serialize>(&self, message: &M) -> Result<String, MessageError> {
        let document = self.encode_message(message)?;
        Ok(serde_json::to_string(&document)?)
    }
}

pub(crate) fn decode_with<F: Family>(
    registry: &VariantRegistry,
    document: &Value,
) -> Result<F, CodecError> {
    let result = decode_member(registry, document);
    if let Err(error) = &result {
        tracing::debug!(family = %F::FAMILY, %error, "failed to decode polymorphic member");
    }
    result
}

fn decode_member<F: Family>(registry: &VariantRegistry, document: &Value) -> Result<F, CodecError> {
    let object = document
        .as_object()
        .ok_or_else(|| CodecError::MalformedDocument {
            found: fields::json_type(document),
        })?;

    let tag = match object.get(DISCRIMINATOR) {
        Some(Value::String(tag)) if !tag.is_empty() => tag,
        _ => return Err(CodecError::MissingDiscriminator),
    };

    let shape = registry.resolve(F::FAMILY, tag)?;
    fields::validate(object, shape.base_fields())?;
    fields::validate(object, shape.fields)?;
    F::from_document(shape.kind, document)
}

pub(crate) fn encode_with<F: Family>(
    registry: &VariantRegistry,
    member: &F,
) -> Result<Value, CodecError> {
    let name = registry.wire_name(F::FAMILY, member.kind())?;
    let mut document = Map::new();
    document.insert(DISCRIMINATOR.to_owned(), Value::String(name.to_owned()));
    member.write_fields(&mut document)?;
    Ok(Value::Object(document))
}
