use thiserror::Error;

use crate::registry::{FamilyId, PaymentMethodKind};

/// Structural errors of the tagged codec.
///
/// Field names are paths into the document, e.g. `vaulting_actions[1].action`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("document is not a JSON object (found {found})")]
    MalformedDocument { found: &'static str },

    #[error("missing discriminator field `type`")]
    MissingDiscriminator,

    #[error("unknown variant {0:?}")]
    UnknownVariant(String),

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{field}`: expected {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("field `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{kind} has no wire name in the {family} vocabulary")]
    UnregisteredVariant {
        family: FamilyId,
        kind: PaymentMethodKind,
    },
}

/// Errors from decoding or encoding a whole contract message.
#[derive(Debug, Error)]
pub enum MessageError {
    /// A polymorphic member failed; the original error is kept as is.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The message itself did not match its shape or was not valid JSON.
    #[error("invalid message: {0}")]
    Json(#[from] serde_json::Error),
}

impl MessageError {
    pub fn codec_error(&self) -> Option<&CodecError> {
        match self {
            MessageError::Codec(error) => Some(error),
            MessageError::Json(_) => None,
        }
    }
}
