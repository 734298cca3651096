//! Shared wire contract for the Galleon checkout client and server.
//!
//! The crate has three layers:
//!
//! * [`registry`] maps discriminator strings to payment method kinds, one
//!   vocabulary per polymorphic family.
//! * [`codec`] decodes and encodes the polymorphic families against a
//!   registry and embeds them in contract messages.
//! * [`objects`] holds the request/response records exchanged by the two
//!   endpoints.
//!
//! [`config`] loads a registry vocabulary from a TOML file so the wire
//! strings can be remapped without a rebuild.

pub mod codec;
pub mod config;
pub mod objects;
pub mod registry;

pub use codec::{CodecError, Family, MessageError, TaggedCodec};
pub use registry::{FamilyId, PaymentMethodKind, VariantRegistry, VariantShape};
