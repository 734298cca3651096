//! Per-thread registry scope for serde impls of polymorphic members.
//!
//! Serde derives cannot take arguments, so a [`TaggedCodec`](super::TaggedCodec)
//! installs its registry here for the length of one synchronous message
//! decode/encode. Member impls read it back, and report their structured
//! error to the scope so the codec can return it unchanged instead of the
//! flattened serde message. Outside a scope the standard registry applies.

use std::cell::RefCell;
use std::sync::Arc;

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{CodecError, Family};
use crate::registry::{FamilyId, PaymentMethodKind, VariantRegistry};

struct Scope {
    registry: Arc<VariantRegistry>,
    error: Option<CodecError>,
}

thread_local! {
    static SCOPES: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
}

/// Pops the scope even if the body panics.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| scopes.borrow_mut().pop());
    }
}

/// Run `body` with `registry` installed, returning its output and the first
/// codec error reported inside it.
pub(crate) fn enter<T>(
    registry: &Arc<VariantRegistry>,
    body: impl FnOnce() -> T,
) -> (T, Option<CodecError>) {
    SCOPES.with(|scopes| {
        scopes.borrow_mut().push(Scope {
            registry: Arc::clone(registry),
            error: None,
        })
    });
    let _guard = ScopeGuard;
    let output = body();
    let error = SCOPES.with(|scopes| {
        scopes
            .borrow_mut()
            .last_mut()
            .and_then(|scope| scope.error.take())
    });
    (output, error)
}

pub(crate) fn current_registry() -> Arc<VariantRegistry> {
    SCOPES
        .with(|scopes| {
            scopes
                .borrow()
                .last()
                .map(|scope| Arc::clone(&scope.registry))
        })
        .unwrap_or_else(VariantRegistry::standard)
}

/// Keep the first error for the enclosing codec call and return its message.
fn report(error: CodecError) -> String {
    let message = error.to_string();
    SCOPES.with(|scopes| {
        if let Some(scope) = scopes.borrow_mut().last_mut() {
            scope.error.get_or_insert(error);
        }
    });
    message
}

pub(crate) fn serialize_member<F: Family, S: Serializer>(
    member: &F,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let registry = current_registry();
    match super::encode_with(&registry, member) {
        Ok(document) => document.serialize(serializer),
        Err(error) => Err(S::Error::custom(report(error))),
    }
}

pub(crate) fn deserialize_member<'de, F: Family, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<F, D::Error> {
    let document = Value::deserialize(deserializer)?;
    let registry = current_registry();
    super::decode_with(&registry, &document).map_err(|error| D::Error::custom(report(error)))
}

pub(crate) fn serialize_kind<S: Serializer>(
    family: FamilyId,
    kind: PaymentMethodKind,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let registry = current_registry();
    match registry.wire_name(family, kind) {
        Ok(name) => serializer.serialize_str(name),
        Err(error) => Err(S::Error::custom(report(error))),
    }
}

pub(crate) fn deserialize_kind<'de, D: Deserializer<'de>>(
    family: FamilyId,
    deserializer: D,
) -> Result<PaymentMethodKind, D::Error> {
    let tag = String::deserialize(deserializer)?;
    current_registry()
        .resolve(family, &tag)
        .map(|shape| shape.kind)
        .map_err(|error| D::Error::custom(report(error)))
}
