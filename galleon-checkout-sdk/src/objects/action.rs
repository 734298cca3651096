//! Ordered steps a caller performs to initialize, vault or charge a method.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::fields::{FieldSpec, FieldType};
use crate::codec::lenient::null_as_default;

/// Loosely-typed, order-preserving JSON object (`parameters`, `metadata`,
/// `config`, `values`).
pub type ValueMap = serde_json::Map<String, Value>;

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("action", FieldType::String),
    FieldSpec::optional("parameters", FieldType::ValueMap),
];

/// One step of an action list. Lists are executed in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action: String,
    /// Always written, `{}` when empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: ValueMap,
}

impl Action {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            parameters: ValueMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameters_default_to_empty() {
        let missing: Action = serde_json::from_value(json!({"action": "tokenize"})).unwrap();
        let null: Action =
            serde_json::from_value(json!({"action": "tokenize", "parameters": null})).unwrap();
        assert_eq!(missing, Action::new("tokenize"));
        assert_eq!(null, Action::new("tokenize"));
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({"action": "tokenize", "parameters": {}})
        );
    }

    #[test]
    fn test_parameters_keep_nested_values_and_order() {
        let action = Action::new("redirect")
            .with_parameter("url", "https://pay.example/confirm")
            .with_parameter("timeout", 30)
            .with_parameter("headers", json!({"x-b": "2", "x-a": "1"}))
            .with_parameter("retry", json!(null));
        let encoded = serde_json::to_string(&action).unwrap();
        assert_eq!(
            encoded,
            r#"{"action":"redirect","parameters":{"url":"https://pay.example/confirm","timeout":30,"headers":{"x-b":"2","x-a":"1"},"retry":null}}"#
        );
        let decoded: Action = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, action);
        assert_eq!(serde_json::to_string(&decoded).unwrap(), encoded);
    }
}
