//! Field shapes and the structural checks run before a member is populated.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::CodecError;
use crate::objects::action;

/// JSON shape expected for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Bool,
    /// Whole number within `min..=max`.
    Integer { min: i64, max: i64 },
    StringList,
    ActionList,
    /// Loosely-typed object, any values.
    ValueMap,
    /// RFC 3339 date-time string.
    DateTime,
}

impl FieldType {
    pub fn expected(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::DateTime => "string",
            FieldType::Bool => "bool",
            FieldType::Integer { .. } => "integer",
            FieldType::StringList | FieldType::ActionList => "array",
            FieldType::ValueMap => "object",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Absent or `null` means the field's default.
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            presence: Presence::Optional,
        }
    }
}

/// Name of the JSON type of `value`, as used in error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check the fields of `object` listed in `specs`. Other keys are ignored.
pub(crate) fn validate(object: &Map<String, Value>, specs: &[FieldSpec]) -> Result<(), CodecError> {
    validate_at("", object, specs)
}

fn validate_at(
    prefix: &str,
    object: &Map<String, Value>,
    specs: &[FieldSpec],
) -> Result<(), CodecError> {
    for spec in specs {
        let path = if prefix.is_empty() {
            spec.name.to_owned()
        } else {
            format!("{prefix}.{}", spec.name)
        };
        match object.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.presence == Presence::Required {
                    return Err(CodecError::MissingField(path));
                }
            }
            Some(value) => check(&path, spec.ty, value)?,
        }
    }
    Ok(())
}

fn check(path: &str, ty: FieldType, value: &Value) -> Result<(), CodecError> {
    let mismatch = || CodecError::TypeMismatch {
        field: path.to_owned(),
        expected: ty.expected(),
        actual: json_type(value),
    };

    match (ty, value) {
        (FieldType::String, Value::String(_))
        | (FieldType::Bool, Value::Bool(_))
        | (FieldType::ValueMap, Value::Object(_)) => Ok(()),
        (FieldType::Integer { min, max }, Value::Number(n)) if n.is_i64() || n.is_u64() => {
            match n.as_i64() {
                Some(value) if (min..=max).contains(&value) => Ok(()),
                _ => Err(CodecError::InvalidValue {
                    field: path.to_owned(),
                    reason: format!("{n} is outside {min}..={max}"),
                }),
            }
        }
        (FieldType::DateTime, Value::String(s)) => OffsetDateTime::parse(s, &Rfc3339)
            .map(|_| ())
            .map_err(|e| CodecError::InvalidValue {
                field: path.to_owned(),
                reason: format!("not an RFC 3339 date-time: {e}"),
            }),
        (FieldType::StringList, Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(CodecError::TypeMismatch {
                        field: format!("{path}[{index}]"),
                        expected: "string",
                        actual: json_type(item),
                    });
                }
            }
            Ok(())
        }
        (FieldType::ActionList, Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                let Value::Object(step) = item else {
                    return Err(CodecError::TypeMismatch {
                        field: item_path,
                        expected: "object",
                        actual: json_type(item),
                    });
                };
                validate_at(&item_path, step, action::FIELDS)?;
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}

/// Populate a typed part of a member from an already validated document.
///
/// `context` names the member in the error if a value still does not fit
/// its Rust type (an integer out of range, for instance).
pub(crate) fn populate<T: DeserializeOwned>(
    context: &str,
    document: &Value,
) -> Result<T, CodecError> {
    T::deserialize(document).map_err(|e| CodecError::InvalidValue {
        field: context.to_owned(),
        reason: e.to_string(),
    })
}

/// Write the fields of `part` into `document` as siblings.
pub(crate) fn flatten<T: Serialize>(
    part: &T,
    document: &mut Map<String, Value>,
) -> Result<(), CodecError> {
    let value = serde_json::to_value(part).map_err(|e| CodecError::InvalidValue {
        field: String::new(),
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(fields) => {
            document.extend(fields);
            Ok(())
        }
        other => Err(CodecError::MalformedDocument {
            found: json_type(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPECS: &[FieldSpec] = &[
        FieldSpec::required("id", FieldType::String),
        FieldSpec::optional("count", FieldType::Integer { min: 0, max: 100 }),
        FieldSpec::optional("steps", FieldType::ActionList),
        FieldSpec::optional("at", FieldType::DateTime),
    ];

    fn run(document: Value) -> Result<(), CodecError> {
        validate(document.as_object().unwrap(), SPECS)
    }

    #[test]
    fn test_required_and_optional() {
        assert!(run(json!({"id": "a"})).is_ok());
        assert!(run(json!({"id": "a", "count": null, "extra": [1, 2]})).is_ok());
        assert_eq!(
            run(json!({"count": 3})),
            Err(CodecError::MissingField("id".to_string()))
        );
        assert_eq!(
            run(json!({"id": null})),
            Err(CodecError::MissingField("id".to_string()))
        );
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            run(json!({"id": 7})),
            Err(CodecError::TypeMismatch {
                field: "id".to_string(),
                expected: "string",
                actual: "number",
            })
        );
        assert_eq!(
            run(json!({"id": "a", "count": 1.5})),
            Err(CodecError::TypeMismatch {
                field: "count".to_string(),
                expected: "integer",
                actual: "number",
            })
        );
    }

    #[test]
    fn test_integer_range() {
        assert!(run(json!({"id": "a", "count": 0})).is_ok());
        assert!(run(json!({"id": "a", "count": 100})).is_ok());
        for count in [json!(101), json!(-1), json!(u64::MAX)] {
            assert!(matches!(
                run(json!({"id": "a", "count": count})),
                Err(CodecError::InvalidValue { field, .. }) if field == "count"
            ));
        }
    }

    #[test]
    fn test_nested_action_paths() {
        assert_eq!(
            run(json!({"id": "a", "steps": [{"action": "x"}, {"parameters": {}}]})),
            Err(CodecError::MissingField("steps[1].action".to_string()))
        );
        assert_eq!(
            run(json!({"id": "a", "steps": [{"action": "x", "parameters": []}]})),
            Err(CodecError::TypeMismatch {
                field: "steps[0].parameters".to_string(),
                expected: "object",
                actual: "array",
            })
        );
        assert_eq!(
            run(json!({"id": "a", "steps": ["x"]})),
            Err(CodecError::TypeMismatch {
                field: "steps[0]".to_string(),
                expected: "object",
                actual: "string",
            })
        );
    }

    #[test]
    fn test_date_time() {
        assert!(run(json!({"id": "a", "at": "2024-05-01T10:00:00Z"})).is_ok());
        assert!(matches!(
            run(json!({"id": "a", "at": "yesterday"})),
            Err(CodecError::InvalidValue { field, .. }) if field == "at"
        ));
    }
}
