//! Turn the parsed payload into a list of records.

use serde_json::Value;

use crate::error::StepError;

/// Objects become a one-element list, arrays pass through untouched. Any other
/// JSON type is a data-shape error.
pub fn normalize(data: Value) -> Result<Vec<Value>, StepError> {
    match data {
        Value::Object(_) => Ok(vec![data]),
        Value::Array(records) => Ok(records),
        other => Err(StepError::UnexpectedType(type_name(&other))),
    }
}

/// JSON type name as used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_is_wrapped() {
        assert_eq!(normalize(json!({"a": 1})).unwrap(), vec![json!({"a": 1})]);
    }

    #[test]
    fn array_passes_through() {
        let records = normalize(json!([{"a": 1}, {"b": 2}])).unwrap();
        assert_eq!(records, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn array_elements_are_not_checked() {
        let records = normalize(json!([1, "two", null])).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn empty_array_gives_no_records() {
        assert!(normalize(json!([])).unwrap().is_empty());
    }

    #[test]
    fn scalars_are_rejected() {
        for (value, name) in [
            (json!("plain string"), "string"),
            (json!(42), "number"),
            (json!(true), "boolean"),
            (Value::Null, "null"),
        ] {
            match normalize(value) {
                Err(StepError::UnexpectedType(t)) => assert_eq!(t, name),
                other => panic!("expected UnexpectedType, got {:?}", other),
            }
        }
    }

    #[test]
    fn unexpected_type_message() {
        let err = normalize(json!("x")).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected JSON data type: string");
    }
}
