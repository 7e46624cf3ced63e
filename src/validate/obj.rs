use serde_json::{Map, Value};

use super::{show, union, Validator};
use crate::error::ValidationError;
use crate::ir::{DataType, ObjectType};

fn as_record<'v>(value: Option<&'v Value>, noun: &str) -> Result<&'v Map<String, Value>, ValidationError> {
    match value {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(ValidationError::new(format!("{} is not {noun}", show(value)))),
    }
}

/// Every value against `inner`, in key order; keys are unconstrained.
pub fn check_map(
    v: &Validator,
    inner: &DataType,
    value: Option<&Value>,
    depth: usize,
) -> Result<(), ValidationError> {
    let map = as_record(value, "a map")?;
    for (key, item) in map {
        v.check(inner, Some(item), depth).map_err(|e| e.at(key.as_str()))?;
    }
    Ok(())
}

/// Required keys first, then optional keys, each in declaration order; the
/// first failing key wins. Strictness is checked last.
pub fn check_object(
    v: &Validator,
    object: &ObjectType,
    value: Option<&Value>,
    depth: usize,
) -> Result<(), ValidationError> {
    let map = as_record(value, "an object")?;

    for (key, data_type) in &object.required {
        v.check(data_type, map.get(key), depth).map_err(|e| e.at(key.as_str()))?;
    }

    let undefined = DataType::Undefined;
    for (key, data_type) in &object.optional {
        // Absent optional keys are never inspected.
        let Some(item) = map.get(key) else { continue };
        union::check_any_of(v, [data_type, &undefined], Some(item), depth)
            .map_err(|e| e.at(key.as_str()))?;
    }

    if object.strict || v.options().strict {
        let extra: Vec<String> = map
            .keys()
            .filter(|key| !object.declares(key))
            .map(|key| Value::from(key.as_str()).to_string())
            .collect();
        if !extra.is_empty() {
            return Err(ValidationError::new(format!(
                "{} contains extra keys: {}",
                show(value),
                extra.join(", ")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathSegment;
    use crate::validate::ValidateOptions;
    use serde_json::json;

    fn sample() -> ObjectType {
        ObjectType::new()
            .with_required("a", DataType::Number)
            .with_optional("b", DataType::String)
    }

    #[test]
    fn missing_required_key_is_undefined() {
        let v = Validator::default();
        let err = check_object(&v, &sample(), Some(&json!({})), 0).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Key("a".into())]);
        assert_eq!(err.message, "undefined is not a number");
    }

    #[test]
    fn optional_keys_are_unioned_with_undefined() {
        let v = Validator::default();
        assert!(check_object(&v, &sample(), Some(&json!({ "a": 1 })), 0).is_ok());
        assert!(check_object(&v, &sample(), Some(&json!({ "a": 1, "b": "x" })), 0).is_ok());
        let err = check_object(&v, &sample(), Some(&json!({ "a": 1, "b": 2 })), 0).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Key("b".into())]);
        assert_eq!(err.message, "2 must satisfy one of:");
        let children: Vec<_> = err.children.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(children, ["2 is not a string", "2 is not undefined"]);
    }

    #[test]
    fn required_keys_are_checked_before_optional_ones() {
        let v = Validator::default();
        let err = check_object(&v, &sample(), Some(&json!({ "b": 2 })), 0).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Key("a".into())]);
    }

    #[test]
    fn strict_lists_extra_keys_in_value_order() {
        let v = Validator::default();
        let strict = sample().with_strict(true);
        let value = json!({ "z": 0, "a": 1, "c": "x" });
        let err = check_object(&v, &strict, Some(&value), 0).unwrap_err();
        assert!(err.path.is_empty());
        assert_eq!(err.message, r#"{"z":0,"a":1,"c":"x"} contains extra keys: "z", "c""#);
        assert!(check_object(&v, &sample(), Some(&value), 0).is_ok());
    }

    #[test]
    fn strict_option_applies_to_loose_objects() {
        let v = Validator::new(ValidateOptions::strict());
        let err = check_object(&v, &sample(), Some(&json!({ "a": 1, "c": 1 })), 0).unwrap_err();
        assert_eq!(err.message, r#"{"a":1,"c":1} contains extra keys: "c""#);
    }

    #[test]
    fn arrays_are_neither_maps_nor_objects() {
        let v = Validator::default();
        let err = check_map(&v, &DataType::Any, Some(&json!([])), 0).unwrap_err();
        assert_eq!(err.message, "[] is not a map");
        let err = check_object(&v, &sample(), Some(&json!([1])), 0).unwrap_err();
        assert_eq!(err.message, "[1] is not an object");
    }

    #[test]
    fn map_reports_failing_key() {
        let v = Validator::default();
        let err = check_map(&v, &DataType::Number, Some(&json!({ "a": "b", "b": 1 })), 0).unwrap_err();
        assert_eq!(err.to_string(), r#".a: "b" is not a number"#);
    }
}
