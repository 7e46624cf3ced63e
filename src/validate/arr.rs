use serde_json::Value;

use super::{show, Validator};
use crate::error::ValidationError;
use crate::ir::DataType;

fn as_array(value: Option<&Value>) -> Result<&Vec<Value>, ValidationError> {
    match value {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(ValidationError::new(format!("{} is not an array", show(value)))),
    }
}

/// Every element against `inner`; the first bad element wins.
pub fn check_array(
    v: &Validator,
    inner: &DataType,
    value: Option<&Value>,
    depth: usize,
) -> Result<(), ValidationError> {
    let items = as_array(value)?;
    for (i, item) in items.iter().enumerate() {
        v.check(inner, Some(item), depth).map_err(|e| e.at(i))?;
    }
    Ok(())
}

/// Position `i` against `values[i]` for the declared positions only. Missing
/// positions are undefined; trailing elements are not inspected.
pub fn check_tuple(
    v: &Validator,
    values: &[DataType],
    value: Option<&Value>,
    depth: usize,
) -> Result<(), ValidationError> {
    let items = as_array(value)?;
    for (i, data_type) in values.iter().enumerate() {
        v.check(data_type, items.get(i), depth).map_err(|e| e.at(i))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathSegment;
    use serde_json::json;

    #[test]
    fn array_reports_first_bad_index() {
        let v = Validator::default();
        let err = check_array(&v, &DataType::Number, Some(&json!([1, "a", "b"])), 0).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Index(1)]);
        assert_eq!(err.message, r#""a" is not a number"#);
        assert!(check_array(&v, &DataType::Number, Some(&json!([])), 0).is_ok());
    }

    #[test]
    fn tuple_ignores_trailing_and_fills_missing_with_undefined() {
        let v = Validator::default();
        let values = [DataType::Number, DataType::String];
        assert!(check_tuple(&v, &values, Some(&json!([1, "yes", "extra"])), 0).is_ok());
        let err = check_tuple(&v, &values, Some(&json!([1])), 0).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Index(1)]);
        assert_eq!(err.message, "undefined is not a string");
    }

    #[test]
    fn non_arrays_fail_at_the_root() {
        let v = Validator::default();
        let err = check_tuple(&v, &[], Some(&json!({})), 0).unwrap_err();
        assert!(err.path.is_empty());
        assert_eq!(err.message, "{} is not an array");
    }
}
