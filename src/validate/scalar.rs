use serde_json::Value;

use super::show;
use crate::error::ValidationError;
use crate::ir::Literal;

fn mismatch(value: Option<&Value>, expected: &str) -> Result<(), ValidationError> {
    Err(ValidationError::new(format!("{} is not {expected}", show(value))))
}

pub fn check_null(value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(Value::Null) => Ok(()),
        _ => mismatch(value, "null"),
    }
}

pub fn check_undefined(value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        None => Ok(()),
        _ => mismatch(value, "undefined"),
    }
}

pub fn check_string(value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(Value::String(_)) => Ok(()),
        _ => mismatch(value, "a string"),
    }
}

pub fn check_number(value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(Value::Number(_)) => Ok(()),
        _ => mismatch(value, "a number"),
    }
}

pub fn check_boolean(value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(Value::Bool(_)) => Ok(()),
        _ => mismatch(value, "a boolean"),
    }
}

pub fn check_literal(literal: &Literal, value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(v) if literal.matches(v) => Ok(()),
        _ => mismatch(value, &literal.to_string()),
    }
}
