use serde_json::Value;

use super::{show, Validator};
use crate::error::ValidationError;
use crate::ir::DataType;

/// Passes when any member passes. Every member is tried so a failure can
/// list all of them, in member order. An empty union never passes.
pub fn check_any_of<'a, I>(
    v: &Validator,
    members: I,
    value: Option<&Value>,
    depth: usize,
) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a DataType>,
{
    let mut tried = 0;
    let mut errors = Vec::new();
    for member in members {
        tried += 1;
        if let Err(error) = v.check(member, value, depth) {
            errors.push(error);
        }
    }
    if errors.len() < tried {
        return Ok(());
    }
    Err(ValidationError::with_children(
        format!("{} must satisfy one of:", show(value)),
        errors,
    ))
}
