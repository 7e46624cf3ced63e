//! Constructor functions for data types.
//!
//! ```
//! use json_dtype::builders::*;
//! use serde_json::json;
//!
//! let user = object([
//!     ("id", string().into()),
//!     ("tags", optional(array(string())).into()),
//! ]);
//! assert!(user.matches(&json!({ "id": "u1" })));
//! assert_eq!(user.to_string(), "{ id: string; tags?: Array<string> }");
//! ```

use crate::ir::{DataType, Literal, ObjectType};
use crate::reference::Reference;

pub fn null() -> DataType {
    DataType::Null
}

pub fn undefined() -> DataType {
    DataType::Undefined
}

pub fn string() -> DataType {
    DataType::String
}

pub fn number() -> DataType {
    DataType::Number
}

pub fn boolean() -> DataType {
    DataType::Boolean
}

pub fn any() -> DataType {
    DataType::Any
}

pub fn literal(value: impl Into<Literal>) -> DataType {
    DataType::Literal { value: value.into() }
}

pub fn array(inner: impl Into<DataType>) -> DataType {
    DataType::Array { inner: Box::new(inner.into()) }
}

pub fn tuple(values: impl IntoIterator<Item = DataType>) -> DataType {
    DataType::Tuple { values: values.into_iter().collect() }
}

pub fn map(inner: impl Into<DataType>) -> DataType {
    DataType::Map { inner: Box::new(inner.into()) }
}

pub fn union(values: impl IntoIterator<Item = DataType>) -> DataType {
    DataType::Or { values: values.into_iter().collect() }
}

/// An unbound named reference; see [`crate::Definitions::link`].
pub fn reference(name: impl Into<String>) -> DataType {
    DataType::Reference(Reference::new(name))
}

/// A data type that contains itself, e.g. a tree:
///
/// ```
/// use json_dtype::builders::*;
///
/// let tree = recursive("Tree", |tree| object([
///     ("value", number().into()),
///     ("children", array(tree).into()),
/// ]));
/// assert!(tree.matches(&serde_json::json!({
///     "value": 1,
///     "children": [{ "value": 2, "children": [] }],
/// })));
/// ```
pub fn recursive(name: impl Into<String>, build: impl FnOnce(DataType) -> DataType) -> DataType {
    Reference::recursive(name, build)
}

// ------------------------------ Optionality ------------------------------- //

/// A data type that also accepts undefined.
///
/// Inside [`object`] it declares an optional key. Anywhere else it converts
/// to `union([inner, undefined()])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Optional(pub DataType);

pub fn optional(inner: impl Into<DataType>) -> Optional {
    Optional(inner.into())
}

impl From<Optional> for DataType {
    fn from(Optional(inner): Optional) -> Self {
        union([inner, undefined()])
    }
}

/// How a key is declared in an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Required(DataType),
    Optional(DataType),
}

impl From<DataType> for Field {
    fn from(data_type: DataType) -> Self {
        Field::Required(data_type)
    }
}

impl From<Optional> for Field {
    fn from(Optional(inner): Optional) -> Self {
        Field::Optional(inner)
    }
}

// -------------------------------- Objects --------------------------------- //

/// A non-strict object from `(key, field)` pairs. A key given twice keeps
/// its last declaration.
pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Field)>) -> DataType {
    object_type(fields).into()
}

/// Like [`object`], rejecting undeclared keys.
pub fn strict_object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Field)>) -> DataType {
    object_type(fields).with_strict(true).into()
}

fn object_type<K: Into<String>>(fields: impl IntoIterator<Item = (K, Field)>) -> ObjectType {
    fields
        .into_iter()
        .fold(ObjectType::new(), |object, (key, field)| match field {
            Field::Required(dt) => object.with_required(key, dt),
            Field::Optional(dt) => object.with_optional(key, dt),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_outside_objects_is_a_union() {
        let dt: DataType = optional(string()).into();
        assert_eq!(dt, union([string(), undefined()]));
        assert!(dt.validate_slot(None).is_ok());
        assert_eq!(dt.to_string(), "string | undefined");
    }

    #[test]
    fn object_splits_required_and_optional() {
        let dt = object([("a", number().into()), ("b", optional(string()).into())]);
        let DataType::Object(object) = &dt else {
            panic!("expected an object");
        };
        assert_eq!(object.required.keys().collect::<Vec<_>>(), ["a"]);
        assert_eq!(object.optional.get("b"), Some(&string()));
        assert!(!object.strict);
    }

    #[test]
    fn last_declaration_wins() {
        let dt = object([("a", number().into()), ("a", optional(string()).into())]);
        assert_eq!(dt.to_string(), "{ a?: string }");
    }

    #[test]
    fn strict_object_rejects_extra_keys() {
        let dt = strict_object([("a", Field::from(number()))]);
        assert!(dt.matches(&json!({ "a": 1 })));
        assert!(!dt.matches(&json!({ "a": 1, "b": 2 })));
    }

    #[test]
    fn literal_accepts_scalars() {
        assert_eq!(literal("x").to_string(), r#""x""#);
        assert_eq!(literal(3).to_string(), "3");
        assert_eq!(literal(false).to_string(), "false");
    }
}
