//! Runtime data types for JSON values.
//!
//! A [`DataType`] is a serializable description of a value shape: null,
//! undefined, string, number, boolean, literal, array, tuple, map, object,
//! any, union (`or`) and named references. With one you can
//!
//! - check a value: [`DataType::matches`],
//! - explain a mismatch: [`DataType::validate`] returns a path-annotated
//!   [`ValidationError`], rendered by [`format_error`],
//! - print the shape: [`render`] / `Display`.
//!
//! ```
//! use json_dtype::builders::*;
//! use json_dtype::format_error;
//! use serde_json::json;
//!
//! let point = array(object([("x", number().into()), ("y", optional(number()).into())]));
//! assert_eq!(point.to_string(), "Array<{ x: number; y?: number }>");
//!
//! let err = point.validate(&json!([{ "x": 1 }, { "x": "2" }])).unwrap_err();
//! assert_eq!(format_error(&err), r#"[1].x: "2" is not a number"#);
//! ```
//!
//! Undefined stands for absence. A missing key or a tuple position past the
//! end of an array is undefined; [`DataType::validate_slot`] takes `None` to
//! validate undefined directly.

pub mod builders;
pub mod definitions;
pub mod error;
pub mod ir;
pub mod meta;
mod path_de;
pub mod reference;
pub mod render;
pub mod typed;
pub mod validate;

pub use definitions::Definitions;
pub use error::{format_error, path_to_string, ParseError, PathSegment, SchemaError, ValidationError};
pub use ir::{DataType, Kind, Literal, ObjectType};
pub use meta::data_type_schema;
pub use reference::Reference;
pub use render::render;
pub use typed::Typed;
pub use validate::{ValidateOptions, Validator};

use serde_json::Value;

/// Checks `value` against `data_type` with default options.
pub fn validate(data_type: &DataType, value: &Value) -> Result<(), ValidationError> {
    data_type.validate(value)
}

/// True when `value` conforms to `data_type`.
pub fn matches(data_type: &DataType, value: &Value) -> bool {
    data_type.matches(value)
}
