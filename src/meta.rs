//! The data type that describes data types.
//!
//! [`data_type_schema`] is a recursive definition named [`DATA_TYPE_NAME`]
//! whose body is a union with one object schema per [`Kind`]. Recursive
//! positions (an array's `inner`, a tuple's `values`, ...) hold a reference
//! to that name, bound to the union once all members exist. The meta-schema
//! is built on first use and never changes afterwards; its own serialized
//! form conforms to it and decodes to an equivalent schema.

use once_cell::sync::Lazy;

use crate::builders::{array, boolean, literal, map, number, object, optional, string, union, Field};
use crate::ir::{DataType, Kind};
use crate::reference::Reference;

pub const DATA_TYPE_NAME: &str = "DataType";

struct MetaSchema {
    root: DataType,
    /// One member per kind, indexed by `Kind as usize`.
    kinds: Vec<DataType>,
}

static META: Lazy<MetaSchema> = Lazy::new(MetaSchema::build);

/// The meta-schema: validates the serialized form of any data type.
pub fn data_type_schema() -> &'static DataType {
    &META.root
}

/// The member of the meta-schema that describes one kind.
pub fn kind_schema(kind: Kind) -> &'static DataType {
    &META.kinds[kind as usize]
}

impl MetaSchema {
    fn build() -> Self {
        let mut kinds = Vec::new();
        let root = Reference::recursive(DATA_TYPE_NAME, |this| {
            kinds = Kind::ALL.iter().map(|&kind| describe(kind, &this)).collect();
            union(kinds.clone())
        });
        tracing::debug!(kinds = kinds.len(), "built data type meta-schema");
        Self { root, kinds }
    }
}

fn describe(kind: Kind, this: &DataType) -> DataType {
    let tag = ("type", Field::from(literal(kind.tag())));
    let fields: Vec<(&str, Field)> = match kind {
        Kind::Null
        | Kind::Undefined
        | Kind::String
        | Kind::Number
        | Kind::Boolean
        | Kind::Any => vec![tag],
        Kind::Literal => vec![tag, ("value", union([string(), number(), boolean()]).into())],
        Kind::Array | Kind::Map => vec![tag, ("inner", this.clone().into())],
        Kind::Tuple | Kind::Or => vec![tag, ("values", array(this.clone()).into())],
        Kind::Object => vec![
            tag,
            ("required", map(this.clone()).into()),
            ("optional", map(this.clone()).into()),
            ("strict", optional(boolean()).into()),
        ],
        Kind::Reference => vec![
            tag,
            ("name", string().into()),
            ("definition", optional(this.clone()).into()),
        ],
    };
    object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_every_kind() {
        let samples = [
            json!({ "type": "null" }),
            json!({ "type": "undefined" }),
            json!({ "type": "string" }),
            json!({ "type": "number" }),
            json!({ "type": "boolean" }),
            json!({ "type": "any" }),
            json!({ "type": "literal", "value": 12 }),
            json!({ "type": "array", "inner": { "type": "string" } }),
            json!({ "type": "tuple", "values": [{ "type": "string" }, { "type": "null" }] }),
            json!({ "type": "map", "inner": { "type": "any" } }),
            json!({
                "type": "object",
                "required": { "a": { "type": "number" } },
                "optional": {},
                "strict": true
            }),
            json!({ "type": "or", "values": [] }),
            json!({ "type": "reference", "name": "User" }),
        ];
        for sample in &samples {
            assert!(data_type_schema().matches(sample), "{sample}");
        }
    }

    #[test]
    fn rejects_malformed_descriptions() {
        assert!(!data_type_schema().matches(&json!({ "type": "float" })));
        assert!(!data_type_schema().matches(&json!({ "type": "array" })));
        assert!(!data_type_schema().matches(&json!({ "type": "literal", "value": null })));
        assert!(!data_type_schema().matches(&json!({
            "type": "array",
            "inner": { "type": "tuple", "values": [{ "type": "nope" }] }
        })));
    }

    #[test]
    fn kind_members_are_indexed_by_kind() {
        assert!(kind_schema(Kind::Map).matches(&json!({ "type": "map", "inner": { "type": "null" } })));
        assert!(!kind_schema(Kind::Map).matches(&json!({ "type": "array", "inner": { "type": "null" } })));
        assert_eq!(
            kind_schema(Kind::Reference).to_string(),
            r#"{ type: "reference"; name: string; definition?: DataType }"#
        );
    }

    #[test]
    fn renders_through_the_self_reference() {
        assert_eq!(
            kind_schema(Kind::Array).to_string(),
            r#"{ type: "array"; inner: DataType }"#
        );
    }
}
