// Serializable data-type descriptions. Behavior lives in `validate` and
// `render`; nodes here are plain data.

use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::reference::Reference;

/// A value shape. Serializes as `{ "type": <kind>, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataType {
    Null,
    Undefined,
    String,
    Number,
    Boolean,
    Literal { value: Literal },
    Array { inner: Box<DataType> },
    /// Validates the declared prefix only; trailing elements are ignored.
    Tuple { values: Vec<DataType> },
    Map { inner: Box<DataType> },
    Object(ObjectType),
    Any,
    Or { values: Vec<DataType> },
    Reference(Reference),
}

impl DataType {
    pub fn kind(&self) -> Kind {
        match self {
            DataType::Null => Kind::Null,
            DataType::Undefined => Kind::Undefined,
            DataType::String => Kind::String,
            DataType::Number => Kind::Number,
            DataType::Boolean => Kind::Boolean,
            DataType::Literal { .. } => Kind::Literal,
            DataType::Array { .. } => Kind::Array,
            DataType::Tuple { .. } => Kind::Tuple,
            DataType::Map { .. } => Kind::Map,
            DataType::Object(_) => Kind::Object,
            DataType::Any => Kind::Any,
            DataType::Or { .. } => Kind::Or,
            DataType::Reference(_) => Kind::Reference,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// KIND
// ————————————————————————————————————————————————————————————————————————————

/// The tag of a [`DataType`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Null,
    Undefined,
    String,
    Number,
    Boolean,
    Literal,
    Array,
    Tuple,
    Map,
    Object,
    Any,
    Or,
    Reference,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 13] = [
        Kind::Null,
        Kind::Undefined,
        Kind::String,
        Kind::Number,
        Kind::Boolean,
        Kind::Literal,
        Kind::Array,
        Kind::Tuple,
        Kind::Map,
        Kind::Object,
        Kind::Any,
        Kind::Or,
        Kind::Reference,
    ];

    /// The serialized `"type"` tag.
    pub fn tag(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Undefined => "undefined",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Literal => "literal",
            Kind::Array => "array",
            Kind::Tuple => "tuple",
            Kind::Map => "map",
            Kind::Object => "object",
            Kind::Any => "any",
            Kind::Or => "or",
            Kind::Reference => "reference",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// LITERAL
// ————————————————————————————————————————————————————————————————————————————

/// An exact scalar a value must equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Number(Number),
    Boolean(bool),
}

impl Literal {
    /// `None` for NaN and infinities, which JSON cannot carry.
    pub fn from_f64(x: f64) -> Option<Self> {
        Number::from_f64(x).map(Literal::Number)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => Value::Number(n.clone()),
            Literal::Boolean(b) => Value::Bool(*b),
        }
    }

    /// Deep equality against a runtime value. Numbers compare by value,
    /// so `12` and `12.0` are the same literal.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::String(a), Value::String(b)) => a == b,
            (Literal::Boolean(a), Value::Bool(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => same_number(a, b),
            _ => false,
        }
    }
}

fn same_number(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    a.as_f64().map(OrderedFloat) == b.as_f64().map(OrderedFloat)
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Value's Display is compact JSON, which also escapes strings.
        write!(f, "{}", self.to_value())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<u64> for Literal {
    fn from(n: u64) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<Number> for Literal {
    fn from(n: Number) -> Self {
        Literal::Number(n)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OBJECT
// ————————————————————————————————————————————————————————————————————————————

/// A record with declared keys. `required` and `optional` are kept disjoint
/// by the builder methods; both preserve declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    pub required: IndexMap<String, DataType>,
    pub optional: IndexMap<String, DataType>,
    /// Reject keys that are neither required nor optional.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ObjectType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required key. A key previously declared optional moves here.
    pub fn with_required(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        let name = name.into();
        self.optional.shift_remove(&name);
        self.required.insert(name, data_type);
        self
    }

    /// Declares an optional key. A key previously declared required moves here.
    pub fn with_optional(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        let name = name.into();
        self.required.shift_remove(&name);
        self.optional.insert(name, data_type);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// True when `key` is either required or optional.
    pub fn declares(&self, key: &str) -> bool {
        self.required.contains_key(key) || self.optional.contains_key(key)
    }
}

impl From<ObjectType> for DataType {
    fn from(object: ObjectType) -> Self {
        DataType::Object(object)
    }
}
