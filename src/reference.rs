//! Named indirection between data types.
//!
//! A [`Reference`] is the only way a data-type tree points back at itself.
//! Clones share one write-once cell, so binding any clone binds all of them.
//!
//! The root returned by [`Reference::recursive`] is a *definition*: it
//! carries its body and serializes as
//! `{ "type": "reference", "name": ..., "definition": <body> }`, so decoding
//! can bind the inner references again. Every other reference serializes,
//! compares and renders by name only and is never followed.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SchemaError;
use crate::ir::DataType;

#[derive(Clone)]
pub struct Reference {
    name: String,
    target: Arc<OnceCell<DataType>>,
    definition: bool,
}

impl Reference {
    /// An unbound reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: Arc::new(OnceCell::new()),
            definition: false,
        }
    }

    /// A definition of `name` whose inner references to `name` are bound to
    /// `body`. Inner definitions keep their own bindings.
    pub fn define(name: impl Into<String>, body: DataType) -> Result<Self, SchemaError> {
        let name = name.into();
        let snapshot = body.clone();
        for_each_free(&body, &mut |inner: &Reference| {
            if inner.name == name {
                inner.bind(snapshot.clone())?;
            }
            Ok(())
        })?;
        Ok(Self {
            name,
            target: Arc::new(OnceCell::with_value(body)),
            definition: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&DataType> {
        self.target.get()
    }

    pub fn is_bound(&self) -> bool {
        self.target.get().is_some()
    }

    /// True for the root of a recursive data type.
    pub fn is_definition(&self) -> bool {
        self.definition
    }

    /// The body, when this reference is a definition.
    pub fn definition(&self) -> Option<&DataType> {
        self.target().filter(|_| self.definition)
    }

    /// Binds the reference. A reference can be bound once.
    pub fn bind(&self, data_type: DataType) -> Result<(), SchemaError> {
        self.target
            .set(data_type)
            .map_err(|_| SchemaError::AlreadyBound(self.name.clone()))
    }

    /// Points this reference at the same cell as `other`.
    pub(crate) fn share(&mut self, other: &Reference) {
        self.target = Arc::clone(&other.target);
    }

    /// Builds a self-referential data type. `build` receives a reference to
    /// the type being built; the reference is bound to the result, and the
    /// returned definition wraps it.
    ///
    /// `build` must not bind the reference itself. Debug builds panic if it
    /// does; release builds keep that binding.
    pub fn recursive(
        name: impl Into<String>,
        build: impl FnOnce(DataType) -> DataType,
    ) -> DataType {
        let mut this = Reference::new(name);
        let body = build(DataType::Reference(this.clone()));
        if let Err(err) = this.bind(body) {
            tracing::warn!(name = %this.name, "recursive builder bound its own reference");
            debug_assert!(false, "{err}");
        }
        this.definition = true;
        DataType::Reference(this)
    }
}

/// Calls `f` on every unbound reference in `data_type`, looking inside
/// definitions but never through bound references.
pub(crate) fn for_each_free(
    data_type: &DataType,
    f: &mut impl FnMut(&Reference) -> Result<(), SchemaError>,
) -> Result<(), SchemaError> {
    match data_type {
        DataType::Null
        | DataType::Undefined
        | DataType::String
        | DataType::Number
        | DataType::Boolean
        | DataType::Literal { .. }
        | DataType::Any => Ok(()),
        DataType::Array { inner } | DataType::Map { inner } => for_each_free(inner, f),
        DataType::Tuple { values } | DataType::Or { values } => {
            values.iter().try_for_each(|dt| for_each_free(dt, f))
        }
        DataType::Object(object) => object
            .required
            .values()
            .chain(object.optional.values())
            .try_for_each(|dt| for_each_free(dt, f)),
        DataType::Reference(reference) => match reference.definition() {
            Some(body) => for_each_free(body, f),
            None if reference.is_bound() => Ok(()),
            None => f(reference),
        },
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.definition() == other.definition()
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Reference");
        out.field("name", &self.name);
        match self.definition() {
            Some(body) => out.field("definition", body),
            None => out.field("bound", &self.is_bound()),
        };
        out.finish()
    }
}

#[derive(Serialize)]
struct RefOut<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    definition: Option<&'a DataType>,
}

#[derive(Deserialize)]
struct RefIn {
    name: String,
    #[serde(default)]
    definition: Option<DataType>,
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RefOut {
            name: &self.name,
            definition: self.definition(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RefIn { name, definition } = RefIn::deserialize(deserializer)?;
        match definition {
            Some(body) => Reference::define(name, body).map_err(D::Error::custom),
            None => Ok(Reference::new(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list() -> DataType {
        Reference::recursive("List", |this| DataType::Or {
            values: vec![DataType::Null, DataType::Array { inner: Box::new(this) }],
        })
    }

    #[test]
    fn clones_share_binding() {
        let a = Reference::new("A");
        let b = a.clone();
        assert!(!b.is_bound());
        a.bind(DataType::Number).unwrap();
        assert_eq!(b.target(), Some(&DataType::Number));
    }

    #[test]
    fn binds_once() {
        let a = Reference::new("A");
        a.bind(DataType::Number).unwrap();
        let err = a.bind(DataType::String).unwrap_err();
        assert!(matches!(err, SchemaError::AlreadyBound(name) if name == "A"));
        assert_eq!(a.target(), Some(&DataType::Number));
    }

    #[test]
    fn recursive_closes_the_loop() {
        let DataType::Reference(root) = list() else {
            panic!("expected a definition");
        };
        assert!(root.is_definition());
        let Some(DataType::Or { values }) = root.definition() else {
            panic!("expected a union body");
        };
        let DataType::Array { inner } = &values[1] else {
            panic!("expected an array");
        };
        let DataType::Reference(inner) = inner.as_ref() else {
            panic!("expected a reference");
        };
        assert!(!inner.is_definition());
        assert_eq!(inner.target(), root.definition());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already bound")]
    fn recursive_builder_must_not_bind() {
        Reference::recursive("Loop", |this| {
            let DataType::Reference(r) = &this else { unreachable!() };
            r.bind(DataType::Null).unwrap();
            this
        });
    }

    #[test]
    fn serializes_by_name() {
        let dt = DataType::Reference(Reference::new("User"));
        let encoded = serde_json::to_value(&dt).unwrap();
        assert_eq!(encoded, json!({ "type": "reference", "name": "User" }));
        let decoded: DataType = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, dt);
    }

    #[test]
    fn definitions_serialize_their_body() {
        let encoded = serde_json::to_value(list()).unwrap();
        assert_eq!(
            encoded,
            json!({ "type": "reference", "name": "List", "definition": { "type": "or", "values": [
                { "type": "null" },
                { "type": "array", "inner": { "type": "reference", "name": "List" } }
            ] } })
        );
    }

    #[test]
    fn decoded_definitions_bind_their_inner_references() {
        let decoded: DataType = serde_json::from_value(serde_json::to_value(list()).unwrap()).unwrap();
        assert_eq!(decoded, list());
        let mut free = Vec::new();
        for_each_free(&decoded, &mut |r: &Reference| {
            free.push(r.name().to_string());
            Ok(())
        })
        .unwrap();
        assert!(free.is_empty());
    }

    #[test]
    fn definitions_differ_from_plain_references() {
        let plain = DataType::Reference(Reference::new("List"));
        assert_ne!(list(), plain);
        let other = Reference::recursive("List", |_| DataType::Null);
        assert_ne!(list(), other);
    }
}
