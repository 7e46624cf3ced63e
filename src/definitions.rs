//! Named data types that refer to each other.
//!
//! This is the in-memory form of a set of type aliases, e.g. what an
//! extractor produces from a declaration file: `{ "User": {...}, "Team": {...} }`
//! where a member can be `{ "type": "reference", "name": "User" }`.
//! [`Definitions::link`] connects every reference to its definition so the
//! definitions can be validated against directly, including mutually
//! recursive ones.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builders::map;
use crate::error::SchemaError;
use crate::ir::DataType;
use crate::meta::data_type_schema;
use crate::path_de::decode_schema;
use crate::reference::{for_each_free, Reference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definitions {
    types: IndexMap<String, DataType>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition. References to it need a fresh
    /// [`Self::link`].
    pub fn insert(&mut self, name: impl Into<String>, data_type: DataType) -> Option<DataType> {
        self.types.insert(name.into(), data_type)
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.types.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataType)> {
        self.types.iter().map(|(name, dt)| (name.as_str(), dt))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Binds every reference to the definition of the same name. All
    /// references to one name share one binding. Fails on a name that has
    /// no definition and is not already bound.
    pub fn link(&mut self) -> Result<(), SchemaError> {
        let anchors: IndexMap<String, Reference> = self
            .types
            .keys()
            .map(|name| (name.clone(), Reference::new(name.clone())))
            .collect();

        let mut linked = 0;
        for data_type in self.types.values_mut() {
            linked += retarget(data_type, &anchors)?;
        }
        for (name, anchor) in &anchors {
            if let Some(data_type) = self.types.get(name) {
                anchor.bind(data_type.clone())?;
            }
        }
        tracing::debug!(definitions = self.types.len(), references = linked, "linked definitions");
        Ok(())
    }

    /// Decodes `{ name: <data type>, ... }`, checking each entry against the
    /// meta-schema, and links the result.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        map(data_type_schema().clone())
            .validate(&value)
            .map_err(SchemaError::Invalid)?;
        let mut definitions: Definitions = decode_schema(value)?;
        definitions.link()?;
        Ok(definitions)
    }

    pub fn from_json_str(src: &str) -> Result<Self, SchemaError> {
        Self::from_value(serde_json::from_str(src)?)
    }

    /// References stay references in the output.
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Points every reference in `data_type` at its anchor. Bound references
/// with no anchor keep their binding. Returns how many were retargeted.
fn retarget(data_type: &mut DataType, anchors: &IndexMap<String, Reference>) -> Result<usize, SchemaError> {
    match data_type {
        DataType::Null
        | DataType::Undefined
        | DataType::String
        | DataType::Number
        | DataType::Boolean
        | DataType::Literal { .. }
        | DataType::Any => Ok(0),
        DataType::Array { inner } | DataType::Map { inner } => retarget(inner, anchors),
        DataType::Tuple { values } | DataType::Or { values } => values
            .iter_mut()
            .map(|dt| retarget(dt, anchors))
            .sum(),
        DataType::Object(object) => object
            .required
            .values_mut()
            .chain(object.optional.values_mut())
            .map(|dt| retarget(dt, anchors))
            .sum(),
        DataType::Reference(reference) if reference.is_definition() => {
            bind_free(reference, anchors)
        }
        DataType::Reference(reference) => match anchors.get(reference.name()) {
            Some(anchor) => {
                reference.share(anchor);
                Ok(1)
            }
            None if reference.is_bound() => Ok(0),
            None => Err(SchemaError::UnknownReference(reference.name().to_string())),
        },
    }
}

/// The body of a definition is already sealed, so its free references are
/// bound to a reference to their anchor instead of sharing the anchor.
fn bind_free(definition: &Reference, anchors: &IndexMap<String, Reference>) -> Result<usize, SchemaError> {
    let Some(body) = definition.definition() else {
        return Ok(0);
    };
    let mut linked = 0;
    for_each_free(body, &mut |free: &Reference| match anchors.get(free.name()) {
        Some(anchor) => {
            free.bind(DataType::Reference(anchor.clone()))?;
            linked += 1;
            Ok(())
        }
        None => Err(SchemaError::UnknownReference(free.name().to_string())),
    })?;
    Ok(linked)
}
