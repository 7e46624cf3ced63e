//! A data type paired with the Rust type it describes.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ParseError, ValidationError};
use crate::ir::DataType;
use crate::path_de::decode_typed;

/// Validates values against a data type and, once they conform, decodes
/// them into `T`. Serializes as the bare data type.
pub struct Typed<T> {
    data_type: DataType,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Typed<T> {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            _marker: PhantomData,
        }
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.data_type.matches(value)
    }

    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.data_type.validate(value)
    }

    pub fn parse(&self, value: &Value) -> Result<T, ParseError> {
        self.validate(value)?;
        decode_typed(value.clone())
    }

    pub fn parse_str(&self, src: &str) -> Result<T, ParseError> {
        let value: Value = serde_json::from_str(src)?;
        self.parse(&value)
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self {
            data_type: self.data_type.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Typed").field(&self.data_type).finish()
    }
}

impl<T> Serialize for Typed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data_type.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct User {
        id: String,
        name: String,
        age: Option<Vec<f64>>,
    }

    fn user() -> Typed<User> {
        Typed::new(object([
            ("id", string().into()),
            ("name", string().into()),
            ("age", optional(array(number())).into()),
        ]))
    }

    #[test]
    fn parses_conforming_values() {
        let parsed = user().parse(&json!({ "id": "u1", "name": "Ada" })).unwrap();
        assert_eq!(
            parsed,
            User {
                id: "u1".into(),
                name: "Ada".into(),
                age: None,
            }
        );
        let parsed = user().parse_str(r#"{"id":"u2","name":"Bo","age":[1,2.5]}"#).unwrap();
        assert_eq!(parsed.age, Some(vec![1.0, 2.5]));
    }

    #[test]
    fn reports_validation_errors_before_decoding() {
        let err = user().parse(&json!({ "id": "u1" })).unwrap_err();
        let ParseError::Invalid(invalid) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(invalid.to_string(), ".name: undefined is not a string");
    }

    #[test]
    fn serializes_as_its_data_type() {
        let typed = Typed::<String>::new(string());
        assert_eq!(serde_json::to_value(&typed).unwrap(), json!({ "type": "string" }));
    }
}
