use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ParseError, SchemaError};
use crate::ir::DataType;
use crate::meta::data_type_schema;
use crate::reference::{for_each_free, Reference};

/// Deserialize with JSON-path context in error messages.
pub(crate) fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, (String, String)> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        (path, err.into_inner().to_string())
    })
}

pub(crate) fn decode_schema<T: DeserializeOwned>(value: Value) -> Result<T, SchemaError> {
    from_value_with_path(value).map_err(|(path, message)| {
        tracing::debug!(%path, %message, "data type description failed to decode");
        SchemaError::Decode { path, message }
    })
}

pub(crate) fn decode_typed<T: DeserializeOwned>(value: Value) -> Result<T, ParseError> {
    from_value_with_path(value).map_err(|(path, message)| ParseError::Decode { path, message })
}

impl DataType {
    /// Decodes a serialized description. The input is checked against the
    /// meta-schema first, so malformed input reports a path-annotated
    /// [`ValidationError`](crate::ValidationError).
    ///
    /// Every reference must resolve inside the description, i.e. name an
    /// enclosing definition. Free names belong in
    /// [`Definitions`](crate::Definitions).
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        data_type_schema().validate(&value).map_err(SchemaError::Invalid)?;
        let data_type: DataType = decode_schema(value)?;
        for_each_free(&data_type, &mut |free: &Reference| {
            Err(SchemaError::UnknownReference(free.name().to_string()))
        })?;
        Ok(data_type)
    }

    pub fn from_json_str(src: &str) -> Result<Self, SchemaError> {
        Self::from_value(serde_json::from_str(src)?)
    }

    pub fn to_value(&self) -> Result<Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }
}
