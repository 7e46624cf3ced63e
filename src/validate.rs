//! Conformance checking.
//!
//! A single exhaustive match over [`DataType`] dispatches to the helpers in
//! `validate/`. Every helper returns `Ok(())` or an error whose path is
//! relative to the value it was given; containers prepend their own key or
//! index before passing the error up.
//!
//! Undefined is modelled as absence: internal checks take `Option<&Value>`
//! and `None` stands for undefined (a missing key, an index past the end).
mod arr;
mod obj;
mod scalar;
mod union;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::ir::DataType;

// ------------------------------- Options --------------------------------- //

pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs for a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Treat every object in the walk as strict.
    pub strict: bool,
    /// Nesting limit, counted in data-type nodes visited along one path.
    pub max_depth: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidateOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

// ------------------------------ Validator -------------------------------- //

/// Runs data types against values. Stateless apart from its options, so one
/// validator can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidateOptions,
}

impl Validator {
    pub fn new(options: ValidateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    pub fn validate(&self, data_type: &DataType, value: &Value) -> Result<(), ValidationError> {
        self.validate_slot(data_type, Some(value))
    }

    /// Like [`Self::validate`], but `None` validates undefined.
    pub fn validate_slot(
        &self,
        data_type: &DataType,
        value: Option<&Value>,
    ) -> Result<(), ValidationError> {
        tracing::trace!(kind = %data_type.kind(), "validating value");
        let result = self.check(data_type, value, 0);
        if let Err(error) = &result {
            tracing::debug!(path = %error.accessor(), message = %error.message, "value rejected");
        }
        result
    }

    pub fn matches(&self, data_type: &DataType, value: &Value) -> bool {
        self.check(data_type, Some(value), 0).is_ok()
    }

    pub(crate) fn check(
        &self,
        data_type: &DataType,
        value: Option<&Value>,
        depth: usize,
    ) -> Result<(), ValidationError> {
        if depth >= self.options.max_depth {
            return Err(ValidationError::new(format!(
                "{} exceeds the maximum validation depth of {}",
                show(value),
                self.options.max_depth
            )));
        }
        let depth = depth + 1;
        match data_type {
            DataType::Null => scalar::check_null(value),
            DataType::Undefined => scalar::check_undefined(value),
            DataType::String => scalar::check_string(value),
            DataType::Number => scalar::check_number(value),
            DataType::Boolean => scalar::check_boolean(value),
            DataType::Literal { value: literal } => scalar::check_literal(literal, value),
            DataType::Array { inner } => arr::check_array(self, inner, value, depth),
            DataType::Tuple { values } => arr::check_tuple(self, values, value, depth),
            DataType::Map { inner } => obj::check_map(self, inner, value, depth),
            DataType::Object(object) => obj::check_object(self, object, value, depth),
            DataType::Any => Ok(()),
            DataType::Or { values } => union::check_any_of(self, values, value, depth),
            DataType::Reference(reference) => match reference.target() {
                Some(target) => self.check(target, value, depth),
                None => Err(ValidationError::new(format!(
                    "{} cannot be checked against unbound reference {}",
                    show(value),
                    reference.name()
                ))),
            },
        }
    }
}

/// JSON text of a value for messages; `undefined` when absent.
pub(crate) fn show(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "undefined".to_string(),
    }
}

// --------------------------- DataType methods ----------------------------- //

impl DataType {
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        Validator::default().validate(self, value)
    }

    pub fn validate_with(
        &self,
        value: &Value,
        options: ValidateOptions,
    ) -> Result<(), ValidationError> {
        Validator::new(options).validate(self, value)
    }

    /// `None` validates undefined.
    pub fn validate_slot(&self, value: Option<&Value>) -> Result<(), ValidationError> {
        Validator::default().validate_slot(self, value)
    }

    pub fn matches(&self, value: &Value) -> bool {
        Validator::default().matches(self, value)
    }
}
