//! Validation diagnostics and crate errors.
//!
//! [`ValidationError`] is what a mismatch looks like: a message, the path to
//! the offending value and, for unions, the failure of every member.
//! [`SchemaError`] and [`ParseError`] cover everything that is not a
//! mismatch.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ————————————————————————————————————————————————————————————————————————————
// PATH
// ————————————————————————————————————————————————————————————————————————————

/// One step from a container to one of its values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*$").expect("identifier pattern compiles"));

impl fmt::Display for PathSegment {
    /// Accessor form: `[0]`, `.name` or `["not an identifier"]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::Key(key) if IDENTIFIER.is_match(key) => write!(f, ".{key}"),
            PathSegment::Key(key) => write!(f, "[{}]", Value::from(key.as_str())),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

/// Renders a path as a chain of accessors, e.g. `[2].a["x-y"]`.
pub fn path_to_string(path: &[PathSegment]) -> String {
    path.iter().map(ToString::to_string).collect()
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATION ERROR
// ————————————————————————————————————————————————————————————————————————————

/// Why a value does not conform. Paths read outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<PathSegment>,
    /// Member failures of a union, in member order. Empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ValidationError>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(message: impl Into<String>, children: Vec<ValidationError>) -> Self {
        Self {
            children,
            ..Self::new(message)
        }
    }

    /// Prepends one segment. Called by each container on the way out.
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// The accessor string for [`Self::path`]; empty at the root.
    pub fn accessor(&self) -> String {
        path_to_string(&self.path)
    }
}

/// Multi-line rendering: `<path>: <message>` with union members indented
/// two spaces per level underneath.
pub fn format_error(error: &ValidationError) -> String {
    let mut out = String::new();
    if !error.path.is_empty() {
        out.push_str(&error.accessor());
        out.push_str(": ");
    }
    out.push_str(&error.message);
    if !error.children.is_empty() {
        let block = error
            .children
            .iter()
            .map(format_error)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out.push_str(&indent(&block));
    }
    out
}

fn indent(block: &str) -> String {
    format!("  {}", block.split('\n').collect::<Vec<_>>().join("\n  "))
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_error(self))
    }
}

impl std::error::Error for ValidationError {}

// ————————————————————————————————————————————————————————————————————————————
// CRATE ERRORS
// ————————————————————————————————————————————————————————————————————————————

/// A data-type description could not be accepted.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The description does not conform to the meta-schema.
    #[error("invalid data type description\n{0}")]
    Invalid(ValidationError),

    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },

    #[error("unknown reference: {0}")]
    UnknownReference(String),

    #[error("reference {0} is already bound")]
    AlreadyBound(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A value could not be turned into a typed Rust value.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
