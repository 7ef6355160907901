//! # Error Types — Field Errors and Configuration Errors
//!
//! Defines the error hierarchy used throughout hydrate. All enums use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! There are two independent failure families:
//!
//! - **Data errors.** A [`FieldError`] is one localized problem with the
//!   input (path + reason). Field errors are collected across sibling fields
//!   and nested types and reported together in a [`TransformError`], which
//!   is never empty. Nested aggregates are flattened into their parent,
//!   never nested.
//! - **Configuration errors.** A [`SchemaError`] means the target type's
//!   declared shape cannot be processed (union field types, malformed
//!   collection constructors, constructor/property mismatches, cycles). It
//!   aborts the transformation immediately and is never merged with field
//!   errors.
//!
//! [`HydrateError`] is the boundary type returned by the public entry
//! points.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason reported when input for a type is null.
pub const REASON_UNDECODABLE: &str = "Data could not be decoded";
/// Reason reported when input for an object type is not a mapping.
pub const REASON_NOT_MAPPING: &str = "Field value must be an array";
/// Reason reported when input for a collection is not a sequence.
pub const REASON_NOT_SEQUENCE: &str = "Field must be array";
/// Reason reported for a required field absent from the input.
pub const REASON_MISSING: &str = "Field must have value";
/// Reason reported for null given to a non-nullable field.
pub const REASON_NULL: &str = "Field cannot have null value";

/// One localized validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    path: String,
    reason: String,
}

impl FieldError {
    /// Create a field error at `path`.
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The input for a type was null.
    pub fn undecodable(path: impl Into<String>) -> Self {
        Self::new(path, REASON_UNDECODABLE)
    }

    /// The input for an object type was not a mapping.
    pub fn not_mapping(path: impl Into<String>) -> Self {
        Self::new(path, REASON_NOT_MAPPING)
    }

    /// The input for a collection was not a sequence.
    pub fn not_sequence(path: impl Into<String>) -> Self {
        Self::new(path, REASON_NOT_SEQUENCE)
    }

    /// A required field was absent and has no default.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, REASON_MISSING)
    }

    /// A non-nullable field received null.
    pub fn null_value(path: impl Into<String>) -> Self {
        Self::new(path, REASON_NULL)
    }

    /// A scalar field received a value of another kind.
    pub fn kind_mismatch(path: impl Into<String>, kind: &str) -> Self {
        Self::new(path, format!("Field must be {kind}"))
    }

    /// Dotted path of the offending field.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Human-readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Ordered, non-empty aggregate of field errors for one transformation.
///
/// # Invariants
///
/// - Never empty: the only constructors are [`TransformError::new`] (which
///   returns `None` for an empty list) and [`TransformError::single`].
/// - Order is discovery order; equality is structural and order-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransformError {
    errors: Vec<FieldError>,
}

impl TransformError {
    /// Wrap a list of errors, or `None` if the list is empty.
    pub fn new(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Wrap exactly one error.
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Returns the number of errors (always at least one).
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors in discovery order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns an iterator over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Returns the error at `path`, if any.
    pub fn at(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transformation failed with {} field error(s):", self.errors.len())?;
        for e in &self.errors {
            write!(f, "\n  {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TransformError {}

impl IntoIterator for TransformError {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a TransformError {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// The target type's declared shape cannot be processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A type, field type, or collection shape is not supported.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A constructor parameter has no settable property of the same name.
    #[error("missing property for constructor parameter '{0}'")]
    MissingPropertyForConstructorParameter(String),

    /// A constructor parameter and its same-named property disagree on type.
    #[error("constructor parameter and property type mismatch for '{0}'")]
    ConstructorParamAndPropertyTypeMismatch(String),

    /// A type was re-entered while it was already being transformed.
    #[error("cyclic type graph: {0}")]
    CyclicType(String),

    /// Nesting of target types exceeded the configured limit.
    #[error("type nesting exceeds maximum depth of {limit} at '{path}'")]
    DepthExceeded {
        /// Configured maximum depth.
        limit: usize,
        /// Path at which the limit was hit.
        path: String,
    },

    /// A built value could not be extracted as the requested Rust type.
    #[error("expected {expected}, found {found}")]
    SlotMismatch {
        /// Rust type that was requested.
        expected: String,
        /// What the slot actually held.
        found: String,
    },

    /// A type's constructor or field assignment rejected its inputs.
    #[error("cannot construct '{type_name}': {reason}")]
    Construction {
        /// Name of the type being built.
        type_name: String,
        /// Reason construction failed.
        reason: String,
    },

    /// A declarative schema document is malformed.
    #[error("invalid schema document: {0}")]
    Document(String),
}

/// Top-level error returned by hydrate's public entry points.
#[derive(Error, Debug)]
pub enum HydrateError {
    /// The input did not match the target type.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The target type cannot be processed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Input text could not be decoded into a value tree.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HydrateError {
    /// The field errors, if this is a data error.
    pub fn field_errors(&self) -> Option<&TransformError> {
        match self {
            HydrateError::Transform(e) => Some(e),
            _ => None,
        }
    }

    /// The configuration error, if this is one.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            HydrateError::Schema(e) => Some(e),
            _ => None,
        }
    }
}
