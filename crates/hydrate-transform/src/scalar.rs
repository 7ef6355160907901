//! # Scalar Validator
//!
//! Checks a leaf value against one builtin kind. The runtime kind must match
//! exactly: an int is not a float, `"1"` is not an int, and `0` is not a
//! bool. There is no coercion of any kind.

use hydrate_core::{FieldError, Value};
use hydrate_schema::ScalarKind;

/// Accept `value` if its runtime kind is exactly `kind`.
///
/// # Errors
///
/// Returns `FieldError(path, "Field must be <kind>")` on any mismatch.
pub fn check_scalar(kind: ScalarKind, value: &Value, path: &str) -> Result<Value, FieldError> {
    match (kind, value) {
        (ScalarKind::Int, Value::Int(_))
        | (ScalarKind::Float, Value::Float(_))
        | (ScalarKind::String, Value::String(_))
        | (ScalarKind::Bool, Value::Bool(_)) => Ok(value.clone()),
        _ => Err(FieldError::kind_mismatch(path, kind.name())),
    }
}
