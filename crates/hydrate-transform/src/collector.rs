//! # Error Collector
//!
//! Accumulates field errors from sibling fields (or collection items) so
//! one pass reports every problem at that level. Nested aggregates are
//! flattened in discovery order; schema errors are never collected and
//! abort the walk immediately.

use hydrate_core::{FieldError, SchemaError, TransformError};

/// Why one step of the walk failed.
#[derive(Debug)]
pub(crate) enum Rejection {
    /// A single invalid field.
    Field(FieldError),
    /// Every field error of a nested value.
    Aggregate(TransformError),
    /// The type shape is unusable. Never collected.
    Schema(SchemaError),
}

impl From<FieldError> for Rejection {
    fn from(e: FieldError) -> Self {
        Rejection::Field(e)
    }
}

impl From<TransformError> for Rejection {
    fn from(e: TransformError) -> Self {
        Rejection::Aggregate(e)
    }
}

impl From<SchemaError> for Rejection {
    fn from(e: SchemaError) -> Self {
        Rejection::Schema(e)
    }
}

/// Ordered accumulator for one level of the walk.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Take in a rejection from a child. Schema errors are handed back.
    pub(crate) fn absorb(&mut self, rejection: Rejection) -> Result<(), SchemaError> {
        match rejection {
            Rejection::Field(e) => self.errors.push(e),
            Rejection::Aggregate(e) => self.errors.extend(e.into_errors()),
            Rejection::Schema(e) => return Err(e),
        }
        Ok(())
    }

    /// Fail with everything collected, if anything was.
    pub(crate) fn finish(self) -> Result<(), TransformError> {
        match TransformError::new(self.errors) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
