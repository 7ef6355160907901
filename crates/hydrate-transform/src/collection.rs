//! # Collection Builder
//!
//! Validates a sequence against a collection type's element type. Every
//! item is checked, including items after the first failure, so the
//! aggregate names every bad index (`tags.0`, `tags.3`, ...).
//!
//! The validated items become the variadic constructor argument, one
//! argument per item in input order. A suppressed collection validates its
//! items but is built with no arguments.

use hydrate_core::{path, FieldError, Value};
use hydrate_schema::{Arguments, Assembly, Instance, TypeDescriptor};

use crate::collector::{Collector, Rejection};
use crate::transformer::{Transformer, TypeChain};

/// Validate `data` as a `descriptor` collection and build it.
pub(crate) fn check_collection(
    transformer: &Transformer,
    descriptor: &TypeDescriptor,
    data: &Value,
    prefix: Option<&str>,
    chain: &mut TypeChain,
) -> Result<Box<dyn Instance>, Rejection> {
    let Value::Sequence(items) = data else {
        return Err(FieldError::not_sequence(transformer.here(prefix)).into());
    };
    let (param, element) = descriptor.element()?;

    let mut collector = Collector::new();
    let mut validated = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let item_path = path::index(prefix, i);
        match transformer.check_type(Some(element), param.nullable, item, &item_path, chain) {
            Ok(slot) => validated.push(slot),
            Err(rejection) => collector.absorb(rejection)?,
        }
    }
    collector.finish()?;

    let mut arguments = Arguments::new(descriptor.name.clone());
    if descriptor.suppressed {
        tracing::trace!(
            type_name = %descriptor.name,
            items = validated.len(),
            "constructor suppressed, items validated only"
        );
    } else {
        for slot in validated {
            arguments.push(param.name.clone(), slot);
        }
    }

    let built = transformer.registry().build(
        &descriptor.name,
        Assembly {
            arguments,
            fields: Vec::new(),
        },
    )?;
    Ok(built)
}
