//! # Transformer — Recursive, Type-Driven Hydration
//!
//! Walks an untyped [`Value`] tree against the registered descriptor of a
//! target type and builds the typed instance graph bottom-up.
//!
//! ## Error Model
//!
//! - Data problems become [`FieldError`]s. All sibling fields of a mapping
//!   (and all items of a sequence) are checked before failing, and nested
//!   failures are flattened into the parent's list, so the caller receives
//!   one [`TransformError`] naming every invalid path in discovery order.
//! - Schema problems ([`SchemaError`]) abort the walk immediately and are
//!   never mixed into a field error list.
//!
//! ## Object Walk
//!
//! For each declared field, in declaration order:
//!
//! 1. Absent key: use the declared default, or record "Field must have
//!    value".
//! 2. Present key: check it against the declared type (untyped fields take
//!    the value as-is; null is allowed only for nullable fields; scalars
//!    must match exactly; named types recurse).
//! 3. Excluded fields are validated but never stored.
//!
//! Constructor parameters are then matched by name against the finalized
//! fields, and the registry's builder creates the instance.
//!
//! ## Thread Safety
//!
//! `Transformer` holds an `Arc<SchemaRegistry>` and no other mutable state.
//! Concurrent transforms share the registry's descriptor cache.

use std::sync::Arc;

use hydrate_core::{path, FieldError, HydrateError, SchemaError, TransformError, Value};
use hydrate_schema::{
    Arguments, Assembly, Instance, SchemaRegistry, Slot, Target, TypeDescriptor, TypeRef,
};

use crate::collection::check_collection;
use crate::collector::{Collector, Rejection};
use crate::config::TransformConfig;
use crate::scalar::check_scalar;

/// Names of the target types currently being built, outermost first.
///
/// A type reappearing in its own chain would recurse forever on a
/// self-describing input, so entering it again is a schema error.
#[derive(Debug, Default)]
pub(crate) struct TypeChain {
    names: Vec<String>,
}

impl TypeChain {
    fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn depth(&self) -> usize {
        self.names.len()
    }

    fn describe_cycle(&self, name: &str) -> String {
        let mut chain = self.names.join(" -> ");
        chain.push_str(" -> ");
        chain.push_str(name);
        chain
    }
}

/// Validates untyped data into registered target types.
#[derive(Debug, Clone)]
pub struct Transformer {
    registry: Arc<SchemaRegistry>,
    config: TransformConfig,
}

impl Transformer {
    /// Transformer over `registry` with default settings.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self::with_config(registry, TransformConfig::default())
    }

    /// Transformer over `registry` with explicit settings.
    pub fn with_config(registry: Arc<SchemaRegistry>, config: TransformConfig) -> Self {
        Self { registry, config }
    }

    /// The registry target types are resolved against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Active settings.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transform `data` into a `T`.
    ///
    /// `T` is registered on first use together with the types it declares
    /// in [`Target::register_dependencies`]. Other named types it refers to
    /// must already be registered.
    ///
    /// # Errors
    ///
    /// Returns `HydrateError::Transform` listing every invalid field, or
    /// `HydrateError::Schema` if a type involved cannot be transformed into.
    pub fn transform<T: Target>(&self, data: &Value) -> Result<T, HydrateError> {
        self.registry.ensure_registered::<T>();
        let built = self.transform_named(T::NAME, data)?;
        Ok(Slot::Instance(built).extract::<T>()?)
    }

    /// Decode `text` as JSON and transform it into a `T`.
    ///
    /// # Errors
    ///
    /// Returns `HydrateError::Decode` for malformed JSON, otherwise as
    /// [`transform`](Self::transform).
    pub fn transform_json<T: Target>(&self, text: &str) -> Result<T, HydrateError> {
        let data = Value::from_json_str(text)?;
        self.transform(&data)
    }

    /// Transform `data` into the registered type `type_name`.
    ///
    /// # Errors
    ///
    /// As [`transform`](Self::transform); an unregistered `type_name` is
    /// `SchemaError::UnsupportedType`.
    pub fn transform_named(
        &self,
        type_name: &str,
        data: &Value,
    ) -> Result<Box<dyn Instance>, HydrateError> {
        tracing::debug!(type_name, "transform started");
        if !self.registry.contains(type_name) {
            return Err(SchemaError::UnsupportedType(format!("unknown type {type_name}")).into());
        }

        let mut chain = TypeChain::default();
        match self.to(type_name, data, None, &mut chain) {
            Ok(built) => {
                tracing::debug!(type_name, "transform succeeded");
                Ok(built)
            }
            Err(Rejection::Field(e)) => Err(TransformError::single(e).into()),
            Err(Rejection::Aggregate(e)) => {
                tracing::debug!(type_name, errors = e.len(), "transform rejected input");
                Err(e.into())
            }
            Err(Rejection::Schema(e)) => {
                tracing::warn!(type_name, error = %e, "transform aborted on schema error");
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Walk
    // -----------------------------------------------------------------------

    /// Path of the value at `prefix`, or the root label.
    pub(crate) fn here(&self, prefix: Option<&str>) -> String {
        path::or_root(prefix, &self.config.root_label)
    }

    fn to(
        &self,
        type_name: &str,
        data: &Value,
        prefix: Option<&str>,
        chain: &mut TypeChain,
    ) -> Result<Box<dyn Instance>, Rejection> {
        if data.is_null() {
            return Err(TransformError::single(FieldError::undecodable(self.here(prefix))).into());
        }
        if !matches!(data, Value::Mapping(_) | Value::Sequence(_)) {
            return Err(TransformError::single(FieldError::not_mapping(self.here(prefix))).into());
        }

        let descriptor = self.registry.describe(type_name)?;
        if matches!(data, Value::Sequence(_)) && !descriptor.is_collection() {
            return Err(TransformError::single(FieldError::not_mapping(self.here(prefix))).into());
        }
        self.within(&descriptor, prefix, chain, |chain| {
            if descriptor.is_collection() {
                check_collection(self, &descriptor, data, prefix, chain)
            } else {
                self.build_object(&descriptor, data, prefix, chain)
            }
        })
    }

    /// Run `step` with `descriptor` pushed on the type chain.
    fn within<R>(
        &self,
        descriptor: &TypeDescriptor,
        prefix: Option<&str>,
        chain: &mut TypeChain,
        step: impl FnOnce(&mut TypeChain) -> Result<R, Rejection>,
    ) -> Result<R, Rejection> {
        let name = descriptor.name.as_str();
        if chain.contains(name) {
            return Err(SchemaError::CyclicType(chain.describe_cycle(name)).into());
        }
        if chain.depth() >= self.config.max_depth {
            return Err(SchemaError::DepthExceeded {
                limit: self.config.max_depth,
                path: self.here(prefix),
            }
            .into());
        }
        tracing::trace!(type_name = name, path = ?prefix, "entering type");
        chain.names.push(name.to_string());
        let result = step(chain);
        chain.names.pop();
        result
    }

    fn build_object(
        &self,
        descriptor: &TypeDescriptor,
        data: &Value,
        prefix: Option<&str>,
        chain: &mut TypeChain,
    ) -> Result<Box<dyn Instance>, Rejection> {
        let mut collector = Collector::new();
        let mut finalized: Vec<(String, Slot)> = Vec::with_capacity(descriptor.fields.len());

        for field in &descriptor.fields {
            let field_path = path::join(prefix, &field.name);
            let slot = match data.get(&field.name) {
                None => match &field.default {
                    Some(default) => Slot::Value(default.clone()),
                    None => {
                        collector.push(FieldError::missing(field_path));
                        continue;
                    }
                },
                Some(value) => {
                    match self.check_type(field.ty.as_ref(), field.nullable, value, &field_path, chain)
                    {
                        Ok(slot) => slot,
                        Err(rejection) => {
                            collector.absorb(rejection)?;
                            continue;
                        }
                    }
                }
            };
            if !field.excluded {
                finalized.push((field.name.clone(), slot));
            }
        }
        collector.finish()?;

        let arguments = bind_constructor(descriptor, &finalized)?;
        let built = self.registry.build(
            &descriptor.name,
            Assembly {
                arguments,
                fields: finalized,
            },
        )?;
        Ok(built)
    }

    /// Check one present value against a declared type.
    pub(crate) fn check_type(
        &self,
        ty: Option<&TypeRef>,
        nullable: bool,
        value: &Value,
        at: &str,
        chain: &mut TypeChain,
    ) -> Result<Slot, Rejection> {
        let Some(ty) = ty else {
            return Ok(Slot::Value(value.clone()));
        };
        if value.is_null() {
            return if nullable {
                Ok(Slot::null())
            } else {
                Err(FieldError::null_value(at).into())
            };
        }

        match ty {
            TypeRef::Scalar(kind) => Ok(Slot::Value(check_scalar(*kind, value, at)?)),
            TypeRef::Named(name) => {
                if !self.registry.contains(name) {
                    return Err(SchemaError::UnsupportedType(format!(
                        "unsupported nested type {name} at {at}"
                    ))
                    .into());
                }
                let descriptor = self.registry.describe(name)?;
                let built = if descriptor.is_collection() {
                    self.within(&descriptor, Some(at), chain, |chain| {
                        check_collection(self, &descriptor, value, Some(at), chain)
                    })?
                } else {
                    self.to(name, value, Some(at), chain)?
                };
                Ok(Slot::Instance(built))
            }
            TypeRef::Union(_) | TypeRef::Intersection(_) => Err(SchemaError::UnsupportedType(
                format!("unsupported composite type {ty} at {at}"),
            )
            .into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Constructor binding
// ---------------------------------------------------------------------------

/// Positional constructor arguments drawn from the finalized fields.
///
/// Each parameter must name a finalized field whose declared type equals
/// the parameter's declared type (both untyped, or the same type).
/// Nullability is not compared.
fn bind_constructor(
    descriptor: &TypeDescriptor,
    finalized: &[(String, Slot)],
) -> Result<Arguments, SchemaError> {
    let mut arguments = Arguments::new(descriptor.name.clone());
    let Some(constructor) = &descriptor.constructor else {
        return Ok(arguments);
    };

    for param in &constructor.params {
        let slot = finalized
            .iter()
            .find(|(name, _)| *name == param.name)
            .map(|(_, slot)| slot)
            .ok_or_else(|| SchemaError::MissingPropertyForConstructorParameter(param.name.clone()))?;
        let field = descriptor
            .field_named(&param.name)
            .ok_or_else(|| SchemaError::MissingPropertyForConstructorParameter(param.name.clone()))?;
        if field.ty != param.ty {
            return Err(SchemaError::ConstructorParamAndPropertyTypeMismatch(
                param.name.clone(),
            ));
        }
        arguments.push(param.name.clone(), slot.clone());
    }
    Ok(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrate_schema::{ConstructorSpec, FieldSpec, ParamSpec};

    fn object(name: &str, fields: Vec<FieldSpec>) -> TypeDescriptor {
        fields.into_iter().fold(TypeDescriptor::object(name), TypeDescriptor::field)
    }

    #[test]
    fn test_bind_constructor_without_constructor_is_empty() {
        let desc = object("A", vec![FieldSpec::new("x", TypeRef::INT)]);
        let finalized = vec![("x".to_string(), Slot::from(Value::Int(1)))];
        assert!(bind_constructor(&desc, &finalized).unwrap().is_empty());
    }

    #[test]
    fn test_bind_constructor_in_parameter_order() {
        let desc = object(
            "A",
            vec![
                FieldSpec::new("x", TypeRef::INT),
                FieldSpec::new("y", TypeRef::STRING),
            ],
        )
        .constructor(ConstructorSpec::new(vec![
            ParamSpec::new("y", TypeRef::STRING),
            ParamSpec::new("x", TypeRef::INT),
        ]));
        let finalized = vec![
            ("x".to_string(), Slot::from(Value::Int(1))),
            ("y".to_string(), Slot::from(Value::from("s"))),
        ];
        let args = bind_constructor(&desc, &finalized).unwrap();
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["y", "x"]);
    }

    #[test]
    fn test_bind_constructor_excluded_field_is_missing() {
        let desc = object("A", vec![FieldSpec::new("x", TypeRef::INT).excluded()])
            .constructor(ConstructorSpec::new(vec![ParamSpec::new("x", TypeRef::INT)]));
        assert_eq!(
            bind_constructor(&desc, &[]).unwrap_err(),
            SchemaError::MissingPropertyForConstructorParameter("x".to_string())
        );
    }

    #[test]
    fn test_bind_constructor_type_mismatch() {
        let desc = object("A", vec![FieldSpec::new("x", TypeRef::INT)])
            .constructor(ConstructorSpec::new(vec![ParamSpec::new("x", TypeRef::FLOAT)]));
        let finalized = vec![("x".to_string(), Slot::from(Value::Int(1)))];
        assert_eq!(
            bind_constructor(&desc, &finalized).unwrap_err(),
            SchemaError::ConstructorParamAndPropertyTypeMismatch("x".to_string())
        );
    }

    #[test]
    fn test_bind_constructor_untyped_against_typed_mismatch() {
        let desc = object("A", vec![FieldSpec::untyped("x")])
            .constructor(ConstructorSpec::new(vec![ParamSpec::new("x", TypeRef::INT)]));
        let finalized = vec![("x".to_string(), Slot::from(Value::Int(1)))];
        assert!(matches!(
            bind_constructor(&desc, &finalized),
            Err(SchemaError::ConstructorParamAndPropertyTypeMismatch(_))
        ));
    }

    #[test]
    fn test_bind_constructor_ignores_nullability() {
        let desc = object("A", vec![FieldSpec::new("x", TypeRef::INT).nullable()])
            .constructor(ConstructorSpec::new(vec![ParamSpec::new("x", TypeRef::INT)]));
        let finalized = vec![("x".to_string(), Slot::null())];
        assert_eq!(bind_constructor(&desc, &finalized).unwrap().len(), 1);
    }

    #[test]
    fn test_type_chain_cycle_description() {
        let chain = TypeChain {
            names: vec!["Node".to_string(), "Edge".to_string()],
        };
        assert!(chain.contains("Node"));
        assert_eq!(chain.describe_cycle("Node"), "Node -> Edge -> Node");
    }
}
