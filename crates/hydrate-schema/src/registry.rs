//! # Schema Registry — Type Resolution and Introspection
//!
//! Maps type names to their [`TypeDescriptor`] and [`Builder`]. The
//! transformer resolves every nested named type through this registry; a
//! name that was never registered is an unsupported nested type.
//!
//! ## Caching
//!
//! [`SchemaRegistry::describe`] validates a descriptor (no union or
//! intersection types on fields or constructor parameters) and caches the
//! validated `Arc<TypeDescriptor>`. Cached descriptors are never mutated;
//! re-registering a name replaces the entry and drops its cached
//! description. Computing the same description twice is harmless.
//!
//! ## Thread Safety
//!
//! `SchemaRegistry` is `Send + Sync`. Both maps sit behind
//! `parking_lot::RwLock`s, always acquired in the same order (cache, then
//! entries) when both are needed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hydrate_core::SchemaError;
use parking_lot::RwLock;

use crate::descriptor::{ConstructorSpec, TypeDescriptor};
use crate::instance::{typed_builder, Assembly, Builder, Instance, Target};

#[derive(Clone)]
struct Entry {
    descriptor: Arc<TypeDescriptor>,
    builder: Builder,
}

/// Name-keyed registry of target types.
#[derive(Default)]
pub struct SchemaRegistry {
    entries: RwLock<HashMap<String, Entry>>,
    described: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("types", &self.names())
            .finish()
    }
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` and return the registry, for chained setup.
    pub fn with<T: Target>(self) -> Self {
        self.register::<T>();
        self
    }

    /// Register a Rust [`Target`] type under `T::NAME`, then the types it
    /// declares through [`Target::register_dependencies`].
    pub fn register<T: Target>(&self) {
        let mut descriptor = T::descriptor();
        if descriptor.name != T::NAME {
            tracing::warn!(
                name = T::NAME,
                descriptor_name = %descriptor.name,
                "descriptor name differs from Target::NAME; using Target::NAME"
            );
            descriptor.name = T::NAME.to_string();
        }
        self.register_descriptor(descriptor, typed_builder::<T>());
        T::register_dependencies(self);
    }

    /// Register `T` unless a type of the same name is already present.
    pub fn ensure_registered<T: Target>(&self) {
        if !self.contains(T::NAME) {
            self.register::<T>();
        }
    }

    /// Register a descriptor with an explicit builder.
    ///
    /// Replaces any previous entry of the same name.
    pub fn register_descriptor(&self, descriptor: TypeDescriptor, builder: Builder) {
        let name = descriptor.name.clone();
        let mut described = self.described.write();
        let mut entries = self.entries.write();
        let replaced = entries
            .insert(
                name.clone(),
                Entry {
                    descriptor: Arc::new(descriptor),
                    builder,
                },
            )
            .is_some();
        described.remove(&name);
        if replaced {
            tracing::warn!(type_name = %name, "replaced existing type registration");
        } else {
            tracing::debug!(type_name = %name, "registered type");
        }
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered type names, sorted alphabetically.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// The validated descriptor of `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnsupportedType` if `name` is not registered
    /// or if any field or constructor parameter has a union or
    /// intersection type.
    pub fn describe(&self, name: &str) -> Result<Arc<TypeDescriptor>, SchemaError> {
        if let Some(cached) = self.described.read().get(name) {
            tracing::trace!(type_name = name, "descriptor cache hit");
            return Ok(Arc::clone(cached));
        }

        let mut described = self.described.write();
        if let Some(cached) = described.get(name) {
            return Ok(Arc::clone(cached));
        }
        let descriptor = self
            .entries
            .read()
            .get(name)
            .map(|e| Arc::clone(&e.descriptor))
            .ok_or_else(|| SchemaError::UnsupportedType(format!("unknown type {name}")))?;
        descriptor.validate()?;
        tracing::trace!(type_name = name, "descriptor cache miss, validated");
        described.insert(name.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// The constructor signature of `name`, if it declares one.
    ///
    /// # Errors
    ///
    /// Same as [`describe`](Self::describe).
    pub fn describe_constructor(&self, name: &str) -> Result<Option<ConstructorSpec>, SchemaError> {
        Ok(self.describe(name)?.constructor.clone())
    }

    /// Run the registered builder of `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnsupportedType` if `name` is not registered,
    /// or whatever the builder returns.
    pub fn build(&self, name: &str, assembly: Assembly) -> Result<Box<dyn Instance>, SchemaError> {
        let builder = self
            .entries
            .read()
            .get(name)
            .map(|e| Arc::clone(&e.builder))
            .ok_or_else(|| SchemaError::UnsupportedType(format!("unknown type {name}")))?;
        builder(assembly)
    }
}
