//! # hydrate-schema — Type Descriptors, Targets and the Registry
//!
//! Supplies the type metadata the transformer consumes but does not
//! compute itself.
//!
//! ## Descriptors (`descriptor`)
//!
//! [`TypeDescriptor`] lists a type's fields ([`FieldSpec`]: name, declared
//! [`TypeRef`], nullable, default, exclusion flag), its optional
//! [`ConstructorSpec`], and whether it is an object or a collection.
//!
//! ## Targets (`instance`)
//!
//! Rust structs implement [`Target`] to publish a descriptor at compile
//! time and to be built from validated [`Slot`]s. Built values are held
//! type-erased as `Box<dyn Instance>` while the graph is assembled.
//!
//! ## Registry (`registry`)
//!
//! [`SchemaRegistry`] resolves type names, validates descriptors (the
//! introspection step) and caches the result.
//!
//! ## Documents (`document`, `record`)
//!
//! [`SchemaDocument`] loads type definitions from YAML/JSON; instances of
//! those types are dynamic [`Record`]s and [`RecordList`]s.
//!
//! ## Crate Policy
//!
//! - Depends only on `hydrate-core` internally.
//! - Descriptors are immutable once registered; the registry only ever
//!   replaces whole entries.

pub mod descriptor;
pub mod document;
pub mod instance;
pub mod record;
pub mod registry;

pub use descriptor::{
    ConstructorSpec, FieldSpec, ParamSpec, ScalarKind, TypeDescriptor, TypeKind, TypeRef,
};
pub use document::SchemaDocument;
pub use instance::{
    typed_builder, Arguments, Assembly, Builder, FromSlot, Instance, Represent, Slot, Target,
};
pub use record::{record_builder, Record, RecordList};
pub use registry::SchemaRegistry;
