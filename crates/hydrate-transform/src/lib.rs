//! # hydrate-transform — Untyped Data to Typed Object Graphs
//!
//! The transformation engine. Given a registered target type and a
//! [`Value`](hydrate_core::Value) tree, [`Transformer`] either builds a
//! fully populated instance or returns one
//! [`TransformError`](hydrate_core::TransformError) naming every invalid
//! field path.
//!
//! ## Components
//!
//! - `transformer`: recursive object walk, field defaults, exclusion and
//!   constructor binding.
//! - `collection`: sequence validation for collection types.
//! - `scalar`: exact-kind checks for `int`, `float`, `string`, `bool`.
//! - `collector`: per-level error accumulation and flattening.
//! - `config`: [`TransformConfig`] (root label, depth limit).
//!
//! ## Crate Policy
//!
//! - No numeric or string coercion. A float field rejects `1`.
//! - Union and intersection types are schema errors, never guessed at.
//! - The walk is read-only with respect to the registry apart from the
//!   descriptor cache and first-use registration of the root type.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use hydrate_core::Value;
//! use hydrate_schema::{
//!     Arguments, FieldSpec, Represent, SchemaRegistry, Slot, Target, TypeDescriptor, TypeRef,
//! };
//! use hydrate_transform::Transformer;
//! use hydrate_core::SchemaError;
//!
//! #[derive(Debug, Clone, Default)]
//! struct Tag {
//!     name: String,
//! }
//!
//! impl Represent for Tag {
//!     fn represent(&self) -> Value {
//!         Value::from_json_str(&format!("{{\"name\": {:?}}}", self.name)).unwrap_or_default()
//!     }
//! }
//!
//! impl Target for Tag {
//!     const NAME: &'static str = "Tag";
//!
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::object(Self::NAME).field(FieldSpec::new("name", TypeRef::STRING))
//!     }
//!
//!     fn construct(_args: Arguments) -> Result<Self, SchemaError> {
//!         Ok(Self::default())
//!     }
//!
//!     fn assign(&mut self, field: &str, value: Slot) -> Result<(), SchemaError> {
//!         if field == "name" {
//!             self.name = value.extract()?;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let transformer = Transformer::new(Arc::new(SchemaRegistry::new()));
//! let tag: Tag = transformer.transform_json(r#"{"name": "rust"}"#).unwrap();
//! assert_eq!(tag.name, "rust");
//!
//! let err = transformer.transform_json::<Tag>(r#"{"name": 1}"#).unwrap_err();
//! let errors = err.field_errors().unwrap();
//! assert_eq!(errors.at("name").unwrap().reason(), "Field must be string");
//! ```

mod collection;
mod collector;
pub mod config;
pub mod scalar;
pub mod transformer;

pub use config::{ConfigError, TransformConfig};
pub use scalar::check_scalar;
pub use transformer::Transformer;
