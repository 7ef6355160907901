//! # hydrate-core — Foundational Types for hydrate
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: the untyped input tree that data arrives in, the dotted field
//! paths that locate a value inside it, and the two error families that a
//! transformation can end in.
//!
//! ## Key Design Principles
//!
//! 1. **Closed input model.** All input is a [`Value`]: null, bool, int,
//!    float, string, sequence or mapping. Every check downstream is an
//!    exhaustive `match` over this enum; there is no ad hoc type sniffing.
//!
//! 2. **Field errors aggregate, configuration errors abort.** A
//!    [`FieldError`] is one recoverable data problem. They are only ever
//!    surfaced inside a non-empty [`TransformError`]. A [`SchemaError`]
//!    means the target type itself cannot be processed and is never merged
//!    with field errors.
//!
//! 3. **No numeric coercion.** `Int` and `Float` are distinct variants and
//!    stay distinct through conversion from JSON.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hydrate-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{FieldError, HydrateError, SchemaError, TransformError};
pub use value::Value;
