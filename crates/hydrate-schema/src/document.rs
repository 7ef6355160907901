//! # Schema Documents — Declarative Type Definitions
//!
//! Types can be declared in a YAML (or JSON) document instead of Rust code:
//!
//! ```yaml
//! types:
//!   - name: Tag
//!     fields:
//!       - { name: name, type: string }
//!   - name: Tags
//!     kind: collection
//!     constructor:
//!       - { name: items, type: Tag, variadic: true }
//!   - name: Post
//!     fields:
//!       - { name: title, type: string }
//!       - { name: subtitle, type: "?string", default: null }
//!       - { name: tags, type: Tags }
//! ```
//!
//! Installing a document registers every type with a [`record_builder`], so
//! transforming into these types yields [`Record`](crate::record::Record)
//! and [`RecordList`](crate::record::RecordList) instances.
//!
//! Installation checks only what a document alone can get wrong (empty or
//! duplicate names). Shape problems such as union field types are reported
//! by [`SchemaRegistry::describe`] when the type is first used, exactly as
//! for Rust-defined types.

use std::collections::HashSet;
use std::path::Path;

use hydrate_core::SchemaError;
use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::record::record_builder;
use crate::registry::SchemaRegistry;

/// A set of declaratively defined types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Type definitions in document order.
    pub types: Vec<TypeDescriptor>,
}

impl SchemaDocument {
    /// Parse a YAML document. JSON documents parse as well.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Document` if the text is not a valid document.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(text).map_err(|e| SchemaError::Document(e.to_string()))
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Document` if the text is not a valid document.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(text).map_err(|e| SchemaError::Document(e.to_string()))
    }

    /// Read and parse a document file. `.json` files are parsed as JSON,
    /// everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Document` if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::Document(format!("cannot read {}: {e}", path.display()))
        })?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Look up a type definition by name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Check for empty and duplicate type names.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Document` naming the first offending type.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for ty in &self.types {
            if ty.name.trim().is_empty() {
                return Err(SchemaError::Document("type with empty name".to_string()));
            }
            if !seen.insert(ty.name.as_str()) {
                return Err(SchemaError::Document(format!("duplicate type {}", ty.name)));
            }
        }
        Ok(())
    }

    /// Validate and register every type in `registry`.
    ///
    /// # Errors
    ///
    /// Returns the error from [`validate`](Self::validate); nothing is
    /// registered in that case.
    pub fn install(&self, registry: &SchemaRegistry) -> Result<(), SchemaError> {
        self.validate()?;
        for ty in &self.types {
            registry.register_descriptor(ty.clone(), record_builder(ty));
        }
        tracing::debug!(types = self.types.len(), "installed schema document");
        Ok(())
    }
}
