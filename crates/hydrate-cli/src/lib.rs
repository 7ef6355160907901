//! # hydrate-cli — Command-Line Interface
//!
//! Provides the `hydrate` binary for working with types declared in schema
//! documents:
//!
//! ```bash
//! hydrate validate --schema blog.yaml --type Post post.json
//! cat post.json | hydrate validate --schema blog.yaml --type Post -
//! hydrate describe --schema blog.yaml --type Post
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: success.
//! - `1`: the input failed validation; the field errors are printed.
//! - `2`: the schema, configuration, or input file could not be used.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers return the exit code.
//! - Handlers delegate to the library crates. Output is JSON on stdout,
//!   logs go to stderr.

pub mod describe;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use hydrate_schema::{SchemaDocument, SchemaRegistry};

/// Load a schema document and install its types into a fresh registry.
pub fn load_registry(schema: &Path) -> Result<Arc<SchemaRegistry>> {
    let document = SchemaDocument::from_path(schema)
        .with_context(|| format!("loading schema document {}", schema.display()))?;
    let registry = SchemaRegistry::new();
    document
        .install(&registry)
        .with_context(|| format!("installing schema document {}", schema.display()))?;
    tracing::debug!(
        schema = %schema.display(),
        types = registry.len(),
        "schema document loaded"
    );
    Ok(Arc::new(registry))
}

/// Read input text from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("reading input from stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("reading input {}", path.display()))
}
