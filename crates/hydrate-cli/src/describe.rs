//! # Describe Subcommand
//!
//! Prints validated type descriptors as a JSON object keyed by type name.
//! A type whose shape cannot be transformed into (for example a union field)
//! fails here just as it would during validation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hydrate_schema::SchemaRegistry;

use crate::load_registry;

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Schema document (YAML, or JSON with a `.json` extension).
    #[arg(long)]
    pub schema: PathBuf,

    /// Describe only this type.
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: Option<String>,
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs) -> Result<u8> {
    let registry = load_registry(&args.schema)?;
    let described = describe_types(&registry, args.type_name.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&described)?);
    Ok(0)
}

/// Descriptors for `only`, or for every registered type in name order.
pub fn describe_types(registry: &SchemaRegistry, only: Option<&str>) -> Result<serde_json::Value> {
    let names = match only {
        Some(name) => vec![name.to_string()],
        None => registry.names(),
    };
    let mut described = serde_json::Map::new();
    for name in names {
        let descriptor = registry
            .describe(&name)
            .with_context(|| format!("describing type {name}"))?;
        described.insert(name, serde_json::to_value(descriptor.as_ref())?);
    }
    Ok(serde_json::Value::Object(described))
}
