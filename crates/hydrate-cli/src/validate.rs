//! # Validate Subcommand
//!
//! Transforms a JSON input into a document-declared type. Prints the built
//! instance as JSON on success, or the field errors as a JSON array of
//! `{"path", "reason"}` objects and exits with status 1.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hydrate_core::{FieldError, HydrateError, TransformError};
use hydrate_schema::Represent;
use hydrate_transform::{TransformConfig, Transformer};

use crate::{load_registry, read_input};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema document (YAML, or JSON with a `.json` extension).
    #[arg(long)]
    pub schema: PathBuf,

    /// Name of the target type.
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: String,

    /// Transformer configuration (YAML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON input file, or `-` for stdin.
    pub input: PathBuf,
}

/// Result of validating one input.
#[derive(Debug)]
pub struct Outcome {
    /// JSON to print.
    pub output: serde_json::Value,
    /// Process exit code.
    pub code: u8,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let config = match &args.config {
        Some(path) => TransformConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TransformConfig::default(),
    };
    let registry = load_registry(&args.schema)?;
    let transformer = Transformer::with_config(registry, config);
    let text = read_input(&args.input)?;

    let outcome = validate_text(&transformer, &args.type_name, &text)?;
    println!("{}", serde_json::to_string_pretty(&outcome.output)?);
    Ok(outcome.code)
}

/// Validate `text` against `type_name`.
///
/// Data errors, including undecodable JSON, are part of the outcome.
/// Schema errors are returned as `Err`.
pub fn validate_text(transformer: &Transformer, type_name: &str, text: &str) -> Result<Outcome> {
    let result = match hydrate_core::Value::from_json_str(text) {
        Ok(data) => transformer.transform_named(type_name, &data),
        Err(e) => {
            tracing::debug!(error = %e, "input is not valid JSON");
            Err(HydrateError::Transform(TransformError::single(
                FieldError::undecodable(transformer.config().root_label.clone()),
            )))
        }
    };

    match result {
        Ok(built) => Ok(Outcome {
            output: built.represent().to_json(),
            code: 0,
        }),
        Err(HydrateError::Transform(errors)) => {
            tracing::info!(type_name, errors = errors.len(), "input rejected");
            Ok(Outcome {
                output: serde_json::to_value(&errors)?,
                code: 1,
            })
        }
        Err(e) => Err(e).with_context(|| format!("cannot validate against type {type_name}")),
    }
}
