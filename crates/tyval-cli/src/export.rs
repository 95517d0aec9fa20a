//! # Export Subcommand
//!
//! Prints a schema either as a JSON Schema (draft 2020-12) document or in
//! tyval's own JSON/YAML schema format. Without `--schema` the built-in
//! user schema is exported.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tyval_schema::{load_schema, to_json_schema, Schema, ValidateOptions, Validator};

use crate::demo::user_schema;

/// Export encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON Schema draft 2020-12.
    #[default]
    JsonSchema,
    /// tyval schema definition as JSON.
    Json,
    /// tyval schema definition as YAML.
    Yaml,
}

/// Arguments for the `tyval export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Schema definition to export (defaults to the built-in user schema).
    #[arg(long, value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Output encoding.
    #[arg(long = "as", value_enum, default_value_t = ExportFormat::JsonSchema)]
    pub format: ExportFormat,

    /// Close every object to undeclared members (JSON Schema only).
    #[arg(long)]
    pub strict: bool,
}

/// Render `schema` in `format`. The schema is compiled first so that an
/// inconsistent definition is never exported.
pub fn export_schema(schema: Schema, format: ExportFormat, strict: bool) -> Result<String> {
    let options = ValidateOptions {
        reject_unknown_fields: strict,
    };
    let validator = Validator::with_options(schema, options).context("invalid schema")?;
    let schema = validator.schema();

    match format {
        ExportFormat::JsonSchema => serde_json::to_string_pretty(&to_json_schema(schema, &options))
            .context("failed to encode JSON Schema"),
        ExportFormat::Json => {
            serde_json::to_string_pretty(schema).context("failed to encode schema as JSON")
        }
        ExportFormat::Yaml => serde_yaml::to_string(schema).context("failed to encode schema as YAML"),
    }
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs) -> Result<u8> {
    let schema = match &args.schema {
        Some(path) => load_schema(path).context("failed to load schema")?,
        None => user_schema(),
    };

    let out = export_schema(schema, args.format, args.strict)?;
    println!("{}", out.trim_end());
    Ok(0)
}
