//! # Validate Subcommand
//!
//! Validates one or more JSON/YAML documents against a schema file and
//! prints one report per document.
//!
//! Returns exit code 0 if every document is accepted and 1 if any is
//! rejected. A document or schema that cannot be read aborts the run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tyval_schema::{load_document, load_schema, ValidateOptions, Validator};

use crate::output::{render, OutputFormat};

/// Arguments for the `tyval validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema definition (JSON or YAML).
    #[arg(long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Reject members the schema does not declare.
    #[arg(long)]
    pub strict: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Documents to validate.
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let schema_path = &args.schema;
    let schema = load_schema(schema_path).context("failed to load schema")?;
    let options = ValidateOptions {
        reject_unknown_fields: args.strict,
    };
    let validator = Validator::with_options(schema, options)
        .with_context(|| format!("invalid schema '{}'", schema_path.display()))?;

    tracing::info!(
        schema = %schema_path.display(),
        documents = args.documents.len(),
        strict = args.strict,
        "validating documents"
    );

    let mut rejected = 0usize;
    for path in &args.documents {
        let document = load_document(path).context("failed to load document")?;
        let result = validator.validate(document);
        if !result.is_success() {
            rejected += 1;
        }
        println!("{}", render(&path.display().to_string(), &result, args.format)?);
    }

    if rejected > 0 {
        tracing::info!(rejected, total = args.documents.len(), "documents rejected");
        Ok(1)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SCHEMA: &str = "kind: object\nfields:\n  - name: id\n    schema:\n      kind: integer\n      minimum: 1\n";

    fn args(dir: &std::path::Path, docs: &[&str], strict: bool) -> ValidateArgs {
        let schema = dir.join("schema.yaml");
        fs::write(&schema, SCHEMA).unwrap();
        let documents = docs
            .iter()
            .enumerate()
            .map(|(i, body)| {
                let path = dir.join(format!("doc-{i}.json"));
                fs::write(&path, body).unwrap();
                path
            })
            .collect();
        ValidateArgs {
            schema,
            strict,
            format: OutputFormat::Text,
            documents,
        }
    }

    #[test]
    fn all_valid_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), &[r#"{"id": 1}"#, r#"{"id": 7, "extra": true}"#], false);
        assert_eq!(run_validate(&args).unwrap(), 0);
    }

    #[test]
    fn any_invalid_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), &[r#"{"id": 1}"#, r#"{"id": 0}"#], false);
        assert_eq!(run_validate(&args).unwrap(), 1);
    }

    #[test]
    fn strict_rejects_extra_members() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), &[r#"{"id": 7, "extra": true}"#], true);
        assert_eq!(run_validate(&args).unwrap(), 1);
    }

    #[test]
    fn unreadable_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), &[], false);
        args.documents.push(dir.path().join("missing.json"));
        assert!(run_validate(&args).is_err());
    }

    #[test]
    fn errors_name_the_path_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), &[], false);
        args.documents.push(PathBuf::from("no-such-dir/missing.json"));
        let err = run_validate(&args).unwrap_err();
        assert!(format!("{err:#}").contains("'no-such-dir/missing.json'"), "{err:#}");
    }

    #[test]
    fn inconsistent_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), &[r#"{"id": 1}"#], false);
        fs::write(&args.schema, "kind: string\nminLength: 5\nmaxLength: 2\n").unwrap();
        let err = run_validate(&args).unwrap_err();
        assert!(format!("{err:#}").contains("invalid schema"));
    }
}
