//! # Report Output
//!
//! Renders one validation outcome per document.
//!
//! Text form:
//!
//! ```text
//! sample 4: failure
//!  - username, expected string & MinLength<4>, found value qux
//! ```
//!
//! JSON form is one object per line:
//! `{"document":"sample 4","success":false,"errors":[...]}`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use tyval_schema::ValidationResult;

/// Report encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per document.
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    document: &'a str,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Render the outcome for the document called `label`.
pub fn render(label: &str, result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = match result {
                ValidationResult::Success(_) => format!("{label}: success"),
                ValidationResult::Failure(_) => format!("{label}: failure"),
            };
            for error in result.errors() {
                out.push_str(&format!("\n - {error}"));
            }
            Ok(out)
        }
        OutputFormat::Json => serde_json::to_string(&Report {
            document: label,
            result,
        })
        .context("failed to encode report as JSON"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tyval_schema::{Schema, Validator};

    fn validator() -> Validator {
        Validator::new(Schema::string().min_length(4).into()).unwrap()
    }

    #[test]
    fn text_success_is_one_line() {
        let result = validator().validate(json!("meyer"));
        assert_eq!(render("sample 1", &result, OutputFormat::Text).unwrap(), "sample 1: success");
    }

    #[test]
    fn text_failure_lists_errors() {
        let result = validator().validate(json!("qux"));
        assert_eq!(
            render("sample 4", &result, OutputFormat::Text).unwrap(),
            "sample 4: failure\n - (root), expected string & MinLength<4>, found value qux"
        );
    }

    #[test]
    fn json_report_is_flat() {
        let result = validator().validate(json!("qux"));
        let line = render("doc.json", &result, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["document"], "doc.json");
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["errors"][0]["kind"], "length_out_of_range");
        assert!(!line.contains('\n'));
    }
}
