//! # Loading Schemas and Documents
//!
//! Reads JSON or YAML files into [`Schema`]s and [`serde_json::Value`]s.
//! The format is chosen from the file extension: `.yaml`/`.yml` parse as
//! YAML, anything else as JSON. YAML input is converted to the equivalent
//! JSON value tree before use, so validation sees one data model.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::schema::Schema;

/// A file could not be read or parsed.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {reason}")]
    Read { path: String, reason: String },

    /// The file content is not valid JSON/YAML, or not a schema.
    #[error("cannot parse '{path}': {reason}")]
    Parse { path: String, reason: String },
}

/// Text encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse document text into a JSON value.
///
/// # Errors
///
/// Returns the parser's message if `text` is not valid in `format`.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| format!("invalid JSON: {e}")),
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| format!("invalid YAML: {e}"))?;
            yaml_to_json_value(&yaml).map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
        }
    }
}

/// Load a JSON or YAML document from `path`.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let value = parse_document(&text, DocumentFormat::from_path(path)).map_err(|reason| {
        LoadError::Parse {
            path: path.display().to_string(),
            reason,
        }
    })?;
    tracing::debug!(path = %path.display(), "loaded document");
    Ok(value)
}

/// Load a schema definition from a JSON or YAML file.
///
/// The schema is not checked here; pass it to [`crate::Validator::new`].
pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    let value = load_document(path)?;
    serde_json::from_value(value).map_err(|e| LoadError::Parse {
        path: path.display().to_string(),
        reason: format!("not a schema definition: {e}"),
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped and scalar map keys are stringified; sequences and
/// mappings as keys are rejected.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut members = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                members.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(members))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
