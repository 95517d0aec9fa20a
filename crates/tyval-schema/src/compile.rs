//! # Schema Compilation
//!
//! Checks a schema definition before it is used for validation and compiles
//! its `pattern` constraints. Runs once per [`crate::Validator`]; after it
//! succeeds, validating a value cannot fail.
//!
//! Problems are reported with a schema location such as
//! `$.pets[*]<"cat">.numberOfLivesLeft`: `[*]` steps into array items and
//! `<tag>` into a union variant.

use std::collections::HashSet;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use tyval_core::json_eq;

use crate::constraint::PatternCache;
use crate::schema::{Field, Schema, UnionSchema};

/// The schema definition itself is inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two fields with the same name apply to the same object.
    #[error("{location}: field '{field}' is declared more than once")]
    DuplicateField { location: String, field: String },

    /// A union without variants can never accept a value.
    #[error("{location}: union on '{discriminant}' has no variants")]
    EmptyUnion {
        location: String,
        discriminant: String,
    },

    /// Two variants share a discriminant value.
    #[error("{location}: discriminant value {tag} selects more than one variant")]
    DuplicateTag { location: String, tag: String },

    /// Discriminant values must be JSON scalars.
    #[error("{location}: discriminant value {tag} must be a string, number, or boolean")]
    InvalidTag { location: String, tag: String },

    /// A lower bound exceeds its upper bound.
    #[error("{location}: {lower} ({min}) exceeds {upper} ({max})")]
    InvalidBounds {
        location: String,
        lower: &'static str,
        upper: &'static str,
        min: i128,
        max: i128,
    },

    /// A `pattern` is not a valid regular expression.
    #[error("{location}: invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        location: String,
        pattern: String,
        reason: String,
    },
}

/// Check `schema` and compile its patterns.
pub(crate) fn compile(schema: &Schema) -> Result<PatternCache, SchemaError> {
    let mut patterns = PatternCache::new();
    check(schema, "$", &mut patterns)?;
    Ok(patterns)
}

fn check(schema: &Schema, location: &str, patterns: &mut PatternCache) -> Result<(), SchemaError> {
    match schema {
        Schema::Object(object) => check_fields(&[object.fields.as_slice()], location, patterns),
        Schema::Union(union) => check_union(union, location, patterns),
        Schema::Array(array) => {
            check_bounds(
                location,
                "minItems",
                widen(array.min_items),
                "maxItems",
                widen(array.max_items),
            )?;
            check(&array.items, &format!("{location}[*]"), patterns)
        }
        Schema::String(string) => {
            check_bounds(
                location,
                "minLength",
                widen(string.min_length),
                "maxLength",
                widen(string.max_length),
            )?;
            if let Some(source) = &string.pattern {
                if !patterns.contains_key(source) {
                    let re = Regex::new(source).map_err(|e| SchemaError::InvalidPattern {
                        location: location.to_string(),
                        pattern: source.clone(),
                        reason: e.to_string(),
                    })?;
                    patterns.insert(source.clone(), re);
                }
            }
            Ok(())
        }
        Schema::Integer(integer) => check_bounds(
            location,
            "minimum",
            integer.minimum.map(i128::from),
            "maximum",
            integer.maximum.map(i128::from),
        ),
        Schema::Literal(_) | Schema::Boolean => Ok(()),
    }
}

fn check_union(
    union: &UnionSchema,
    location: &str,
    patterns: &mut PatternCache,
) -> Result<(), SchemaError> {
    if union.variants.is_empty() {
        return Err(SchemaError::EmptyUnion {
            location: location.to_string(),
            discriminant: union.discriminant.clone(),
        });
    }

    let mut seen: Vec<&Value> = Vec::new();
    for variant in &union.variants {
        if !matches!(variant.tag, Value::String(_) | Value::Number(_) | Value::Bool(_)) {
            return Err(SchemaError::InvalidTag {
                location: location.to_string(),
                tag: variant.tag.to_string(),
            });
        }
        if seen.iter().any(|tag| json_eq(tag, &variant.tag)) {
            return Err(SchemaError::DuplicateTag {
                location: location.to_string(),
                tag: variant.tag.to_string(),
            });
        }
        seen.push(&variant.tag);

        let variant_location = format!("{location}<{}>", variant.tag);
        if variant.field(&union.discriminant).is_some() {
            return Err(SchemaError::DuplicateField {
                location: variant_location,
                field: union.discriminant.clone(),
            });
        }
        check_fields(
            &[variant.fields.as_slice(), union.shared.as_slice()],
            &variant_location,
            patterns,
        )?;
    }

    if union.shared_field(&union.discriminant).is_some() {
        return Err(SchemaError::DuplicateField {
            location: location.to_string(),
            field: union.discriminant.clone(),
        });
    }
    Ok(())
}

/// Check every field of the given groups as one namespace.
fn check_fields(
    groups: &[&[Field]],
    location: &str,
    patterns: &mut PatternCache,
) -> Result<(), SchemaError> {
    let mut names = HashSet::new();
    for field in groups.iter().flat_map(|g| g.iter()) {
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                location: location.to_string(),
                field: field.name.clone(),
            });
        }
        check(&field.schema, &format!("{location}.{}", field.name), patterns)?;
    }
    Ok(())
}

fn widen(n: Option<usize>) -> Option<i128> {
    n.and_then(|n| i128::try_from(n).ok())
}

fn check_bounds(
    location: &str,
    lower: &'static str,
    min: Option<i128>,
    upper: &'static str,
    max: Option<i128>,
) -> Result<(), SchemaError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(SchemaError::InvalidBounds {
            location: location.to_string(),
            lower,
            upper,
            min,
            max,
        }),
        _ => Ok(()),
    }
}
