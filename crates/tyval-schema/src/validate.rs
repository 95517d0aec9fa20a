//! # Validation
//!
//! Checks a decoded JSON value against a compiled schema and reports every
//! violation with the path where it occurred.
//!
//! ## Semantics
//!
//! - The walk is depth-first. Object and variant fields are visited in
//!   declaration order, array elements in index order.
//! - Each failed check yields exactly one [`ValidationError`]. Sibling checks
//!   are never skipped, so one pass reports every problem.
//! - A base-type mismatch (e.g. a number where a string is expected) is one
//!   violation and stops descent into that value; its constraints are not
//!   evaluated.
//! - An array that violates `minItems`/`maxItems` is reported once at the
//!   array's path and its elements are not visited.
//! - A union whose discriminant is absent or unknown is reported once at the
//!   discriminant's path; no variant fields are checked.
//! - Undeclared object members are ignored unless
//!   [`ValidateOptions::reject_unknown_fields`] is set.
//!
//! ## Thread Safety
//!
//! `Validator` is immutable after construction and `Send + Sync`. The same
//! instance can validate any number of values concurrently.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use tyval_core::{integral, json_eq, Found, ValuePath};

use crate::compile::{compile, SchemaError};
use crate::constraint::PatternCache;
use crate::schema::{
    ArraySchema, Field, IntegerSchema, ObjectSchema, Schema, StringSchema, UnionSchema,
};

/// Category of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required member is absent.
    MissingRequiredField,
    /// The value has the wrong JSON type, is not integral, or differs from a
    /// literal.
    TypeMismatch,
    /// A string or array length is outside its bounds.
    LengthOutOfRange,
    /// An integer is outside its width or declared bounds.
    NumericOutOfRange,
    /// A string does not match its format or pattern.
    FormatMismatch,
    /// A union discriminant is absent or selects no variant.
    DiscriminantMismatch,
    /// An undeclared member in strict mode.
    UnexpectedProperty,
}

/// One violation found during validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Where the violating value sits in the document.
    pub path: ValuePath,
    /// Which check failed.
    pub kind: ViolationKind,
    /// Type expression the value was expected to satisfy.
    pub expected: String,
    /// The offending value; `None` when the member was absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, expected {}, found value {}",
            self.path,
            self.expected,
            Found(self.value.as_ref())
        )
    }
}

/// Ordered, non-empty collection of violations from one validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<ValidationError>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations in discovery order.
    pub fn violations(&self) -> &[ValidationError] {
        &self.violations
    }

    /// Iterates over violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.violations.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.violations
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, " - {v}")?;
        }
        Ok(())
    }
}

/// Outcome of validating one value.
///
/// Serializes as `{"success": true, "data": ...}` or
/// `{"success": false, "errors": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The value satisfied the schema and is returned unchanged.
    Success(Value),
    /// At least one violation was found.
    Failure(Violations),
}

impl ValidationResult {
    /// Returns true if no violation was found.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The accepted value, if validation succeeded.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Violations in discovery order; empty on success.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(violations) => violations.violations(),
        }
    }

    /// Convert into a `Result`, carrying the violations as the error.
    pub fn into_result(self) -> Result<Value, ValidationFailure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(violations) => Err(ValidationFailure::Rejected { violations }),
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(errors) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

/// A value was not accepted, or could not be turned into the target type.
#[derive(Error, Debug)]
pub enum ValidationFailure {
    /// The value violated the schema.
    #[error("value rejected by schema:\n{violations}")]
    Rejected { violations: Violations },

    /// The value satisfied the schema but does not deserialize into the
    /// requested Rust type.
    #[error("accepted value does not deserialize into the target type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Validation behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Report undeclared object members as [`ViolationKind::UnexpectedProperty`].
    #[serde(default)]
    pub reject_unknown_fields: bool,
}

impl ValidateOptions {
    /// Options that reject undeclared members.
    pub fn strict() -> Self {
        Self {
            reject_unknown_fields: true,
        }
    }
}

/// A schema checked and compiled for repeated validation.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    options: ValidateOptions,
    patterns: PatternCache,
}

impl Validator {
    /// Compile `schema` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the schema definition is inconsistent
    /// (duplicate fields or tags, inverted bounds, invalid pattern).
    pub fn new(schema: Schema) -> Result<Self, SchemaError> {
        Self::with_options(schema, ValidateOptions::default())
    }

    /// Compile `schema` with explicit options.
    pub fn with_options(schema: Schema, options: ValidateOptions) -> Result<Self, SchemaError> {
        let patterns = compile(&schema)?;
        tracing::debug!(
            schema = %schema,
            patterns = patterns.len(),
            strict = options.reject_unknown_fields,
            "compiled schema"
        );
        Ok(Self {
            schema,
            options,
            patterns,
        })
    }

    /// The compiled schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Options fixed at construction.
    pub fn options(&self) -> ValidateOptions {
        self.options
    }

    /// Every violation of `value`, in discovery order.
    pub fn errors(&self, value: &Value) -> Vec<ValidationError> {
        let mut walk = Walk {
            patterns: &self.patterns,
            strict: self.options.reject_unknown_fields,
            errors: Vec::new(),
        };
        walk.visit(&self.schema, value, &mut ValuePath::root());
        walk.errors
    }

    /// Validate `value`, returning it unchanged on success.
    pub fn validate(&self, value: Value) -> ValidationResult {
        let errors = self.errors(&value);
        tracing::debug!(violations = errors.len(), "validated value");
        if errors.is_empty() {
            ValidationResult::Success(value)
        } else {
            ValidationResult::Failure(Violations { violations: errors })
        }
    }

    /// Returns true if `value` has no violations.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.errors(value).is_empty()
    }

    /// Validate without taking ownership.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure::Rejected`] listing every violation.
    pub fn assert(&self, value: &Value) -> Result<(), ValidationFailure> {
        let errors = self.errors(value);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::Rejected {
                violations: Violations { violations: errors },
            })
        }
    }

    /// Validate `value`, then deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure::Rejected`] if the value violates the
    /// schema, or [`ValidationFailure::Deserialize`] if `T` cannot represent
    /// the accepted value.
    pub fn validate_as<T: DeserializeOwned>(&self, value: Value) -> Result<T, ValidationFailure> {
        let data = self.validate(value).into_result()?;
        Ok(serde_json::from_value(data)?)
    }
}

/// Compile `schema` and validate `value` against it in one call.
///
/// Prefer [`Validator`] when validating more than one value.
pub fn validate(schema: &Schema, value: Value) -> Result<ValidationResult, SchemaError> {
    Ok(Validator::new(schema.clone())?.validate(value))
}

/// State of one validation pass.
struct Walk<'a> {
    patterns: &'a PatternCache,
    strict: bool,
    errors: Vec<ValidationError>,
}

impl Walk<'_> {
    fn report(
        &mut self,
        path: &ValuePath,
        kind: ViolationKind,
        expected: String,
        value: Option<&Value>,
    ) {
        self.errors.push(ValidationError {
            path: path.clone(),
            kind,
            expected,
            value: value.cloned(),
        });
    }

    fn visit(&mut self, schema: &Schema, value: &Value, path: &mut ValuePath) {
        match schema {
            Schema::Object(object) => self.visit_object(object, value, path),
            Schema::Union(union) => self.visit_union(union, value, path),
            Schema::Array(array) => self.visit_array(array, value, path),
            Schema::String(string) => self.visit_string(string, value, path),
            Schema::Integer(integer) => self.visit_integer(integer, value, path),
            Schema::Literal(literal) => {
                if !json_eq(value, &literal.value) {
                    self.report(
                        path,
                        ViolationKind::TypeMismatch,
                        literal.value.to_string(),
                        Some(value),
                    );
                }
            }
            Schema::Boolean => {
                if !value.is_boolean() {
                    self.report(
                        path,
                        ViolationKind::TypeMismatch,
                        "boolean".to_string(),
                        Some(value),
                    );
                }
            }
        }
    }

    fn visit_object(&mut self, object: &ObjectSchema, value: &Value, path: &mut ValuePath) {
        let Some(members) = value.as_object() else {
            return self.report(path, ViolationKind::TypeMismatch, object.describe(), Some(value));
        };
        self.visit_fields(&object.fields, members, path);
        if self.strict {
            self.reject_unknown(members, path, |key| object.field(key).is_some());
        }
    }

    fn visit_union(&mut self, union: &UnionSchema, value: &Value, path: &mut ValuePath) {
        let Some(members) = value.as_object() else {
            return self.report(path, ViolationKind::TypeMismatch, union.describe(), Some(value));
        };

        let tag = members.get(&union.discriminant);
        let Some(variant) = tag.and_then(|t| union.variant_for(t)) else {
            path.push_key(&union.discriminant);
            self.report(
                path,
                ViolationKind::DiscriminantMismatch,
                union.tag_expression(),
                tag,
            );
            path.pop();
            return;
        };

        self.visit_fields(&variant.fields, members, path);
        self.visit_fields(&union.shared, members, path);
        if self.strict {
            self.reject_unknown(members, path, |key| {
                key == union.discriminant
                    || variant.field(key).is_some()
                    || union.shared_field(key).is_some()
            });
        }
    }

    fn visit_fields(&mut self, fields: &[Field], members: &Map<String, Value>, path: &mut ValuePath) {
        for field in fields {
            match members.get(&field.name) {
                Some(member) => {
                    path.push_key(&field.name);
                    self.visit(&field.schema, member, path);
                    path.pop();
                }
                None if field.required => {
                    path.push_key(&field.name);
                    self.report(
                        path,
                        ViolationKind::MissingRequiredField,
                        "required property".to_string(),
                        None,
                    );
                    path.pop();
                }
                None => {}
            }
        }
    }

    fn reject_unknown(
        &mut self,
        members: &Map<String, Value>,
        path: &mut ValuePath,
        is_declared: impl Fn(&str) -> bool,
    ) {
        for (key, member) in members {
            if !is_declared(key) {
                path.push_key(key);
                self.report(
                    path,
                    ViolationKind::UnexpectedProperty,
                    "undefined".to_string(),
                    Some(member),
                );
                path.pop();
            }
        }
    }

    fn visit_array(&mut self, array: &ArraySchema, value: &Value, path: &mut ValuePath) {
        let Some(items) = value.as_array() else {
            return self.report(path, ViolationKind::TypeMismatch, array.describe(), Some(value));
        };

        if let Some(violated) = array.constraints().into_iter().find(|c| !c.admits(items.len())) {
            return self.report(
                path,
                ViolationKind::LengthOutOfRange,
                format!("{} & {violated}", array.base()),
                Some(value),
            );
        }

        for (index, item) in items.iter().enumerate() {
            path.push_index(index);
            self.visit(&array.items, item, path);
            path.pop();
        }
    }

    fn visit_string(&mut self, string: &StringSchema, value: &Value, path: &mut ValuePath) {
        let Some(s) = value.as_str() else {
            return self.report(path, ViolationKind::TypeMismatch, string.describe(), Some(value));
        };
        for constraint in string.constraints() {
            if !constraint.admits(s, self.patterns) {
                self.report(
                    path,
                    constraint.violation_kind(),
                    format!("string & {constraint}"),
                    Some(value),
                );
            }
        }
    }

    fn visit_integer(&mut self, integer: &IntegerSchema, value: &Value, path: &mut ValuePath) {
        let Some(n) = value.as_number().and_then(integral) else {
            return self.report(path, ViolationKind::TypeMismatch, integer.describe(), Some(value));
        };
        for constraint in integer.constraints() {
            if !constraint.admits(n) {
                self.report(
                    path,
                    ViolationKind::NumericOutOfRange,
                    format!("integer & {constraint}"),
                    Some(value),
                );
            }
        }
    }
}
