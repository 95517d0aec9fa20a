//! # tyval-schema: Declarative Schemas & Validation
//!
//! Describes the expected shape of a JSON document as a tree of [`Schema`]
//! nodes and checks decoded [`serde_json::Value`]s against it.
//!
//! ## Schema Model (`schema`)
//!
//! Object, tagged-union, array, string, integer, literal and boolean nodes.
//! Primitive nodes carry constraint lists (`constraint`) such as
//! `MinLength<4>` or `Type<"uint32">`; each constraint is checked on its own
//! and produces its own violation.
//!
//! ## Validation (`validate`)
//!
//! - [`Validator::new`] checks the schema definition once and caches
//!   compiled patterns.
//! - [`Validator::validate`] returns a [`ValidationResult`] holding either
//!   the accepted value or every violation found, in depth-first,
//!   declaration order.
//! - [`Validator::validate_as`] additionally deserializes the accepted value
//!   into a typed model.
//!
//! ## Export (`export`) and Loading (`load`)
//!
//! Schemas serialize with serde and can be authored in JSON or YAML
//! ([`load_schema`]). [`to_json_schema`] emits the equivalent JSON Schema
//! (draft 2020-12) document.
//!
//! ## Crate Policy
//!
//! - Depends only on `tyval-core` internally.
//! - Validation never fails: every problem with the value is a
//!   [`ValidationError`]. Only an invalid schema definition is an `Err`.

pub mod compile;
pub mod constraint;
pub mod export;
pub mod load;
pub mod schema;
pub mod validate;

pub use compile::SchemaError;
pub use constraint::{ArrayConstraint, IntegerConstraint, StringConstraint};
pub use export::{to_json_schema, JSON_SCHEMA_DRAFT};
pub use load::{load_document, load_schema, parse_document, DocumentFormat, LoadError};
pub use schema::{
    ArraySchema, Field, IntegerSchema, LiteralSchema, ObjectSchema, Schema, StringSchema,
    UnionSchema, Variant,
};
pub use validate::{
    validate, ValidateOptions, ValidationError, ValidationFailure, ValidationResult, Validator,
    Violations, ViolationKind,
};
