//! # JSON Schema Export
//!
//! Emits a JSON Schema (draft 2020-12) document equivalent to a [`Schema`],
//! for consumers that validate with a generic JSON Schema engine.
//!
//! ## Mapping
//!
//! | tyval            | JSON Schema                                              |
//! |------------------|----------------------------------------------------------|
//! | `object`         | `type: object`, `properties`, `required`                  |
//! | `union`          | `oneOf` of objects, discriminant as `const` and required  |
//! | `array`          | `type: array`, `items`, `minItems`, `maxItems`            |
//! | `string`         | `type: string`, `minLength`, `maxLength`, `format`, `pattern` |
//! | `integer`        | `type: integer`, width folded into `minimum`/`maximum`    |
//! | `literal`        | `const`                                                  |
//! | `boolean`        | `type: boolean`                                          |
//!
//! Strict mode adds `additionalProperties: false` to every object.
//!
//! JSON Schema engines count string length in code points and treat
//! `format` as an annotation unless format assertion is enabled, so a
//! document can pass the exported schema while failing a `format` check
//! here.

use serde_json::{json, Map, Value};

use tyval_core::StringFormat;

use crate::schema::{Field, IntegerSchema, Schema, StringSchema};
use crate::validate::ValidateOptions;

/// `$schema` URI written at the root of exported documents.
pub const JSON_SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Render `schema` as a JSON Schema document.
pub fn to_json_schema(schema: &Schema, options: &ValidateOptions) -> Value {
    let mut root = node(schema, options);
    if let Value::Object(members) = &mut root {
        members.insert("$schema".to_string(), Value::from(JSON_SCHEMA_DRAFT));
    }
    root
}

fn node(schema: &Schema, options: &ValidateOptions) -> Value {
    match schema {
        Schema::Object(object) => {
            let mut out = object_node(&[object.fields.as_slice()], None, options);
            if let Some(name) = &object.name {
                out.insert("title".to_string(), Value::from(name.as_str()));
            }
            Value::Object(out)
        }
        Schema::Union(union) => {
            let variants: Vec<Value> = union
                .variants
                .iter()
                .map(|variant| {
                    let mut out = object_node(
                        &[variant.fields.as_slice(), union.shared.as_slice()],
                        Some((&union.discriminant, &variant.tag)),
                        options,
                    );
                    if let Some(name) = &variant.name {
                        out.insert("title".to_string(), Value::from(name.as_str()));
                    }
                    Value::Object(out)
                })
                .collect();
            let mut out = Map::new();
            if let Some(name) = &union.name {
                out.insert("title".to_string(), Value::from(name.as_str()));
            }
            out.insert("oneOf".to_string(), Value::Array(variants));
            Value::Object(out)
        }
        Schema::Array(array) => {
            let mut out = Map::new();
            out.insert("type".to_string(), json!("array"));
            out.insert("items".to_string(), node(&array.items, options));
            if let Some(n) = array.min_items {
                out.insert("minItems".to_string(), Value::from(n));
            }
            if let Some(n) = array.max_items {
                out.insert("maxItems".to_string(), Value::from(n));
            }
            Value::Object(out)
        }
        Schema::String(string) => string_node(string),
        Schema::Integer(integer) => integer_node(integer),
        Schema::Literal(literal) => json!({ "const": literal.value }),
        Schema::Boolean => json!({ "type": "boolean" }),
    }
}

/// Object node over one or more field groups, optionally pinning a
/// discriminant member to its tag.
fn object_node(
    groups: &[&[Field]],
    discriminant: Option<(&String, &Value)>,
    options: &ValidateOptions,
) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    if let Some((name, tag)) = discriminant {
        properties.insert(name.clone(), json!({ "const": tag }));
        required.push(Value::from(name.as_str()));
    }
    for field in groups.iter().flat_map(|g| g.iter()) {
        properties.insert(field.name.clone(), node(&field.schema, options));
        if field.required {
            required.push(Value::from(field.name.as_str()));
        }
    }

    let mut out = Map::new();
    out.insert("type".to_string(), json!("object"));
    out.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".to_string(), Value::Array(required));
    }
    if options.reject_unknown_fields {
        out.insert("additionalProperties".to_string(), Value::Bool(false));
    }
    out
}

fn string_node(string: &StringSchema) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), json!("string"));
    if let Some(n) = string.min_length {
        out.insert("minLength".to_string(), Value::from(n));
    }
    if let Some(n) = string.max_length {
        out.insert("maxLength".to_string(), Value::from(n));
    }
    if let Some(format) = string.format {
        out.insert("format".to_string(), Value::from(json_schema_format(format)));
    }
    if let Some(pattern) = &string.pattern {
        out.insert("pattern".to_string(), Value::from(pattern.as_str()));
    }
    Value::Object(out)
}

fn json_schema_format(format: StringFormat) -> &'static str {
    match format {
        StringFormat::Url => "uri",
        other => other.as_str(),
    }
}

fn integer_node(integer: &IntegerSchema) -> Value {
    let width_min = integer.width.map(|w| w.min());
    let width_max = integer.width.map(|w| w.max());
    let minimum = tighter(width_min, integer.minimum.map(i128::from), i128::max);
    let maximum = tighter(width_max, integer.maximum.map(i128::from), i128::min);

    let mut out = Map::new();
    out.insert("type".to_string(), json!("integer"));
    if let Some(n) = minimum {
        out.insert("minimum".to_string(), int_value(n));
    }
    if let Some(n) = maximum {
        out.insert("maximum".to_string(), int_value(n));
    }
    Value::Object(out)
}

fn tighter(a: Option<i128>, b: Option<i128>, pick: fn(i128, i128) -> i128) -> Option<i128> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, b) => a.or(b),
    }
}

/// Bounds originate from `i64` or a width's `u64` range.
fn int_value(n: i128) -> Value {
    if let Ok(i) = i64::try_from(n) {
        Value::from(i)
    } else if let Ok(u) = u64::try_from(n) {
        Value::from(u)
    } else {
        Value::from(n as f64)
    }
}
