//! # Schema Model
//!
//! A schema is a tree of nodes, each describing one level of the expected
//! document. Nodes serialize internally tagged by `kind` with camelCase
//! keys, so a schema file reads:
//!
//! ```yaml
//! kind: object
//! name: User
//! fields:
//!   - name: username
//!     schema: { kind: string, minLength: 4, maxLength: 16 }
//! ```
//!
//! The same tree can be built in Rust:
//!
//! ```
//! use tyval_schema::Schema;
//!
//! let user = Schema::object()
//!     .named("User")
//!     .required("username", Schema::string().min_length(4).max_length(16));
//! assert_eq!(Schema::from(user).describe(), "User");
//! ```
//!
//! ## Field Order
//!
//! Fields are a list, not a map. Validation visits them in declaration
//! order, which fixes the order of reported violations.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tyval_core::{json_eq, IntegerWidth, StringFormat};

use crate::constraint::{ArrayConstraint, IntegerConstraint, StringConstraint};

/// One node of a schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schema {
    /// A JSON object with declared fields. Undeclared members are allowed
    /// unless validation runs in strict mode.
    Object(ObjectSchema),
    /// A JSON object whose discriminant member selects a variant.
    Union(UnionSchema),
    /// A JSON array of homogeneous elements.
    Array(ArraySchema),
    /// A JSON string with optional constraints.
    String(StringSchema),
    /// A JSON number with an integral value.
    Integer(IntegerSchema),
    /// Exactly one JSON value.
    Literal(LiteralSchema),
    /// A JSON boolean.
    Boolean,
}

impl Schema {
    pub fn object() -> ObjectSchema {
        ObjectSchema::default()
    }

    /// Tagged union keyed on the member `discriminant`.
    pub fn union(discriminant: impl Into<String>) -> UnionSchema {
        UnionSchema {
            name: None,
            discriminant: discriminant.into(),
            variants: Vec::new(),
            shared: Vec::new(),
        }
    }

    pub fn array(items: impl Into<Schema>) -> ArraySchema {
        ArraySchema {
            items: Box::new(items.into()),
            min_items: None,
            max_items: None,
        }
    }

    pub fn string() -> StringSchema {
        StringSchema::default()
    }

    pub fn integer() -> IntegerSchema {
        IntegerSchema::default()
    }

    pub fn literal(value: impl Into<Value>) -> Schema {
        Schema::Literal(LiteralSchema {
            value: value.into(),
        })
    }

    pub fn boolean() -> Schema {
        Schema::Boolean
    }

    /// Type expression for this node, e.g. `string & MinLength<4>` or
    /// `Array<Pet> & MinItems<1>`. Named objects and unions render as their
    /// name.
    pub fn describe(&self) -> String {
        match self {
            Schema::Object(object) => object.describe(),
            Schema::Union(union) => union.describe(),
            Schema::Array(array) => array.describe(),
            Schema::String(string) => string.describe(),
            Schema::Integer(integer) => integer.describe(),
            Schema::Literal(literal) => literal.value.to_string(),
            Schema::Boolean => "boolean".to_string(),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Join a base type with its constraints: `string & MinLength<4>`.
fn intersect<C: fmt::Display>(base: &str, constraints: &[C]) -> String {
    let mut out = base.to_string();
    for c in constraints {
        out.push_str(" & ");
        out.push_str(&c.to_string());
    }
    out
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

fn default_required() -> bool {
    true
}

/// A declared member of an object or union variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    #[serde(default = "default_required")]
    pub required: bool,
}

impl Field {
    pub fn required(name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            required: false,
        }
    }
}

fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find(|f| f.name == name)
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Display name used in type expressions (e.g. `User`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ObjectSchema {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn required(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push(Field::required(name, schema));
        self
    }

    pub fn optional(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push(Field::optional(name, schema));
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        find_field(&self.fields, name)
    }

    pub fn describe(&self) -> String {
        self.name.clone().unwrap_or_else(|| "object".to_string())
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// One alternative of a [`UnionSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Literal the discriminant member must equal to select this variant.
    pub tag: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Variant-specific members, excluding the discriminant itself.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Variant {
    pub fn new(tag: impl Into<Value>) -> Self {
        Self {
            tag: tag.into(),
            name: None,
            fields: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn required(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push(Field::required(name, schema));
        self
    }

    pub fn optional(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.push(Field::optional(name, schema));
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        find_field(&self.fields, name)
    }
}

/// Discriminated union: `(Cat | Dog | Bird) & { name: string }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Member whose value selects the variant.
    pub discriminant: String,
    pub variants: Vec<Variant>,
    /// Members common to every variant.
    #[serde(default)]
    pub shared: Vec<Field>,
}

impl UnionSchema {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn shared_required(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.shared.push(Field::required(name, schema));
        self
    }

    pub fn shared_optional(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.shared.push(Field::optional(name, schema));
        self
    }

    /// The variant whose tag equals `tag`, if any. Numeric tags match by
    /// value, so `1.0` selects the variant tagged `1`.
    pub fn variant_for(&self, tag: &Value) -> Option<&Variant> {
        self.variants.iter().find(|v| json_eq(&v.tag, tag))
    }

    pub fn shared_field(&self, name: &str) -> Option<&Field> {
        find_field(&self.shared, name)
    }

    /// Allowed discriminant values in declaration order: `("cat" | "dog")`.
    pub fn tag_expression(&self) -> String {
        let tags: Vec<String> = self.variants.iter().map(|v| v.tag.to_string()).collect();
        format!("({})", tags.join(" | "))
    }

    pub fn describe(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.tag_expression())
    }
}

impl From<UnionSchema> for Schema {
    fn from(union: UnionSchema) -> Self {
        Schema::Union(union)
    }
}

// ---------------------------------------------------------------------------
// Array
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArraySchema {
    pub items: Box<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl ArraySchema {
    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    pub fn constraints(&self) -> Vec<ArrayConstraint> {
        let mut out = Vec::new();
        out.extend(self.min_items.map(ArrayConstraint::MinItems));
        out.extend(self.max_items.map(ArrayConstraint::MaxItems));
        out
    }

    /// `Array<T>` without the length constraints.
    pub fn base(&self) -> String {
        format!("Array<{}>", self.items.describe())
    }

    pub fn describe(&self) -> String {
        intersect(&self.base(), &self.constraints())
    }
}

impl From<ArraySchema> for Schema {
    fn from(array: ArraySchema) -> Self {
        Schema::Array(array)
    }
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
    /// Regular expression the string must contain a match for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl StringSchema {
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn constraints(&self) -> Vec<StringConstraint> {
        let mut out = Vec::new();
        out.extend(self.min_length.map(StringConstraint::MinLength));
        out.extend(self.max_length.map(StringConstraint::MaxLength));
        out.extend(self.format.map(StringConstraint::Format));
        out.extend(self.pattern.clone().map(StringConstraint::Pattern));
        out
    }

    pub fn describe(&self) -> String {
        intersect("string", &self.constraints())
    }
}

impl From<StringSchema> for Schema {
    fn from(string: StringSchema) -> Self {
        Schema::String(string)
    }
}

// ---------------------------------------------------------------------------
// Integer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegerSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<IntegerWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

impl IntegerSchema {
    pub fn width(mut self, width: IntegerWidth) -> Self {
        self.width = Some(width);
        self
    }

    pub fn minimum(mut self, n: i64) -> Self {
        self.minimum = Some(n);
        self
    }

    pub fn maximum(mut self, n: i64) -> Self {
        self.maximum = Some(n);
        self
    }

    pub fn constraints(&self) -> Vec<IntegerConstraint> {
        let mut out = Vec::new();
        out.extend(self.width.map(IntegerConstraint::Width));
        out.extend(self.minimum.map(IntegerConstraint::Minimum));
        out.extend(self.maximum.map(IntegerConstraint::Maximum));
        out
    }

    pub fn describe(&self) -> String {
        intersect("integer", &self.constraints())
    }
}

impl From<IntegerSchema> for Schema {
    fn from(integer: IntegerSchema) -> Self {
        Schema::Integer(integer)
    }
}

// ---------------------------------------------------------------------------
// Literal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralSchema {
    pub value: Value,
}

impl From<LiteralSchema> for Schema {
    fn from(literal: LiteralSchema) -> Self {
        Schema::Literal(literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pet() -> UnionSchema {
        Schema::union("animalType")
            .named("Pet")
            .variant(
                Variant::new("cat").named("Cat").required(
                    "numberOfLivesLeft",
                    Schema::integer().width(IntegerWidth::Uint32).maximum(9),
                ),
            )
            .variant(Variant::new("dog").optional("favouriteDogFoodBrand", Schema::string()))
            .variant(Variant::new("bird"))
            .shared_required("name", Schema::string())
    }

    #[test]
    fn describe_string_constraints_in_order() {
        let s = Schema::string()
            .min_length(4)
            .max_length(16)
            .format(StringFormat::Date);
        assert_eq!(
            s.describe(),
            r#"string & MinLength<4> & MaxLength<16> & Format<"date">"#
        );
    }

    #[test]
    fn describe_integer_with_width() {
        let i = Schema::integer().width(IntegerWidth::Uint32).maximum(9);
        assert_eq!(i.describe(), r#"integer & Type<"uint32"> & Maximum<9>"#);
        assert_eq!(Schema::integer().describe(), "integer");
    }

    #[test]
    fn describe_array_uses_item_name() {
        let a = Schema::array(pet()).min_items(1);
        assert_eq!(a.describe(), "Array<Pet> & MinItems<1>");
        assert_eq!(a.base(), "Array<Pet>");
    }

    #[test]
    fn unnamed_union_describes_tags() {
        let mut u = pet();
        u.name = None;
        assert_eq!(u.describe(), r#"("cat" | "dog" | "bird")"#);
    }

    #[test]
    fn literal_and_boolean_describe() {
        assert_eq!(Schema::literal("cat").describe(), r#""cat""#);
        assert_eq!(Schema::literal(3).describe(), "3");
        assert_eq!(Schema::boolean().to_string(), "boolean");
        assert_eq!(Schema::from(Schema::object()).describe(), "object");
    }

    #[test]
    fn variant_lookup_by_tag() {
        let u = pet();
        assert_eq!(
            u.variant_for(&json!("cat")).and_then(|v| v.name.as_deref()),
            Some("Cat")
        );
        assert!(u.variant_for(&json!("turtle")).is_none());
        assert!(u.variant_for(&json!(null)).is_none());
        assert!(u.shared_field("name").is_some());
    }

    #[test]
    fn serde_shape_is_kind_tagged_camel_case() {
        let schema: Schema = Schema::array(Schema::string().min_length(1)).max_items(3).into();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            json!({
                "kind": "array",
                "items": { "kind": "string", "minLength": 1 },
                "maxItems": 3
            })
        );
    }

    #[test]
    fn field_required_defaults_to_true() {
        let field: Field = serde_json::from_value(json!({
            "name": "username",
            "schema": { "kind": "string" }
        }))
        .unwrap();
        assert!(field.required);
    }

    #[test]
    fn union_deserializes_from_json() {
        let schema: Schema = serde_json::from_value(json!({
            "kind": "union",
            "name": "Pet",
            "discriminant": "animalType",
            "variants": [
                { "tag": "cat", "name": "Cat", "fields": [
                    { "name": "numberOfLivesLeft",
                      "schema": { "kind": "integer", "width": "uint32", "maximum": 9 } }
                ]},
                { "tag": "dog", "fields": [
                    { "name": "favouriteDogFoodBrand", "required": false,
                      "schema": { "kind": "string" } }
                ]},
                { "tag": "bird" }
            ],
            "shared": [ { "name": "name", "schema": { "kind": "string" } } ]
        }))
        .unwrap();
        assert_eq!(schema, Schema::Union(pet()));
    }
}
