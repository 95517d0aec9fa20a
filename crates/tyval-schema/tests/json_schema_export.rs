//! Cross-check: the exported JSON Schema accepts and rejects the same
//! documents as the validator, using the `jsonschema` crate as the oracle.
//!
//! `jsonschema` treats `format` as an annotation under draft 2020-12, so the
//! cases below never rely on a date-format failure alone.

use std::path::PathBuf;

use serde_json::{json, Value};
use tyval_schema::{
    load_document, load_schema, to_json_schema, Schema, ValidateOptions, Validator, Variant,
};

fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop();
    dir.pop();
    dir
}

fn sample(n: usize) -> Value {
    load_document(&repo_root().join(format!("samples/sample-{n}.json"))).unwrap()
}

fn assert_agree(options: ValidateOptions, documents: &[Value]) {
    let schema = load_schema(&repo_root().join("schemas/user.schema.yaml")).unwrap();
    let exported = to_json_schema(&schema, &options);
    let oracle = jsonschema::validator_for(&exported)
        .unwrap_or_else(|e| panic!("exported schema does not compile: {e}\n{exported:#}"));
    let validator = Validator::with_options(schema, options).unwrap();

    for doc in documents {
        assert_eq!(
            validator.is_valid(doc),
            oracle.is_valid(doc),
            "validator and JSON Schema disagree on {doc}"
        );
    }
}

#[test]
fn samples_agree_in_default_mode() {
    let docs: Vec<Value> = (1..=4).map(sample).collect();
    assert_agree(ValidateOptions::default(), &docs);
}

#[test]
fn samples_agree_in_strict_mode() {
    let docs: Vec<Value> = (1..=4).map(sample).collect();
    assert_agree(ValidateOptions::strict(), &docs);
}

#[test]
fn boundary_documents_agree() {
    let base = sample(1);
    let mut docs = vec![base.clone()];

    let mut long_name = base.clone();
    long_name["username"] = json!("abcdefghijklmnopq");
    docs.push(long_name);

    let mut no_pets = base.clone();
    no_pets["pets"] = json!([]);
    docs.push(no_pets);

    let mut negative_lives = base.clone();
    negative_lives["pets"][0]["numberOfLivesLeft"] = json!(-1);
    docs.push(negative_lives);

    let mut ten_lives = base.clone();
    ten_lives["pets"][0]["numberOfLivesLeft"] = json!(10);
    docs.push(ten_lives);

    let mut nameless = base.clone();
    nameless["pets"][1]
        .as_object_mut()
        .unwrap()
        .remove("name");
    docs.push(nameless);

    let mut wrong_brand = base;
    wrong_brand["pets"][1]["favouriteDogFoodBrand"] = json!(42);
    docs.push(wrong_brand);

    assert_agree(ValidateOptions::default(), &docs);
}

#[test]
fn exported_user_schema_shape() {
    let schema = load_schema(&repo_root().join("schemas/user.schema.yaml")).unwrap();
    let exported = to_json_schema(&schema, &ValidateOptions::default());
    assert_eq!(exported["title"], "User");
    assert_eq!(exported["required"], json!(["username", "birthdate", "pets"]));
    assert_eq!(exported["properties"]["pets"]["minItems"], 1);
    assert_eq!(
        exported["properties"]["pets"]["items"]["oneOf"][0]["properties"]["numberOfLivesLeft"],
        json!({"type": "integer", "minimum": 0, "maximum": 9})
    );
}

#[test]
fn numeric_literals_and_tags_agree() {
    let schema: Schema = Schema::union("v")
        .variant(Variant::new(1).required("n", Schema::literal(5)))
        .variant(Variant::new(2))
        .into();
    let exported = to_json_schema(&schema, &ValidateOptions::default());
    let oracle = jsonschema::validator_for(&exported).unwrap();
    let validator = Validator::new(schema).unwrap();

    for doc in [
        json!({"v": 1, "n": 5}),
        json!({"v": 1.0, "n": 5.0}),
        json!({"v": 1, "n": 6}),
        json!({"v": 2}),
        json!({"v": 3}),
    ] {
        assert_eq!(
            validator.is_valid(&doc),
            oracle.is_valid(&doc),
            "validator and JSON Schema disagree on {doc}"
        );
    }
}
