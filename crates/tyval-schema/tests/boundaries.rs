//! Boundary tests for every declared bound of the user schema, plus the
//! bounds the sample documents never reach (`MaxLength` on usernames,
//! `MaxItems` on arrays, width limits on integers).

use serde_json::{json, Value};
use tyval_core::{IntegerWidth, StringFormat};
use tyval_schema::{Schema, Validator, Variant, ViolationKind};

fn pet() -> Schema {
    Schema::union("animalType")
        .named("Pet")
        .variant(Variant::new("cat").named("Cat").required(
            "numberOfLivesLeft",
            Schema::integer().width(IntegerWidth::Uint32).maximum(9),
        ))
        .variant(
            Variant::new("dog")
                .named("Dog")
                .optional("favouriteDogFoodBrand", Schema::string()),
        )
        .variant(Variant::new("bird").named("Bird"))
        .shared_required("name", Schema::string())
        .into()
}

fn validator() -> Validator {
    let user = Schema::object()
        .named("User")
        .required("username", Schema::string().min_length(4).max_length(16))
        .required("birthdate", Schema::string().format(StringFormat::Date))
        .required("pets", Schema::array(pet()).min_items(1))
        .optional("favouriteTvSeries", Schema::string());
    Validator::new(user.into()).unwrap()
}

fn user_with(field: &str, value: Value) -> Value {
    let mut user = json!({
        "username": "meyer.sepp",
        "birthdate": "1983-03-28",
        "pets": [{"animalType": "bird", "name": "Lori"}]
    });
    user[field] = value;
    user
}

fn kinds(value: &Value) -> Vec<ViolationKind> {
    validator().errors(value).into_iter().map(|e| e.kind).collect()
}

// ---- username: MinLength<4> & MaxLength<16> ----

#[test]
fn username_length_bounds() {
    assert_eq!(kinds(&user_with("username", json!("abc"))), vec![ViolationKind::LengthOutOfRange]);
    assert!(kinds(&user_with("username", json!("abcd"))).is_empty());
    assert!(kinds(&user_with("username", json!("abcdefghijklmnop"))).is_empty());

    let errors = validator().errors(&user_with("username", json!("abcdefghijklmnopq")));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected, "string & MaxLength<16>");
}

#[test]
fn username_wrong_type() {
    let errors = validator().errors(&user_with("username", json!(null)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ViolationKind::TypeMismatch);
    assert_eq!(errors[0].expected, "string & MinLength<4> & MaxLength<16>");
}

// ---- birthdate: Format<"date"> ----

#[test]
fn birthdate_calendar_validity() {
    assert!(kinds(&user_with("birthdate", json!("2000-02-29"))).is_empty());
    assert_eq!(
        kinds(&user_with("birthdate", json!("1900-02-29"))),
        vec![ViolationKind::FormatMismatch]
    );
    assert_eq!(
        kinds(&user_with("birthdate", json!("1947-04-31"))),
        vec![ViolationKind::FormatMismatch]
    );
    assert!(kinds(&user_with("birthdate", json!("1947-12-31"))).is_empty());
}

// ---- pets: MinItems<1> ----

#[test]
fn pets_min_items() {
    let errors = validator().errors(&user_with("pets", json!([])));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_string(), "pets");
    assert_eq!(errors[0].kind, ViolationKind::LengthOutOfRange);
    assert_eq!(errors[0].expected, "Array<Pet> & MinItems<1>");
    assert_eq!(errors[0].to_string(), "pets, expected Array<Pet> & MinItems<1>, found value []");
}

#[test]
fn max_items_bound() {
    let schema: Schema = Schema::array(Schema::boolean()).min_items(1).max_items(2).into();
    let validator = Validator::new(schema).unwrap();
    assert!(validator.is_valid(&json!([true, false])));
    let errors = validator.errors(&json!([true, false, true]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected, "Array<boolean> & MaxItems<2>");
}

// ---- numberOfLivesLeft: Type<"uint32"> & Maximum<9> ----

fn cat(lives: Value) -> Value {
    user_with(
        "pets",
        json!([{"animalType": "cat", "name": "Felix", "numberOfLivesLeft": lives}]),
    )
}

#[test]
fn lives_upper_bound() {
    assert!(kinds(&cat(json!(9))).is_empty());
    assert_eq!(kinds(&cat(json!(10))), vec![ViolationKind::NumericOutOfRange]);
}

#[test]
fn lives_unsigned_lower_bound() {
    assert!(kinds(&cat(json!(0))).is_empty());
    let errors = validator().errors(&cat(json!(-1)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_string(), "pets[0].numberOfLivesLeft");
    assert_eq!(errors[0].expected, r#"integer & Type<"uint32">"#);
}

#[test]
fn lives_beyond_uint32_violates_both_width_and_maximum() {
    let errors = validator().errors(&cat(json!(4_294_967_296u64)));
    let expected: Vec<&str> = errors.iter().map(|e| e.expected.as_str()).collect();
    assert_eq!(
        expected,
        vec![r#"integer & Type<"uint32">"#, "integer & Maximum<9>"]
    );
}

#[test]
fn lives_must_be_integral() {
    assert_eq!(kinds(&cat(json!(2.5))), vec![ViolationKind::TypeMismatch]);
    assert_eq!(kinds(&cat(json!("5"))), vec![ViolationKind::TypeMismatch]);
}

// ---- discriminant ----

#[test]
fn discriminant_must_be_exact() {
    let value = user_with("pets", json!([{"animalType": "Cat", "name": "Felix"}]));
    let errors = validator().errors(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_string(), "pets[0].animalType");
    assert_eq!(errors[0].kind, ViolationKind::DiscriminantMismatch);
}

#[test]
fn dog_optional_brand_checked_when_present() {
    let value = user_with(
        "pets",
        json!([{"animalType": "dog", "name": "Olaf", "favouriteDogFoodBrand": 3}]),
    );
    let errors = validator().errors(&value);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path.to_string(), "pets[0].favouriteDogFoodBrand");
}

#[test]
fn favourite_tv_series_optional() {
    let mut value = user_with("favouriteTvSeries", json!("The Office"));
    assert!(kinds(&value).is_empty());
    value["favouriteTvSeries"] = json!(["The Office"]);
    assert_eq!(kinds(&value), vec![ViolationKind::TypeMismatch]);
}
