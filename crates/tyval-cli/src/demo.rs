//! # Demo Subcommand
//!
//! Validates four fixed user documents against the built-in user schema
//! and prints one report per sample:
//!
//! 1. a valid user,
//! 2. a user without the required `birthdate`,
//! 3. a user with an undeclared `id` member,
//! 4. a user with a short username, a malformed date, an unknown pet kind,
//!    and a cat with too many lives.
//!
//! Accepted samples are also decoded into the typed [`User`] model.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::{Deserialize, Serialize};

use tyval_core::{IntegerWidth, StringFormat};
use tyval_schema::{Schema, ValidateOptions, ValidationResult, Validator, Variant};

use crate::output::{render, OutputFormat};

/// Arguments for the `tyval demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Reject members the schema does not declare.
    #[arg(long)]
    pub strict: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Valid.
pub const SAMPLE_1: &str = r#"{
  "username": "meyer.sepp",
  "birthdate": "1983-03-28",
  "pets": [
    { "animalType": "cat", "name": "Kittykatty", "numberOfLivesLeft": 5 },
    { "animalType": "dog", "name": "Olaf", "favouriteDogFoodBrand": "DogGo!" },
    { "animalType": "bird", "name": "Lori" },
    { "animalType": "bird", "name": "Flori" }
  ],
  "favouriteTvSeries": "The Office"
}"#;

/// Missing `birthdate`.
pub const SAMPLE_2: &str = r#"{
  "username": "foofa",
  "pets": [
    { "animalType": "dog", "name": "Ludwig" }
  ]
}"#;

/// Undeclared `id`.
pub const SAMPLE_3: &str = r#"{
  "id": 42,
  "username": "IcyToothPaste",
  "birthdate": "2001-08-08",
  "pets": [
    { "animalType": "cat", "name": "Susi", "numberOfLivesLeft": 9 },
    { "animalType": "cat", "name": "Lolo", "numberOfLivesLeft": 8 }
  ]
}"#;

/// Short username, malformed date, unknown `animalType`, too many lives.
pub const SAMPLE_4: &str = r#"{
  "username": "qux",
  "birthdate": "04/32/1947",
  "pets": [
    { "animalType": "turtle", "name": "Schildi" },
    { "animalType": "cat", "name": "Felix", "numberOfLivesLeft": 11 }
  ]
}"#;

pub const SAMPLES: [&str; 4] = [SAMPLE_1, SAMPLE_2, SAMPLE_3, SAMPLE_4];

/// `(Cat | Dog | Bird) & { name: string }`, keyed on `animalType`.
pub fn pet_schema() -> Schema {
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

/// The user schema; identical to `schemas/user.schema.yaml`.
pub fn user_schema() -> Schema {
    Schema::object()
        .named("User")
        .required("username", Schema::string().min_length(4).max_length(16))
        .required("birthdate", Schema::string().format(StringFormat::Date))
        .required("pets", Schema::array(pet_schema()).min_items(1))
        .optional("favouriteTvSeries", Schema::string())
        .into()
}

/// Typed view of an accepted user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub birthdate: NaiveDate,
    pub pets: Vec<Pet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favourite_tv_series: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    #[serde(flatten)]
    pub kind: PetKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "animalType", rename_all = "lowercase")]
pub enum PetKind {
    #[serde(rename_all = "camelCase")]
    Cat { number_of_lives_left: u32 },
    #[serde(rename_all = "camelCase")]
    Dog {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        favourite_dog_food_brand: Option<String>,
    },
    Bird,
}

/// Validate every built-in sample, labelled `sample 1` .. `sample 4`.
pub fn run_samples(options: ValidateOptions) -> Result<Vec<(String, ValidationResult)>> {
    let validator = Validator::with_options(user_schema(), options)
        .context("built-in user schema is invalid")?;

    SAMPLES
        .iter()
        .enumerate()
        .map(|(idx, json)| {
            let label = format!("sample {}", idx + 1);
            let value: serde_json::Value =
                serde_json::from_str(json).with_context(|| format!("{label} is not valid JSON"))?;
            Ok((label, validator.validate(value)))
        })
        .collect()
}

/// Execute the demo subcommand. Always exits 0: rejected samples are the
/// point of the demonstration.
pub fn run_demo(args: &DemoArgs) -> Result<u8> {
    let options = ValidateOptions {
        reject_unknown_fields: args.strict,
    };

    for (label, result) in run_samples(options)? {
        if let Some(data) = result.data() {
            match serde_json::from_value::<User>(data.clone()) {
                Ok(user) => tracing::info!(
                    sample = %label,
                    username = %user.username,
                    pets = user.pets.len(),
                    "decoded user"
                ),
                Err(e) => tracing::warn!(sample = %label, error = %e, "accepted sample does not decode"),
            }
        }
        println!("{}", render(&label, &result, args.format)?);
    }

    Ok(0)
}
