//! # tyval-cli: Command-Line Interface
//!
//! ## Subcommands
//!
//! - `demo`: validate the four built-in user/pet samples and print the
//!   outcome of each
//! - `validate`: validate JSON/YAML documents against a schema file
//! - `export`: print a schema as JSON Schema or as a tyval schema file
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; handlers return the
//!   process exit code.
//! - Validation logic lives in `tyval-schema`; nothing here inspects values.
//! - Reports go to stdout, logs to stderr.

pub mod demo;
pub mod export;
pub mod output;
pub mod validate;
