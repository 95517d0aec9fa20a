//! # tyval-core: Foundational Types for tyval
//!
//! Primitives shared by the validator and the CLI. This crate depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Paths are data, not strings.** A [`ValuePath`] is an ordered list of
//!    field names and array indices. It renders as `pets[1].numberOfLivesLeft`
//!    and serializes as `["pets", 1, "numberOfLivesLeft"]`.
//!
//! 2. **Formats are a closed enum.** [`StringFormat`] names every supported
//!    string format; adding one forces every `match` to handle it.
//!
//! 3. **Widths carry their own bounds.** [`IntegerWidth`] knows the inclusive
//!    range of each machine integer type, computed in `i128` so `uint64` and
//!    `int64` share one comparison path.
//!
//! 4. **Numbers compare by value.** [`json_eq`] treats `5` and `5.0` as the
//!    same literal, matching how integer checks read them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tyval-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod format;
pub mod path;
pub mod render;
pub mod value;
pub mod width;

pub use format::StringFormat;
pub use path::{PathSegment, ValuePath};
pub use render::Found;
pub use value::{integral, json_eq};
pub use width::IntegerWidth;
