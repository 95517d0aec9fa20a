//! # Integer Widths
//!
//! Machine integer types an `integer` schema can be narrowed to. Bounds are
//! inclusive and expressed in `i128` so every width compares the same way.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Signedness and bit width of an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerWidth {
    Int32,
    Uint32,
    Int64,
    Uint64,
}

impl IntegerWidth {
    /// All widths, narrowest first.
    pub const ALL: [IntegerWidth; 4] = [
        IntegerWidth::Int32,
        IntegerWidth::Uint32,
        IntegerWidth::Int64,
        IntegerWidth::Uint64,
    ];

    /// Smallest representable value.
    pub fn min(self) -> i128 {
        match self {
            Self::Int32 => i128::from(i32::MIN),
            Self::Int64 => i128::from(i64::MIN),
            Self::Uint32 | Self::Uint64 => 0,
        }
    }

    /// Largest representable value.
    pub fn max(self) -> i128 {
        match self {
            Self::Int32 => i128::from(i32::MAX),
            Self::Uint32 => i128::from(u32::MAX),
            Self::Int64 => i128::from(i64::MAX),
            Self::Uint64 => i128::from(u64::MAX),
        }
    }

    /// Returns true if `n` fits in this width.
    pub fn contains(self, n: i128) -> bool {
        (self.min()..=self.max()).contains(&n)
    }

    /// Lowercase type name, e.g. `uint32`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
        }
    }
}

impl fmt::Display for IntegerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
