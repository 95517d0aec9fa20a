//! # Constraints
//!
//! Independent predicates attached to a base type. A primitive schema is a
//! base kind plus a list of constraints; validation evaluates every
//! constraint and reports each failure separately, so `"qux"` against
//! `string & MinLength<4> & Format<"date">` yields two violations.
//!
//! Each constraint renders as a type tag (`MinLength<4>`,
//! `Format<"date">`, `Type<"uint32">`) used in the `expected` text of
//! violations.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde_json::Value;

use tyval_core::{IntegerWidth, StringFormat};

use crate::validate::ViolationKind;

/// Patterns compiled once per validator, keyed by source text.
pub(crate) type PatternCache = HashMap<String, Regex>;

/// Constraint on a string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringConstraint {
    /// At least `n` Unicode scalar values.
    MinLength(usize),
    /// At most `n` Unicode scalar values.
    MaxLength(usize),
    Format(StringFormat),
    /// Contains a match for the regular expression.
    Pattern(String),
}

impl StringConstraint {
    pub(crate) fn admits(&self, s: &str, patterns: &PatternCache) -> bool {
        match self {
            Self::MinLength(n) => s.chars().count() >= *n,
            Self::MaxLength(n) => s.chars().count() <= *n,
            Self::Format(format) => format.matches(s),
            Self::Pattern(source) => patterns.get(source).is_some_and(|re| re.is_match(s)),
        }
    }

    pub fn violation_kind(&self) -> ViolationKind {
        match self {
            Self::MinLength(_) | Self::MaxLength(_) => ViolationKind::LengthOutOfRange,
            Self::Format(_) | Self::Pattern(_) => ViolationKind::FormatMismatch,
        }
    }
}

impl fmt::Display for StringConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength(n) => write!(f, "MinLength<{n}>"),
            Self::MaxLength(n) => write!(f, "MaxLength<{n}>"),
            Self::Format(format) => write!(f, "Format<\"{format}\">"),
            Self::Pattern(source) => write!(f, "Pattern<{}>", Value::String(source.clone())),
        }
    }
}

/// Constraint on the length of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayConstraint {
    MinItems(usize),
    MaxItems(usize),
}

impl ArrayConstraint {
    pub(crate) fn admits(&self, len: usize) -> bool {
        match self {
            Self::MinItems(n) => len >= *n,
            Self::MaxItems(n) => len <= *n,
        }
    }
}

impl fmt::Display for ArrayConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinItems(n) => write!(f, "MinItems<{n}>"),
            Self::MaxItems(n) => write!(f, "MaxItems<{n}>"),
        }
    }
}

/// Constraint on an integral value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerConstraint {
    /// Fits the machine type.
    Width(IntegerWidth),
    /// Inclusive lower bound.
    Minimum(i64),
    /// Inclusive upper bound.
    Maximum(i64),
}

impl IntegerConstraint {
    pub(crate) fn admits(&self, n: i128) -> bool {
        match self {
            Self::Width(width) => width.contains(n),
            Self::Minimum(min) => n >= i128::from(*min),
            Self::Maximum(max) => n <= i128::from(*max),
        }
    }
}

impl fmt::Display for IntegerConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width(width) => write!(f, "Type<\"{width}\">"),
            Self::Minimum(n) => write!(f, "Minimum<{n}>"),
            Self::Maximum(n) => write!(f, "Maximum<{n}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counts_scalar_values() {
        let none = PatternCache::new();
        // Four scalar values, eight UTF-8 bytes.
        assert!(StringConstraint::MinLength(4).admits("Jürg", &none));
        assert!(StringConstraint::MaxLength(4).admits("ßßßß", &none));
        assert!(!StringConstraint::MaxLength(3).admits("ßßßß", &none));
    }

    #[test]
    fn pattern_uses_cached_regex() {
        let mut cache = PatternCache::new();
        cache.insert("^[a-z]+$".to_string(), Regex::new("^[a-z]+$").unwrap());
        let c = StringConstraint::Pattern("^[a-z]+$".to_string());
        assert!(c.admits("kitty", &cache));
        assert!(!c.admits("Kitty", &cache));
    }

    #[test]
    fn integer_bounds_inclusive() {
        assert!(IntegerConstraint::Maximum(9).admits(9));
        assert!(!IntegerConstraint::Maximum(9).admits(10));
        assert!(IntegerConstraint::Minimum(-3).admits(-3));
        assert!(!IntegerConstraint::Minimum(-3).admits(-4));
        assert!(!IntegerConstraint::Width(IntegerWidth::Uint32).admits(-1));
    }

    #[test]
    fn array_bounds_inclusive() {
        assert!(ArrayConstraint::MinItems(1).admits(1));
        assert!(!ArrayConstraint::MinItems(1).admits(0));
        assert!(ArrayConstraint::MaxItems(2).admits(2));
        assert!(!ArrayConstraint::MaxItems(2).admits(3));
    }

    #[test]
    fn tags_render_like_type_expressions() {
        assert_eq!(StringConstraint::MinLength(4).to_string(), "MinLength<4>");
        assert_eq!(
            StringConstraint::Format(StringFormat::Date).to_string(),
            r#"Format<"date">"#
        );
        assert_eq!(
            StringConstraint::Pattern("^a\\d$".to_string()).to_string(),
            r#"Pattern<"^a\\d$">"#
        );
        assert_eq!(
            IntegerConstraint::Width(IntegerWidth::Uint32).to_string(),
            r#"Type<"uint32">"#
        );
        assert_eq!(ArrayConstraint::MinItems(1).to_string(), "MinItems<1>");
    }
}
