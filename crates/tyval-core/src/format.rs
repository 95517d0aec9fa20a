//! # String Formats
//!
//! Named syntaxes a `string` schema can require. Each format is a single
//! predicate over the string; a mismatch is one violation regardless of how
//! many parts of the syntax are wrong.
//!
//! ## Formats
//!
//! - `date`: `YYYY-MM-DD`, exactly four year digits and two month/day
//!   digits, and a real calendar date (`2023-02-29` is rejected).
//! - `date-time`: RFC 3339 (`2026-01-15T12:00:00Z`, offsets allowed).
//! - `email`: `local@domain` with a dotted-label domain.
//! - `uuid`: hyphenated 8-4-4-4-12 hex form.
//! - `url`: absolute URL as accepted by the WHATWG parser.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A named string syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    Date,
    DateTime,
    Email,
    Uuid,
    Url,
}

impl StringFormat {
    /// Format name as written in schemas, e.g. `date-time`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Email => "email",
            Self::Uuid => "uuid",
            Self::Url => "url",
        }
    }

    /// Returns true if `s` conforms to this format.
    pub fn matches(self, s: &str) -> bool {
        match self {
            Self::Date => is_date(s),
            Self::DateTime => DateTime::parse_from_rfc3339(s).is_ok(),
            Self::Email => is_email(s),
            Self::Uuid => s.len() == 36 && uuid::Uuid::parse_str(s).is_ok(),
            Self::Url => url::Url::parse(s).is_ok(),
        }
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full-date per RFC 3339 §5.6 with calendar validity.
///
/// chrono's `%Y-%m-%d` parser tolerates short fields (`2023-3-5`), so the
/// shape is checked byte by byte before the calendar lookup.
fn is_date(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return false;
    }
    let (Some(year), Some(month), Some(day)) = (digits(&b[0..4]), digits(&b[5..7]), digits(&b[8..10]))
    else {
        return false;
    };
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
        .is_some()
}

fn digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &c| {
        c.is_ascii_digit().then(|| acc * 10 + u32::from(c - b'0'))
    })
}

fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || local.starts_with('.') || local.ends_with('.') {
        return false;
    }
    const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
