//! Human-readable rendering of the value found at a violating path.

use std::fmt;

use serde_json::Value;

/// The value observed at a path, or `None` when the member was absent.
///
/// Strings render without quotes, absent members render as `undefined`,
/// everything else renders as compact JSON.
#[derive(Debug, Clone, Copy)]
pub struct Found<'a>(pub Option<&'a Value>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("undefined"),
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{other}"),
        }
    }
}
