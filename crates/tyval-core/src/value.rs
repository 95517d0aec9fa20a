//! # JSON Value Equality
//!
//! `serde_json::Value`'s `==` compares numbers by representation, so `5`
//! and `5.0` differ. Schema literals and discriminant tags compare by
//! value instead: two numbers are equal when they denote the same number.

use serde_json::{Number, Value};

/// Exclusive magnitude bound below which an integral `f64` converts to
/// `i128` without saturating (2^127).
const I128_F64_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// The integral value of `n`, if it has one. `5.0` counts as `5`.
pub fn integral(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < I128_F64_LIMIT)
        .map(|f| f as i128)
}

fn number_eq(a: &Number, b: &Number) -> bool {
    match (integral(a), integral(b)) {
        (Some(x), Some(y)) => x == y,
        _ => matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y),
    }
}

/// JSON equality with numbers compared by value. Arrays compare
/// element-wise; objects compare by key set regardless of member order.
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => a == b,
    }
}
