//! Numeric helpers for JSON values.
//!
//! Integers stay integers across `add` and `multiply` as long as the result
//! fits; otherwise the computation falls back to `f64`. Booleans take part in
//! comparisons as `0` and `1`, the way `<` treats them in JavaScript.

use serde_json::{Number, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Scalar {
    Int(i128),
    Float(f64),
}

impl Scalar {
    fn of_number(n: &Number) -> Scalar {
        if let Some(i) = n.as_i64() {
            Scalar::Int(i as i128)
        } else if let Some(u) = n.as_u64() {
            Scalar::Int(u as i128)
        } else {
            Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    fn of_value(v: &Value) -> Option<Scalar> {
        match v {
            Value::Number(n) => Some(Scalar::of_number(n)),
            Value::Bool(b) => Some(Scalar::Int(*b as i128)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(i) => i as f64,
            Scalar::Float(f) => f,
        }
    }

    fn partial_cmp(self, other: Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    fn into_number(self) -> Option<Number> {
        match self {
            Scalar::Int(i) => {
                if let Ok(v) = i64::try_from(i) {
                    Some(Number::from(v))
                } else if let Ok(v) = u64::try_from(i) {
                    Some(Number::from(v))
                } else {
                    Number::from_f64(i as f64)
                }
            }
            Scalar::Float(f) => Number::from_f64(f),
        }
    }
}

/// Numeric equality: `1` equals `1.0`, large integers compare exactly.
pub fn number_eq(a: &Number, b: &Number) -> bool {
    Scalar::of_number(a).partial_cmp(Scalar::of_number(b)) == Some(Ordering::Equal)
}

/// Returns true for values that `compare` can order: numbers and booleans.
pub fn is_comparable(v: &Value) -> bool {
    matches!(v, Value::Number(_) | Value::Bool(_))
}

/// Orders two comparable values. Returns `None` when either side is not a
/// number or boolean.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    Scalar::of_value(a)?.partial_cmp(Scalar::of_value(b)?)
}

/// `a + b`, or `None` if the result is not representable as a JSON number.
pub fn add(a: &Number, b: &Number) -> Option<Number> {
    match (Scalar::of_number(a), Scalar::of_number(b)) {
        (Scalar::Int(x), Scalar::Int(y)) => match x.checked_add(y) {
            Some(sum) => Scalar::Int(sum).into_number(),
            None => Number::from_f64(x as f64 + y as f64),
        },
        (x, y) => Number::from_f64(x.as_f64() + y.as_f64()),
    }
}

/// `a * b`, or `None` if the result is not representable as a JSON number.
pub fn multiply(a: &Number, b: &Number) -> Option<Number> {
    match (Scalar::of_number(a), Scalar::of_number(b)) {
        (Scalar::Int(x), Scalar::Int(y)) => match x.checked_mul(y) {
            Some(product) => Scalar::Int(product).into_number(),
            None => Number::from_f64(x as f64 * y as f64),
        },
        (x, y) => Number::from_f64(x.as_f64() * y.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn n(v: Value) -> Number {
        match v {
            Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn test_add_keeps_integers() {
        assert_eq!(add(&n(json!(16)), &n(json!(1))), Some(n(json!(17))));
        assert_eq!(add(&n(json!(-3)), &n(json!(3))), Some(n(json!(0))));
    }

    #[test]
    fn test_add_mixed_is_float() {
        assert_eq!(add(&n(json!(1)), &n(json!(0.5))), Some(n(json!(1.5))));
    }

    #[test]
    fn test_add_past_i64_uses_u64() {
        let sum = add(&n(json!(i64::MAX)), &n(json!(1))).unwrap();
        assert_eq!(sum.as_u64(), Some(i64::MAX as u64 + 1));
    }

    #[test]
    fn test_add_overflow_falls_back_to_float() {
        let sum = add(&n(json!(u64::MAX)), &n(json!(u64::MAX))).unwrap();
        assert!(sum.is_f64());
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(&n(json!(6)), &n(json!(7))), Some(n(json!(42))));
        assert_eq!(multiply(&n(json!(3)), &n(json!(0.5))), Some(n(json!(1.5))));
        assert_eq!(multiply(&n(json!(-2)), &n(json!(4))), Some(n(json!(-8))));
    }

    #[test]
    fn test_compare_numbers_and_bools() {
        assert_eq!(compare(&json!(1), &json!(2)), Some(Ordering::Less));
        assert_eq!(compare(&json!(2.5), &json!(2)), Some(Ordering::Greater));
        assert_eq!(compare(&json!(true), &json!(1)), Some(Ordering::Equal));
        assert_eq!(compare(&json!(false), &json!(0.5)), Some(Ordering::Less));
    }

    #[test]
    fn test_compare_rejects_non_scalars() {
        assert_eq!(compare(&json!("1"), &json!(1)), None);
        assert_eq!(compare(&json!(1), &json!(null)), None);
        assert_eq!(compare(&json!([1]), &json!(1)), None);
    }

    #[test]
    fn test_number_eq() {
        assert!(number_eq(&n(json!(1)), &n(json!(1.0))));
        assert!(!number_eq(&n(json!(u64::MAX)), &n(json!(-1))));
    }

    #[test]
    fn test_is_comparable() {
        assert!(is_comparable(&json!(0)));
        assert!(is_comparable(&json!(false)));
        assert!(!is_comparable(&json!("0")));
        assert!(!is_comparable(&json!(null)));
    }
}
