use serde_json::Value;

use crate::number;

/// Performs a deep equality check between two JSON values.
///
/// Unlike `Value::eq`, numbers are compared by numeric value, so `1` and
/// `1.0` are equal. Objects are compared key by key regardless of order.
/// Values of different JSON types are never equal (`1` is not `true`).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_mutate_util::json_equal::deep_equal;
///
/// assert!(deep_equal(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2]})));
/// assert!(!deep_equal(&json!({"a": [1, 2]}), &json!({"a": [2, 1]})));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => number::number_eq(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a.iter().all(|(key, val_a)| match obj_b.get(key) {
                Some(val_b) => deep_equal(val_a, val_b),
                None => false,
            })
        }

        _ => false,
    }
}
