//! Field navigation shared by the appliers.
//!
//! A key addresses an object member by name or an array element by its
//! canonical decimal index (`"0"`, `"12"`, never `"+1"` or `"01"`).
//! Out-of-range indices and scalar parents address nothing.

use serde_json::Value;

/// Canonical decimal indices only: no sign, no leading zeros except `"0"`.
fn index(arr: &[Value], key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if !canonical {
        return None;
    }
    let idx: usize = key.parse().ok()?;
    (idx < arr.len()).then_some(idx)
}

pub(crate) fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

pub(crate) fn child_mut<'a>(parent: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match parent {
        Value::Object(map) => map.get_mut(key),
        Value::Array(arr) => {
            let idx = index(arr, key)?;
            arr.get_mut(idx)
        }
        _ => None,
    }
}

/// Writes `value` at `key`. Objects gain the key if it is absent; arrays
/// only accept in-range indices. Returns false if nothing was written.
pub(crate) fn assign(parent: &mut Value, key: &str, value: Value) -> bool {
    match parent {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
            true
        }
        Value::Array(arr) => match index(arr, key) {
            Some(idx) => {
                arr[idx] = value;
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Removes `key`. Object members are removed keeping the order of the
/// remaining keys; array elements are replaced by `null` so later indices
/// stay put. Returns false if nothing was removed.
pub(crate) fn remove(parent: &mut Value, key: &str) -> bool {
    match parent {
        Value::Object(map) => map.shift_remove(key).is_some(),
        Value::Array(arr) => match index(arr, key) {
            Some(idx) => {
                arr[idx] = Value::Null;
                true
            }
            None => false,
        },
        _ => false,
    }
}
