use serde_json::{Map, Value};

/// Creates a deep, structurally independent copy of a document.
///
/// Arrays are copied element by element and objects key by key (in their
/// original order), recursing into every nested container. Scalars are
/// copied as-is. The input must be acyclic, which `serde_json::Value`
/// guarantees by construction.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_mutate_util::json_clone::clone;
///
/// let original = json!({"favoriteFoods": [{"name": "galbi"}]});
/// let mut copy = clone(&original);
/// copy["favoriteFoods"][0]["name"] = json!("banana");
///
/// assert_eq!(original["favoriteFoods"][0]["name"], "galbi");
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(clone).collect()),
        Value::Object(obj) => {
            let mut new_obj = Map::with_capacity(obj.len());
            for (key, val) in obj {
                new_obj.insert(key.clone(), clone(val));
            }
            Value::Object(new_obj)
        }
    }
}
