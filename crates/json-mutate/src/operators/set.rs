//! `set`: replace field values.

use serde_json::Value;

use super::{skip, walk};
use crate::options::MutateOptions;
use crate::types::{Operator, UpdateTree};
use crate::util;

pub(crate) fn set_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    walk(Operator::Set, target, tree, &mut |parent, key, operand| {
        if !util::assign(parent, key, json_mutate_util::clone(operand)) {
            skip(Operator::Set, key, "no such field");
        }
    });
}

/// Returns a copy of `doc` with every leaf of `tree` assigned. Missing keys
/// are created on objects; array elements must already exist.
pub fn apply_set(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    set_in(&mut out, tree, opts);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UpdateNode;
    use serde_json::json;

    fn set(doc: &Value, tree: &UpdateTree) -> Value {
        apply_set(doc, tree, &MutateOptions::default())
    }

    #[test]
    fn test_set_overwrites_and_inserts() {
        let doc = json!({"name": "Michael", "age": 16});
        let out = set(&doc, &UpdateTree::new().leaf("name", "Mike").leaf("location", "home"));
        assert_eq!(out, json!({"name": "Mike", "age": 16, "location": "home"}));
    }

    #[test]
    fn test_set_nested_merges() {
        let doc = json!({"address": {"city": "Seoul", "zip": "04524"}});
        let tree = UpdateTree::new().nested("address", UpdateTree::new().leaf("city", "Busan"));
        assert_eq!(set(&doc, &tree), json!({"address": {"city": "Busan", "zip": "04524"}}));
    }

    #[test]
    fn test_set_leaf_object_replaces_whole_field() {
        let doc = json!({"address": {"city": "Seoul", "zip": "04524"}});
        let mut tree = UpdateTree::new();
        tree.insert("address", UpdateNode::Leaf(json!({"city": "Busan"})));
        assert_eq!(set(&doc, &tree), json!({"address": {"city": "Busan"}}));
    }

    #[test]
    fn test_set_array_element() {
        let doc = json!({"tags": ["a", "b"]});
        let tree = UpdateTree::new().nested("tags", UpdateTree::new().leaf("1", "z").leaf("7", "q"));
        assert_eq!(set(&doc, &tree), json!({"tags": ["a", "z"]}));
    }

    #[test]
    fn test_set_ignores_non_canonical_indices() {
        let doc = json!({"list": [1, 2, 3]});
        let tree = UpdateTree::new().nested("list", UpdateTree::new().leaf("+1", 9).leaf("01", 7));
        assert_eq!(set(&doc, &tree), doc);
    }

    #[test]
    fn test_set_nested_on_missing_or_scalar_is_skipped() {
        let doc = json!({"age": 16});
        let tree = UpdateTree::new()
            .nested("age", UpdateTree::new().leaf("years", 1))
            .nested("address", UpdateTree::new().leaf("city", "Seoul"));
        assert_eq!(set(&doc, &tree), doc);
    }

    #[test]
    fn test_set_is_idempotent() {
        let doc = json!({"a": {"b": [1, 2]}, "c": null});
        let tree = UpdateTree::new()
            .nested("a", UpdateTree::new().leaf("b", json!([3])))
            .leaf("c", false);
        let once = set(&doc, &tree);
        assert_eq!(set(&once, &tree), once);
    }
}
