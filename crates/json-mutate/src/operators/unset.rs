//! `unset`: remove fields.

use serde_json::Value;

use super::{skip, walk};
use crate::options::MutateOptions;
use crate::types::{Operator, UpdateTree};
use crate::util;

pub(crate) fn unset_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    walk(Operator::Unset, target, tree, &mut |parent, key, _| {
        if !util::remove(parent, key) {
            skip(Operator::Unset, key, "no such field");
        }
    });
}

/// Returns a copy of `doc` with every leaf of `tree` removed, whatever the
/// leaf's operand. Array elements become `null`.
pub fn apply_unset(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    unset_in(&mut out, tree, opts);
    out
}
