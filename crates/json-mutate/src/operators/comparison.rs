//! `min` and `max`.
//!
//! Operands must be numbers or booleans. A missing field takes the operand;
//! an existing field is compared numerically (booleans count as 0 and 1) and
//! replaced only on a strict win, so ties keep the original value.

use std::cmp::Ordering;

use serde_json::Value;

use super::{skip, walk};
use crate::options::MutateOptions;
use crate::types::{Operator, UpdateTree};
use crate::util;

fn compare_in(op: Operator, target: &mut Value, tree: &UpdateTree, wins: Ordering) {
    walk(op, target, tree, &mut |parent, key, operand| {
        if !json_mutate_util::is_comparable(operand) {
            return skip(op, key, "operand is not comparable");
        }
        match util::child_mut(parent, key) {
            Some(field) => match json_mutate_util::compare(operand, field) {
                Some(ord) if ord == wins => *field = operand.clone(),
                Some(_) => {}
                None => skip(op, key, "field is not comparable"),
            },
            None => {
                if !util::assign(parent, key, operand.clone()) {
                    skip(op, key, "no such field");
                }
            }
        }
    });
}

pub(crate) fn min_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    compare_in(Operator::Min, target, tree, Ordering::Less);
}

pub(crate) fn max_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    compare_in(Operator::Max, target, tree, Ordering::Greater);
}

/// Returns a copy of `doc` where each field named in `tree` holds the smaller
/// of its value and the operand.
pub fn apply_min(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    min_in(&mut out, tree, opts);
    out
}

/// Returns a copy of `doc` where each field named in `tree` holds the larger
/// of its value and the operand.
pub fn apply_max(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    max_in(&mut out, tree, opts);
    out
}
