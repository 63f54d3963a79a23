//! `increment` and `multiply`.

use serde_json::{Number, Value};

use super::{skip, walk};
use crate::options::MutateOptions;
use crate::types::{Operator, UpdateTree};
use crate::util;

fn arithmetic_in(
    op: Operator,
    target: &mut Value,
    tree: &UpdateTree,
    combine: fn(&Number, &Number) -> Option<Number>,
) {
    walk(op, target, tree, &mut |parent, key, operand| {
        let Value::Number(operand) = operand else {
            return skip(op, key, "operand is not a number");
        };
        match util::child_mut(parent, key) {
            Some(Value::Number(current)) => match combine(current, operand) {
                Some(result) => *current = result,
                None => skip(op, key, "result is not a finite number"),
            },
            _ => skip(op, key, "field is not a number"),
        }
    });
}

pub(crate) fn increment_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    arithmetic_in(Operator::Increment, target, tree, json_mutate_util::add);
}

pub(crate) fn multiply_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    arithmetic_in(Operator::Multiply, target, tree, json_mutate_util::multiply);
}

/// Returns a copy of `doc` with each numeric field named in `tree` increased
/// by its numeric operand.
pub fn apply_increment(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    increment_in(&mut out, tree, opts);
    out
}

/// Returns a copy of `doc` with each numeric field named in `tree` multiplied
/// by its numeric operand.
pub fn apply_multiply(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    multiply_in(&mut out, tree, opts);
    out
}
