//! Sequence operators: `push`, `addToSet` and `pop`.

use std::collections::HashMap;

use serde_json::Value;

use super::{skip, walk};
use crate::options::{AddToSetMode, MutateOptions};
use crate::types::{Operator, UpdateTree};
use crate::util;

fn array_field<'a>(parent: &'a mut Value, key: &str) -> Option<&'a mut Vec<Value>> {
    util::child_mut(parent, key)?.as_array_mut()
}

/// Coarse key for [`Seen`]. Values that are `deep_equal` always share a
/// bucket: numbers are keyed by their `f64` value (so `1` and `1.0` meet)
/// and containers only by kind and length.
#[derive(PartialEq, Eq, Hash)]
enum Bucket {
    Null,
    Bool(bool),
    Number(u64),
    String(String),
    Array(usize),
    Object(usize),
}

impl Bucket {
    fn of(value: &Value) -> Bucket {
        match value {
            Value::Null => Bucket::Null,
            Value::Bool(b) => Bucket::Bool(*b),
            Value::Number(n) => {
                let f = n.as_f64().unwrap_or(0.0);
                // -0.0 == 0.0
                Bucket::Number(if f == 0.0 { 0 } else { f.to_bits() })
            }
            Value::String(s) => Bucket::String(s.clone()),
            Value::Array(arr) => Bucket::Array(arr.len()),
            Value::Object(map) => Bucket::Object(map.len()),
        }
    }
}

/// Value-equality set scoped to a single leaf. Scalars hash straight to
/// their bucket; containers of equal kind and length are compared with
/// `deep_equal` one by one.
#[derive(Default)]
struct Seen(HashMap<Bucket, Vec<Value>>);

impl Seen {
    /// Records `value`; returns false if an equal value was already recorded.
    fn insert(&mut self, value: &Value) -> bool {
        let bucket = self.0.entry(Bucket::of(value)).or_default();
        if bucket.iter().any(|v| json_mutate_util::deep_equal(v, value)) {
            return false;
        }
        bucket.push(value.clone());
        true
    }
}

fn dedupe(items: Vec<Value>, seen: &mut Seen) -> Vec<Value> {
    items.into_iter().filter(|v| seen.insert(v)).collect()
}

pub(crate) fn push_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    walk(Operator::Push, target, tree, &mut |parent, key, operand| {
        let Some(items) = operand.as_array() else {
            return skip(Operator::Push, key, "operand is not an array");
        };
        match array_field(parent, key) {
            Some(arr) => arr.extend(items.iter().map(json_mutate_util::clone)),
            None => skip(Operator::Push, key, "field is not an array"),
        }
    });
}

pub(crate) fn add_to_set_in(target: &mut Value, tree: &UpdateTree, opts: &MutateOptions) {
    let mode = opts.add_to_set;
    walk(Operator::AddToSet, target, tree, &mut |parent, key, operand| {
        let candidates: &[Value] = match (mode, operand.as_array()) {
            (AddToSetMode::Union, Some(items)) => items.as_slice(),
            (AddToSetMode::Literal, _) => &[],
            (AddToSetMode::Union, None) => {
                return skip(Operator::AddToSet, key, "operand is not an array");
            }
        };
        let Some(arr) = array_field(parent, key) else {
            return skip(Operator::AddToSet, key, "field is not an array");
        };
        let mut seen = Seen::default();
        let mut merged = dedupe(std::mem::take(arr), &mut seen);
        merged.extend(
            candidates
                .iter()
                .filter(|v| seen.insert(v))
                .map(json_mutate_util::clone),
        );
        *arr = merged;
    });
}

pub(crate) fn pop_in(target: &mut Value, tree: &UpdateTree, _opts: &MutateOptions) {
    walk(Operator::Pop, target, tree, &mut |parent, key, operand| {
        let Some(arr) = array_field(parent, key) else {
            return skip(Operator::Pop, key, "field is not an array");
        };
        if arr.is_empty() {
            return;
        }
        if operand.as_f64() == Some(-1.0) {
            arr.pop();
        } else {
            arr.remove(0);
        }
    });
}

/// Returns a copy of `doc` where each array field named in `tree` has the
/// operand's elements appended, in order.
pub fn apply_push(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    push_in(&mut out, tree, opts);
    out
}

/// Returns a copy of `doc` where each array field named in `tree` holds no
/// duplicate values. In [`AddToSetMode::Union`] the operand's elements that
/// are not present yet are appended; in [`AddToSetMode::Literal`] the operand
/// is ignored.
pub fn apply_add_to_set(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    add_to_set_in(&mut out, tree, opts);
    out
}

/// Returns a copy of `doc` where each array field named in `tree` loses its
/// last element (operand `-1`) or its first element (any other operand).
pub fn apply_pop(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    pop_in(&mut out, tree, opts);
    out
}
