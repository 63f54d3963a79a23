//! Operator appliers.
//!
//! Every applier clones the document and then walks its [`UpdateTree`]
//! against the clone: `Nested` nodes descend into the matching composite
//! field, `Leaf` nodes hand the parent container and key to the operator's
//! leaf function. A `Nested` node whose field is missing or scalar is
//! skipped, and so is any leaf the operator cannot apply.

pub mod arithmetic;
pub mod array;
pub mod comparison;
pub mod date;
pub mod set;
pub mod unset;

use serde_json::Value;
use tracing::trace;

use crate::options::MutateOptions;
use crate::types::{Operator, UpdateNode, UpdateTree};
use crate::util;

pub use arithmetic::{apply_increment, apply_multiply};
pub use array::{apply_add_to_set, apply_pop, apply_push};
pub use comparison::{apply_max, apply_min};
pub use date::apply_current_date;
pub use set::apply_set;
pub use unset::apply_unset;

/// In-place applier: mutates `target` according to `tree`.
pub type ApplyFn = fn(&mut Value, &UpdateTree, &MutateOptions);

/// An operator together with its in-place applier.
#[derive(Debug, Clone, Copy)]
pub struct OperatorDefinition {
    pub operator: Operator,
    pub apply_fn: ApplyFn,
}

impl OperatorDefinition {
    pub fn name(&self) -> &'static str {
        self.operator.name()
    }

    /// Clones `doc` and applies `tree` to the clone.
    pub fn apply(&self, doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
        let mut out = json_mutate_util::clone(doc);
        (self.apply_fn)(&mut out, tree, opts);
        out
    }
}

/// All operator definitions, one per [`Operator`], in declaration order.
pub fn operators() -> [OperatorDefinition; 10] {
    Operator::ALL.map(definition)
}

/// The definition for `op`.
pub fn definition(op: Operator) -> OperatorDefinition {
    let apply_fn: ApplyFn = match op {
        Operator::Set => set::set_in,
        Operator::Unset => unset::unset_in,
        Operator::Increment => arithmetic::increment_in,
        Operator::Min => comparison::min_in,
        Operator::Max => comparison::max_in,
        Operator::Multiply => arithmetic::multiply_in,
        Operator::CurrentDate => date::current_date_in,
        Operator::Push => array::push_in,
        Operator::AddToSet => array::add_to_set_in,
        Operator::Pop => array::pop_in,
    };
    OperatorDefinition { operator: op, apply_fn }
}

/// Walks `tree` against `target`, calling `leaf(parent, key, operand)` for
/// every leaf whose parent container was reached.
pub(crate) fn walk<F>(op: Operator, target: &mut Value, tree: &UpdateTree, leaf: &mut F)
where
    F: FnMut(&mut Value, &str, &Value),
{
    for (key, node) in tree {
        match node {
            UpdateNode::Leaf(operand) => leaf(&mut *target, key.as_str(), operand),
            UpdateNode::Nested(sub) => match util::child_mut(&mut *target, key) {
                Some(child) if util::is_composite(child) => walk(op, child, sub, leaf),
                _ => trace!(target: "json_mutate::apply", op = %op, key = %key, "skip: not a container"),
            },
        }
    }
}

/// Logs a leaf the operator could not apply.
pub(crate) fn skip(op: Operator, key: &str, reason: &'static str) {
    trace!(target: "json_mutate::apply", op = %op, key = %key, reason, "skip");
}
