//! Update orchestration: applies every operator of an [`UpdateRequest`] in a
//! fixed order.

use serde_json::Value;
use tracing::{debug, warn};

use crate::operators;
use crate::options::MutateOptions;
use crate::types::{Operator, UpdateRequest};

/// Dispatch order with every operator enabled.
pub const DISPATCH_ORDER: [Operator; 10] = [
    Operator::Set,
    Operator::Unset,
    Operator::Push,
    Operator::Increment,
    Operator::Multiply,
    Operator::Max,
    Operator::Min,
    Operator::CurrentDate,
    Operator::AddToSet,
    Operator::Pop,
];

/// Dispatch order without `multiply` and `currentDate`.
pub const BASE_DISPATCH_ORDER: [Operator; 8] = [
    Operator::Set,
    Operator::Unset,
    Operator::Push,
    Operator::Increment,
    Operator::Max,
    Operator::Min,
    Operator::AddToSet,
    Operator::Pop,
];

/// The order in which `mutate_with` applies operators under `opts`.
pub fn dispatch_order(opts: &MutateOptions) -> &'static [Operator] {
    if opts.extended_operators {
        &DISPATCH_ORDER
    } else {
        &BASE_DISPATCH_ORDER
    }
}

/// Applies `update` to a copy of `doc` with default options.
///
/// ```
/// use json_mutate::{mutate, Operator, UpdateRequest, UpdateTree};
/// use serde_json::json;
///
/// let doc = json!({"name": "Michael", "age": 16});
/// let update = UpdateRequest::new()
///     .with(Operator::Increment, UpdateTree::new().leaf("age", 1));
///
/// assert_eq!(mutate(&doc, &update), json!({"name": "Michael", "age": 17}));
/// assert_eq!(doc["age"], 16);
/// ```
pub fn mutate(doc: &Value, update: &UpdateRequest) -> Value {
    mutate_with(doc, update, &MutateOptions::default())
}

/// Applies `update` to a copy of `doc`. Each operator sees the output of the
/// previous one; `doc` itself is never modified.
pub fn mutate_with(doc: &Value, update: &UpdateRequest, opts: &MutateOptions) -> Value {
    let order = dispatch_order(opts);
    for (op, _) in update.iter() {
        if !order.contains(&op) {
            warn!(target: "json_mutate::mutate", op = %op, "operator not in dispatch order, ignored");
        }
    }

    let mut out = json_mutate_util::clone(doc);
    for &op in order {
        if let Some(tree) = update.get(op) {
            debug!(target: "json_mutate::mutate", op = %op, fields = tree.len(), "apply");
            (operators::definition(op).apply_fn)(&mut out, tree, opts);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Clock;
    use crate::types::UpdateTree;
    use serde_json::json;

    #[test]
    fn test_dispatch_orders() {
        assert_eq!(dispatch_order(&MutateOptions::default()).len(), 10);
        let base = MutateOptions::default().with_extended_operators(false);
        assert!(!dispatch_order(&base).contains(&Operator::Multiply));
        assert!(!dispatch_order(&base).contains(&Operator::CurrentDate));
    }

    #[test]
    fn test_every_operator_is_dispatched() {
        for op in Operator::ALL {
            assert!(DISPATCH_ORDER.contains(&op), "{op} missing");
        }
    }

    #[test]
    fn test_set_runs_before_increment() {
        let doc = json!({"n": 1});
        let update = UpdateRequest::new()
            .with(Operator::Increment, UpdateTree::new().leaf("n", 1))
            .with(Operator::Set, UpdateTree::new().leaf("n", 10));
        assert_eq!(mutate(&doc, &update), json!({"n": 11}));
    }

    #[test]
    fn test_push_runs_before_pop() {
        let doc = json!({"list": [1]});
        let update = UpdateRequest::new()
            .with(Operator::Pop, UpdateTree::new().leaf("list", -1))
            .with(Operator::Push, UpdateTree::new().leaf("list", json!([2])));
        assert_eq!(mutate(&doc, &update), json!({"list": [1]}));
    }

    #[test]
    fn test_increment_then_multiply() {
        let doc = json!({"n": 2});
        let update = UpdateRequest::new()
            .with(Operator::Multiply, UpdateTree::new().leaf("n", 10))
            .with(Operator::Increment, UpdateTree::new().leaf("n", 1));
        assert_eq!(mutate(&doc, &update), json!({"n": 30}));
    }

    #[test]
    fn test_base_order_ignores_extended_operators() {
        let opts = MutateOptions::default()
            .with_extended_operators(false)
            .with_clock(Clock::Fixed(7));
        let doc = json!({"n": 2, "at": 0});
        let update = UpdateRequest::new()
            .with(Operator::Multiply, UpdateTree::new().leaf("n", 10))
            .with(Operator::CurrentDate, UpdateTree::new().leaf("at", true));
        assert_eq!(mutate_with(&doc, &update, &opts), doc);
    }

    #[test]
    fn test_empty_request_returns_equal_copy() {
        let doc = json!({"a": [1, {"b": 2}]});
        assert_eq!(mutate(&doc, &UpdateRequest::new()), doc);
    }
}
