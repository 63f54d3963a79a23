//! `currentDate`: stamp fields with the current time.

use serde_json::Value;

use super::{skip, walk};
use crate::options::MutateOptions;
use crate::types::{Operator, UpdateTree};
use crate::util;

pub(crate) fn current_date_in(target: &mut Value, tree: &UpdateTree, opts: &MutateOptions) {
    walk(Operator::CurrentDate, target, tree, &mut |parent, key, _| {
        let now = Value::from(opts.clock.now_millis());
        if !util::assign(parent, key, now) {
            skip(Operator::CurrentDate, key, "no such field");
        }
    });
}

/// Returns a copy of `doc` where every leaf of `tree` is set to the current
/// time in epoch milliseconds. The operand is ignored: `false` stamps too.
pub fn apply_current_date(doc: &Value, tree: &UpdateTree, opts: &MutateOptions) -> Value {
    let mut out = json_mutate_util::clone(doc);
    current_date_in(&mut out, tree, opts);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Clock;
    use serde_json::json;

    #[test]
    fn test_stamps_with_clock() {
        let opts = MutateOptions::default().with_clock(Clock::Fixed(1_700_000_000_000));
        let doc = json!({"updatedAt": 0, "meta": {"seen": null}});
        let tree = UpdateTree::new()
            .leaf("updatedAt", true)
            .leaf("createdAt", false)
            .nested("meta", UpdateTree::new().leaf("seen", json!({"type": "date"})));
        assert_eq!(
            apply_current_date(&doc, &tree, &opts),
            json!({
                "updatedAt": 1_700_000_000_000i64,
                "meta": {"seen": 1_700_000_000_000i64},
                "createdAt": 1_700_000_000_000i64
            })
        );
    }

    #[test]
    fn test_system_clock_is_recent() {
        let doc = json!({});
        let out = apply_current_date(&doc, &UpdateTree::new().leaf("at", true), &MutateOptions::default());
        assert!(out["at"].as_i64().unwrap() > 1_600_000_000_000);
    }
}
