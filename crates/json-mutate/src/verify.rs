//! Permission verification.
//!
//! Walks an [`UpdateRequest`] against a [`PermissionTree`] of the same shape
//! and records every field the update touches without permission. Sibling
//! fields are all checked; one denial does not stop the walk.
//!
//! Decision per field, where `entry` is the permission declared for it:
//!
//! | entry        | update node | outcome                                      |
//! |--------------|-------------|----------------------------------------------|
//! | `Allow`      | any         | allowed, including everything beneath        |
//! | `Deny`       | any         | one violation at this field                  |
//! | `Tree`       | nested      | descend                                      |
//! | `Tree`       | leaf        | allowed only if the tree is blanket-allowed  |
//! | undeclared   | nested      | descend with nothing declared                |
//! | undeclared   | empty tree  | the default permission                       |
//! | undeclared   | leaf        | the default permission                       |

use std::fmt;

use serde_json::{json, Value};
use tracing::debug;

use crate::types::{Permission, PermissionTree, UpdateNode, UpdateRequest, UpdateTree};

// ── Field paths ───────────────────────────────────────────────────────────

/// Path to a field, starting with the operator name. Segments are kept
/// apart so names containing `.` stay unambiguous; `Display` joins them with
/// `.`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new(segments: Vec<String>) -> Self {
        FieldPath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FieldPath(iter.into_iter().map(Into::into).collect())
    }
}

// ── Result ────────────────────────────────────────────────────────────────

/// Outcome of [`verify`]: the violating field paths in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    violations: Vec<FieldPath>,
}

impl Verification {
    /// True iff no violation was recorded.
    pub fn allowed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldPath] {
        &self.violations
    }

    /// Violations as dotted strings, e.g. `"set.name"`.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// `{"allowed": bool, "errors": [..]}`.
    pub fn to_json(&self) -> Value {
        json!({
            "allowed": self.allowed(),
            "errors": self.errors(),
        })
    }
}

// ── Walk ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Touch<'a> {
    Leaf,
    Tree(&'a UpdateTree),
}

impl<'a> From<&'a UpdateNode> for Touch<'a> {
    fn from(node: &'a UpdateNode) -> Self {
        match node {
            UpdateNode::Leaf(_) => Touch::Leaf,
            UpdateNode::Nested(tree) => Touch::Tree(tree),
        }
    }
}

struct Walker {
    default_permission: bool,
    path: Vec<String>,
    violations: Vec<FieldPath>,
}

impl Walker {
    fn deny(&mut self) {
        self.violations.push(FieldPath(self.path.clone()));
    }

    fn check(&mut self, entry: Option<&Permission>, touch: Touch<'_>) {
        match (entry, touch) {
            (Some(Permission::Allow), _) => {}
            (Some(Permission::Deny), _) => self.deny(),
            (Some(Permission::Tree(perms)), Touch::Tree(tree)) => self.walk(perms, tree),
            (Some(entry @ Permission::Tree(_)), Touch::Leaf) => {
                if !entry.is_blanket_allow() {
                    self.deny();
                }
            }
            (None, Touch::Tree(tree)) if !tree.is_empty() => self.walk(&PermissionTree::new(), tree),
            (None, _) => {
                if !self.default_permission {
                    self.deny();
                }
            }
        }
    }

    fn walk(&mut self, perms: &PermissionTree, tree: &UpdateTree) {
        for (key, node) in tree {
            self.path.push(key.clone());
            self.check(perms.get(key), node.into());
            self.path.pop();
        }
    }
}

/// Decides whether `update` is admissible under `perms`.
///
/// Top-level keys of `perms` are operator names (`"set"`, `"push"`, ...).
/// Fields with no declared permission are allowed iff `default_permission`
/// is true; the default applies at every depth.
///
/// ```
/// use json_mutate::{verify, Operator, PermissionTree, Permission, UpdateRequest, UpdateTree};
///
/// let perms = PermissionTree::new().operator(
///     Operator::Push,
///     Permission::Tree(PermissionTree::new().allow("favoriteFoods")),
/// );
/// let update = UpdateRequest::new()
///     .with(Operator::Set, UpdateTree::new().leaf("name", "Michael"))
///     .with(Operator::Push, UpdateTree::new().leaf("favoriteFoods", serde_json::json!([])));
///
/// let result = verify(&perms, &update, false);
/// assert!(!result.allowed());
/// assert_eq!(result.errors(), ["set.name"]);
/// ```
pub fn verify(perms: &PermissionTree, update: &UpdateRequest, default_permission: bool) -> Verification {
    let mut walker = Walker {
        default_permission,
        path: Vec::new(),
        violations: Vec::new(),
    };
    for (op, tree) in update.iter() {
        walker.path.push(op.name().to_string());
        walker.check(perms.get(op.name()), Touch::Tree(tree));
        walker.path.pop();
    }

    let result = Verification {
        violations: walker.violations,
    };
    debug!(
        target: "json_mutate::verify",
        allowed = result.allowed(),
        violations = result.violations.len(),
        "verified"
    );
    result
}

/// [`verify`] with undeclared fields denied.
pub fn verify_request(perms: &PermissionTree, update: &UpdateRequest) -> Verification {
    verify(perms, update, false)
}
