//! Core types: operators, update trees, update requests and permission trees.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

// ── Operator ──────────────────────────────────────────────────────────────

/// An update operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Set,
    Unset,
    Increment,
    Min,
    Max,
    Multiply,
    CurrentDate,
    Push,
    AddToSet,
    Pop,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 10] = [
        Operator::Set,
        Operator::Unset,
        Operator::Increment,
        Operator::Min,
        Operator::Max,
        Operator::Multiply,
        Operator::CurrentDate,
        Operator::Push,
        Operator::AddToSet,
        Operator::Pop,
    ];

    /// Canonical name, used as the key in update requests, permission trees
    /// and violation paths.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Set => "set",
            Operator::Unset => "unset",
            Operator::Increment => "increment",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Multiply => "multiply",
            Operator::CurrentDate => "currentDate",
            Operator::Push => "push",
            Operator::AddToSet => "addToSet",
            Operator::Pop => "pop",
        }
    }

    /// Alternative spellings accepted when decoding.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Operator::Set => &["$set"],
            Operator::Unset => &["$unset"],
            Operator::Increment => &["inc", "$inc"],
            Operator::Min => &["$min"],
            Operator::Max => &["$max"],
            Operator::Multiply => &["mul", "$mul"],
            Operator::CurrentDate => &["$currentDate"],
            Operator::Push => &["$push"],
            Operator::AddToSet => &["$addToSet"],
            Operator::Pop => &["$pop"],
        }
    }

    /// Looks an operator up by canonical name or alias.
    pub fn from_name(name: &str) -> Option<Operator> {
        Operator::ALL
            .into_iter()
            .find(|op| op.name() == name || op.aliases().contains(&name))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Update trees ──────────────────────────────────────────────────────────

/// One entry of an operator sub-document.
///
/// `Nested` descends into the matching field of the target document;
/// `Leaf` carries the operand for the operator at that field. An object
/// wrapped in `Leaf` is an operand (e.g. a whole object assigned by `set`),
/// never a path.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateNode {
    Leaf(Value),
    Nested(UpdateTree),
}

impl UpdateNode {
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            UpdateNode::Leaf(v) => Some(v),
            UpdateNode::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&UpdateTree> {
        match self {
            UpdateNode::Leaf(_) => None,
            UpdateNode::Nested(t) => Some(t),
        }
    }
}

/// Operator sub-document: field name to [`UpdateNode`], in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTree {
    entries: IndexMap<String, UpdateNode>,
}

impl UpdateTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: adds a leaf operand at `key`.
    pub fn leaf(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), UpdateNode::Leaf(value.into()));
        self
    }

    /// Builder: adds a nested sub-tree at `key`.
    pub fn nested(mut self, key: impl Into<String>, tree: UpdateTree) -> Self {
        self.entries.insert(key.into(), UpdateNode::Nested(tree));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, node: UpdateNode) -> Option<UpdateNode> {
        self.entries.insert(key.into(), node)
    }

    pub fn get(&self, key: &str) -> Option<&UpdateNode> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, UpdateNode> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a UpdateTree {
    type Item = (&'a String, &'a UpdateNode);
    type IntoIter = indexmap::map::Iter<'a, String, UpdateNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, UpdateNode)> for UpdateTree {
    fn from_iter<I: IntoIterator<Item = (K, UpdateNode)>>(iter: I) -> Self {
        UpdateTree {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ── Update request ────────────────────────────────────────────────────────

/// A composite update: one [`UpdateTree`] per operator, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    ops: IndexMap<Operator, UpdateTree>,
}

impl UpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: sets the sub-document for `op`, replacing any previous one.
    pub fn with(mut self, op: Operator, tree: UpdateTree) -> Self {
        self.ops.insert(op, tree);
        self
    }

    pub fn insert(&mut self, op: Operator, tree: UpdateTree) -> Option<UpdateTree> {
        self.ops.insert(op, tree)
    }

    pub fn get(&self, op: Operator) -> Option<&UpdateTree> {
        self.ops.get(&op)
    }

    pub fn contains(&self, op: Operator) -> bool {
        self.ops.contains_key(&op)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operator, &UpdateTree)> {
        self.ops.iter().map(|(op, tree)| (*op, tree))
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

// ── Permission tree ───────────────────────────────────────────────────────

/// Permission for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Permission {
    /// Always allowed, including everything beneath this field.
    Allow,
    /// Always denied, including everything beneath this field.
    Deny,
    /// Decided per sub-field.
    Tree(PermissionTree),
}

impl Permission {
    /// True if this permission admits a write that replaces the whole field.
    /// An empty tree declares nothing and so admits nothing.
    pub fn is_blanket_allow(&self) -> bool {
        match self {
            Permission::Allow => true,
            Permission::Deny => false,
            Permission::Tree(tree) => {
                !tree.is_empty() && tree.iter().all(|(_, p)| p.is_blanket_allow())
            }
        }
    }
}

impl From<bool> for Permission {
    fn from(allowed: bool) -> Self {
        if allowed {
            Permission::Allow
        } else {
            Permission::Deny
        }
    }
}

/// Field name to [`Permission`]. Fields that are not declared fall back to
/// the default permission given to the verifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionTree {
    entries: IndexMap<String, Permission>,
}

impl PermissionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(self, key: impl Into<String>) -> Self {
        self.with(key, Permission::Allow)
    }

    pub fn deny(self, key: impl Into<String>) -> Self {
        self.with(key, Permission::Deny)
    }

    pub fn tree(self, key: impl Into<String>, tree: PermissionTree) -> Self {
        self.with(key, Permission::Tree(tree))
    }

    /// Builder keyed by operator canonical name.
    pub fn operator(self, op: Operator, permission: Permission) -> Self {
        self.with(op.name(), permission)
    }

    pub fn with(mut self, key: impl Into<String>, permission: Permission) -> Self {
        self.entries.insert(key.into(), permission);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, permission: Permission) -> Option<Permission> {
        self.entries.insert(key.into(), permission)
    }

    pub fn get(&self, key: &str) -> Option<&Permission> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Permission> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_names_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_name(op.name()), Some(op));
            for alias in op.aliases() {
                assert_eq!(Operator::from_name(alias), Some(op));
            }
        }
    }

    #[test]
    fn test_operator_unknown_name() {
        assert_eq!(Operator::from_name("rename"), None);
        assert_eq!(Operator::from_name("SET"), None);
    }

    #[test]
    fn test_update_tree_keeps_declaration_order() {
        let tree = UpdateTree::new()
            .leaf("b", 1)
            .nested("a", UpdateTree::new().leaf("x", true))
            .leaf("c", json!([1]));
        let keys: Vec<&str> = tree.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert!(tree.get("a").unwrap().as_nested().is_some());
        assert_eq!(tree.get("c").unwrap().as_leaf(), Some(&json!([1])));
    }

    #[test]
    fn test_blanket_allow() {
        assert!(Permission::Allow.is_blanket_allow());
        assert!(!Permission::Deny.is_blanket_allow());
        let all = PermissionTree::new().allow("a").tree("b", PermissionTree::new().allow("c"));
        assert!(Permission::Tree(all).is_blanket_allow());
        let mixed = PermissionTree::new().allow("a").deny("b");
        assert!(!Permission::Tree(mixed).is_blanket_allow());
        assert!(!Permission::Tree(PermissionTree::new()).is_blanket_allow());
    }
}
