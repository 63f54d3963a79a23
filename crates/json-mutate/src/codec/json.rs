//! JSON codec for update requests and permission trees.
//!
//! Update requests are objects keyed by operator name (`"set"`, `"$inc"`,
//! ...). Inside an operator, JSON objects become nested trees and every
//! other value becomes a leaf operand. An object operand (for example a whole
//! object assigned by `set`) cannot be written in this form; build the
//! [`UpdateTree`] with [`UpdateNode::Leaf`] instead.

use serde_json::{Map, Value};

use crate::error::MutateError;
use crate::types::{Operator, Permission, PermissionTree, UpdateNode, UpdateRequest, UpdateTree};

// ── Update requests ───────────────────────────────────────────────────────

fn decode_tree(map: &Map<String, Value>) -> UpdateTree {
    map.iter()
        .map(|(key, value)| {
            let node = match value {
                Value::Object(sub) => UpdateNode::Nested(decode_tree(sub)),
                other => UpdateNode::Leaf(other.clone()),
            };
            (key.clone(), node)
        })
        .collect()
}

fn encode_tree(tree: &UpdateTree) -> Value {
    let mut map = Map::with_capacity(tree.len());
    for (key, node) in tree {
        let value = match node {
            UpdateNode::Leaf(v) => v.clone(),
            UpdateNode::Nested(sub) => encode_tree(sub),
        };
        map.insert(key.clone(), value);
    }
    Value::Object(map)
}

/// Decodes an update request.
pub fn decode_update(value: &Value) -> Result<UpdateRequest, MutateError> {
    let map = value
        .as_object()
        .ok_or_else(|| MutateError::InvalidUpdate("update must be an object".into()))?;
    let mut update = UpdateRequest::new();
    for (name, body) in map {
        let op = Operator::from_name(name).ok_or_else(|| MutateError::UnknownOperator(name.clone()))?;
        let body = body
            .as_object()
            .ok_or_else(|| MutateError::InvalidUpdate(format!("{name} must be an object")))?;
        if update.insert(op, decode_tree(body)).is_some() {
            return Err(MutateError::InvalidUpdate(format!("{op} given more than once")));
        }
    }
    Ok(update)
}

/// Parses and decodes an update request from JSON text.
pub fn parse_update(src: &str) -> Result<UpdateRequest, MutateError> {
    decode_update(&serde_json::from_str(src)?)
}

/// Encodes an update request with canonical operator names.
pub fn encode_update(update: &UpdateRequest) -> Value {
    let mut map = Map::with_capacity(update.len());
    for (op, tree) in update.iter() {
        map.insert(op.name().to_string(), encode_tree(tree));
    }
    Value::Object(map)
}

// ── Permission trees ──────────────────────────────────────────────────────

fn decode_permission(path: &str, value: &Value) -> Result<Permission, MutateError> {
    match value {
        Value::Bool(allowed) => Ok(Permission::from(*allowed)),
        Value::Object(map) => {
            let mut tree = PermissionTree::new();
            for (key, sub) in map {
                tree.insert(key.clone(), decode_permission(&format!("{path}.{key}"), sub)?);
            }
            Ok(Permission::Tree(tree))
        }
        _ => Err(MutateError::InvalidPermission(format!(
            "{path} must be a boolean or an object"
        ))),
    }
}

fn encode_permission(permission: &Permission) -> Value {
    match permission {
        Permission::Allow => Value::Bool(true),
        Permission::Deny => Value::Bool(false),
        Permission::Tree(tree) => encode_permissions(tree),
    }
}

/// Decodes a permission tree. Top-level keys naming an operator (by name or
/// alias) are stored under the canonical name; unknown top-level keys are
/// kept as they are.
pub fn decode_permissions(value: &Value) -> Result<PermissionTree, MutateError> {
    let map = value
        .as_object()
        .ok_or_else(|| MutateError::InvalidPermission("permissions must be an object".into()))?;
    let mut tree = PermissionTree::new();
    for (key, sub) in map {
        let key = Operator::from_name(key).map_or_else(|| key.clone(), |op| op.name().to_string());
        let permission = decode_permission(&key, sub)?;
        tree.insert(key, permission);
    }
    Ok(tree)
}

/// Parses and decodes a permission tree from JSON text.
pub fn parse_permissions(src: &str) -> Result<PermissionTree, MutateError> {
    decode_permissions(&serde_json::from_str(src)?)
}

/// Encodes a permission tree: `true`, `false` or nested objects.
pub fn encode_permissions(tree: &PermissionTree) -> Value {
    let mut map = Map::with_capacity(tree.len());
    for (key, permission) in tree.iter() {
        map.insert(key.clone(), encode_permission(permission));
    }
    Value::Object(map)
}
