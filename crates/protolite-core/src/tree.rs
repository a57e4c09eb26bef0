//! Conversions between forests, flat lists, and keyed indexes.
//!
//! A forest is a slice of root nodes. Each node is an object whose
//! `"children"` field, when present, holds an array of child nodes.
//!
//! Walks over an existing forest (`to_list*`, `to_hash*`, `find_children`)
//! are iterative and visit nodes in pre-order: a node, then its children
//! from first to last. Building a forest from a flat list (`to_tree`)
//! recurses and is depth-limited.
//!
//! Keep-reference mode borrows the input nodes; the `*_cloned` variants
//! return deep copies instead.

use crate::clone::clone_single;
use crate::error::{ProtoError, Result};
use crate::limits::Limits;
use crate::types::{Map, Value};
use indexmap::IndexMap;

/// Field holding a node's children while walking a forest.
pub const CHILDREN_KEY: &str = "children";

/// Field names used by [`to_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeKeys<'a> {
    pub id: &'a str,
    pub parent_id: &'a str,
    pub children: &'a str,
}

impl Default for TreeKeys<'_> {
    fn default() -> Self {
        Self {
            id: "id",
            parent_id: "parent_id",
            children: CHILDREN_KEY,
        }
    }
}

fn children_of(node: &Value) -> &[Value] {
    match node.prop(CHILDREN_KEY) {
        Value::Array(children) => children,
        _ => &[],
    }
}

/// Flatten a forest in pre-order, borrowing every node.
pub fn to_list(forest: &[Value]) -> Vec<&Value> {
    to_list_with(forest, |node, _| node)
}

/// Flatten a forest in pre-order, mapping each node together with its
/// level (roots are level 0).
///
/// ```
/// use protolite_core::{to_list_with, Value};
///
/// let forest = Value::from_json(r#"[{"n":"a","children":[{"n":"b"}]},{"n":"c"}]"#).unwrap();
/// let rows = to_list_with(forest.as_array().unwrap(), |node, level| {
///     format!("{}{}", "-".repeat(level), node.prop("n"))
/// });
/// assert_eq!(rows, ["a", "-b", "c"]);
/// ```
pub fn to_list_with<'a, T, F>(forest: &'a [Value], mut visit: F) -> Vec<T>
where
    F: FnMut(&'a Value, usize) -> T,
{
    let mut list = Vec::new();
    let mut stack: Vec<(&'a Value, usize)> = forest.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, level)) = stack.pop() {
        list.push(visit(node, level));
        stack.extend(children_of(node).iter().rev().map(|child| (child, level + 1)));
    }
    list
}

/// Flatten a forest in pre-order, deep-copying every node.
pub fn to_list_cloned(forest: &[Value]) -> Result<Vec<Value>> {
    to_list_cloned_with(forest, |node, _| node)
}

/// Copying variant of [`to_list_with`]: `visit` receives an owned deep
/// copy of each node together with its level.
///
/// ```
/// use protolite_core::{to_list_cloned_with, Value};
///
/// let forest = Value::from_json(r#"[{"n":"a","children":[{"n":"b"}]}]"#).unwrap();
/// let rows = to_list_cloned_with(forest.as_array().unwrap(), |mut node, level| {
///     if let Some(fields) = node.as_object_mut() {
///         fields.insert("level".into(), Value::from(level));
///     }
///     node
/// })
/// .unwrap();
/// assert_eq!(rows[1].prop("level"), &Value::from(1));
/// assert!(forest.as_array().unwrap()[0].prop("level").is_undefined());
/// ```
pub fn to_list_cloned_with<T, F>(forest: &[Value], mut visit: F) -> Result<Vec<T>>
where
    F: FnMut(Value, usize) -> T,
{
    to_list_with(forest, |node, level| (node, level))
        .into_iter()
        .map(|(node, level)| clone_single(node, true).map(|copy| visit(copy, level)))
        .collect()
}

/// Index every node of a forest by the string form of its `key` field.
///
/// On duplicate keys the node visited last wins; each overwrite is logged
/// as a warning.
pub fn to_hash<'a>(forest: &'a [Value], key: &str) -> IndexMap<String, &'a Value> {
    index_forest(forest, key)
        .into_iter()
        .map(|(id, (node, _))| (id, node))
        .collect()
}

/// Like [`to_hash`], also recording each node's position among its
/// siblings.
pub fn to_hash_indexed<'a>(forest: &'a [Value], key: &str) -> IndexMap<String, (&'a Value, usize)> {
    index_forest(forest, key)
}

/// Copying variant of [`to_hash`] that builds an object. With `log_index`
/// each entry is a `[node, index]` pair.
pub fn to_hash_cloned(forest: &[Value], key: &str, log_index: bool) -> Result<Value> {
    let mut hash = Map::new();
    for (id, (node, index)) in index_forest(forest, key) {
        let node = clone_single(node, true)?;
        let entry = if log_index {
            Value::Array(vec![node, Value::from(index)])
        } else {
            node
        };
        hash.insert(id, entry);
    }
    Ok(Value::Object(hash))
}

fn index_forest<'a>(forest: &'a [Value], key: &str) -> IndexMap<String, (&'a Value, usize)> {
    let mut hash = IndexMap::new();
    if key.is_empty() {
        return hash;
    }
    let mut stack: Vec<(&'a Value, usize)> = forest.iter().enumerate().rev().map(|(i, node)| (node, i)).collect();
    while let Some((node, index)) = stack.pop() {
        let id = node.prop(key).to_string();
        if hash.insert(id.clone(), (node, index)).is_some() {
            tracing::warn!(key, id = %id, "duplicate tree key, keeping the later node");
        }
        stack.extend(
            children_of(node)
                .iter()
                .enumerate()
                .rev()
                .map(|(i, child)| (child, i)),
        );
    }
    hash
}

/// Build a forest from a flat list of parent-linked nodes.
///
/// Nodes with a falsy parent id become roots. Every node reachable from a
/// root receives a children array (possibly empty) holding, in list order,
/// the nodes whose parent id loosely equals its id (`1` matches `"1"`).
/// Nodes never reached from a root are dropped.
///
/// A parent chain that loops back onto one of its own ancestors fails with
/// [`ProtoError::InvalidInput`].
///
/// ```
/// use protolite_core::{to_tree, TreeKeys, Value};
///
/// let list = Value::from_json(
///     r#"[{"id":1,"parent_id":0},{"id":2,"parent_id":1},{"id":3,"parent_id":"1"}]"#,
/// ).unwrap();
/// let forest = to_tree(list.as_array().unwrap().clone(), &TreeKeys::default()).unwrap();
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].prop("children").as_array().unwrap().len(), 2);
/// ```
pub fn to_tree(list: Vec<Value>, keys: &TreeKeys<'_>) -> Result<Vec<Value>> {
    to_tree_with(list, keys, &Limits::default())
}

/// [`to_tree`] with a caller-supplied depth limit.
pub fn to_tree_with(list: Vec<Value>, keys: &TreeKeys<'_>, limits: &Limits) -> Result<Vec<Value>> {
    let (roots, candidates): (Vec<Value>, Vec<Value>) = list
        .into_iter()
        .partition(|node| !node.prop(keys.parent_id).is_truthy());
    tracing::debug!(roots = roots.len(), candidates = candidates.len(), "building tree");

    let builder = TreeBuilder {
        keys,
        candidates: &candidates,
        limits,
    };
    builder.attach(roots, &mut Vec::new())
}

struct TreeBuilder<'b> {
    keys: &'b TreeKeys<'b>,
    candidates: &'b [Value],
    limits: &'b Limits,
}

impl TreeBuilder<'_> {
    /// Give every node its children, recursively. `ancestors` holds the ids
    /// on the path from the root to `nodes`.
    fn attach(&self, mut nodes: Vec<Value>, ancestors: &mut Vec<Value>) -> Result<Vec<Value>> {
        if nodes.is_empty() {
            return Ok(nodes);
        }
        self.limits.check(ancestors.len())?;

        for node in &mut nodes {
            let id = node.prop(self.keys.id).clone();
            if ancestors.iter().any(|ancestor| ancestor.loose_eq(&id)) {
                return Err(ProtoError::InvalidInput(format!(
                    "parent chain loops back to {} {}",
                    self.keys.id, id
                )));
            }
            let children: Vec<Value> = self
                .candidates
                .iter()
                .filter(|candidate| candidate.prop(self.keys.parent_id).loose_eq(&id))
                .cloned()
                .collect();

            ancestors.push(id);
            let children = self.attach(children, ancestors)?;
            ancestors.pop();

            if let Value::Object(fields) = node {
                fields.insert(self.keys.children.to_string(), Value::Array(children));
            }
        }
        Ok(nodes)
    }
}

/// Depth-first search for the first node whose `key` field equals `target`.
///
/// ```
/// use protolite_core::{find_children, Value};
///
/// let forest = Value::from_json(r#"[{"id":1,"children":[{"id":7}]}]"#).unwrap();
/// let found = find_children(forest.as_array().unwrap(), &Value::from(7), "id");
/// assert_eq!(found.unwrap().prop("id"), &Value::from(7));
/// ```
pub fn find_children<'a>(forest: &'a [Value], target: &Value, key: &str) -> Option<&'a Value> {
    let mut stack: Vec<&'a Value> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.prop(key) == target {
            return Some(node);
        }
        stack.extend(children_of(node).iter().rev());
    }
    None
}
