//! Auto-vivifying configuration tree describing one experiment.
//!
//! A [`ConfigTree`] is a nested string-keyed mapping in which every entry is
//! either a leaf [`Value`] or another subtree. Traversal through a missing
//! key creates an empty subtree instead of failing, so campaign scripts can
//! write deep paths without declaring intermediate sections first. The only
//! structural error is a type mismatch: a path that asks an existing leaf to
//! act as a subtree.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CachelabError, ErrorInfo};

/// A single tree entry: a nested subtree or a leaf value.
///
/// JSON objects are always represented as `Branch`; [`Node::from_value`]
/// converts them on the way in, so a key never ambiguously holds both an
/// object-shaped leaf and a subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Nested subtree.
    Branch(ConfigTree),
    /// Scalar or list leaf value.
    Leaf(Value),
}

impl Node {
    /// Converts a JSON value into a node, recursively turning objects into
    /// subtrees.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, value)| (key, Node::from_value(value)))
                    .collect();
                Node::Branch(ConfigTree { entries })
            }
            other => Node::Leaf(other),
        }
    }

    /// Returns the subtree if this node is a branch.
    pub fn as_branch(&self) -> Option<&ConfigTree> {
        match self {
            Node::Branch(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }

    /// Returns the value if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Node::Branch(_) => None,
            Node::Leaf(value) => Some(value),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from_value(value)
    }
}

/// Nested, auto-vivifying configuration structure.
///
/// Entries are kept in a `BTreeMap` so iteration and serialization order are
/// deterministic. Cloning performs a deep copy: the tree owns every node,
/// list, and mapping it contains, so a clone shares no state with its
/// source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    entries: BTreeMap<String, Node>,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of direct entries under the root.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the node at `path`, creating empty subtrees for every missing
    /// key along the way, the final one included.
    ///
    /// Fails with a type mismatch when the path runs through an existing
    /// leaf value.
    pub fn get<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut Node, CachelabError> {
        let Some((last, prefix)) = path.split_last() else {
            return Err(empty_path("get"));
        };
        let parent = descend(self, prefix, path)?;
        Ok(parent
            .entries
            .entry(last.as_ref().to_string())
            .or_insert_with(|| Node::Branch(ConfigTree::new())))
    }

    /// Writes `value` at `path`, creating missing intermediate subtrees.
    ///
    /// An object value is converted into a subtree; anything already stored
    /// at the final key is replaced. Fails with a type mismatch when an
    /// intermediate key holds a leaf.
    pub fn set<S: AsRef<str>>(
        &mut self,
        path: &[S],
        value: impl Into<Value>,
    ) -> Result<(), CachelabError> {
        let Some((last, prefix)) = path.split_last() else {
            return Err(empty_path("set"));
        };
        let parent = descend(self, prefix, path)?;
        parent
            .entries
            .insert(last.as_ref().to_string(), Node::from_value(value.into()));
        Ok(())
    }

    /// Non-vivifying probe: returns the node at `path` or `None`.
    ///
    /// Never mutates the tree; a missing or leaf-blocked path is simply
    /// `None`, which is what result filtering relies on.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let node = self.entries.get(first.as_ref())?;
        if rest.is_empty() {
            return Some(node);
        }
        node.as_branch()?.lookup(rest)
    }

    /// Leaf value at `path`, or `None` when absent or a subtree.
    pub fn leaf_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        self.lookup(path)?.as_leaf()
    }

    /// Recursively overlays `other` onto a copy of `self`.
    ///
    /// Keys absent from `other` are preserved; keys present in both recurse
    /// when both sides are subtrees, otherwise `other`'s entry wins. Merging
    /// is total and never raises.
    pub fn merge(&self, other: &ConfigTree) -> ConfigTree {
        let mut merged = self.clone();
        merged.overlay(other);
        merged
    }

    fn overlay(&mut self, other: &ConfigTree) {
        for (key, incoming) in &other.entries {
            match self.entries.entry(key.clone()) {
                Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                    (Node::Branch(existing), Node::Branch(sub)) => existing.overlay(sub),
                    (slot_node, node) => *slot_node = node.clone(),
                },
                Entry::Vacant(slot) => {
                    slot.insert(incoming.clone());
                }
            }
        }
    }

    /// Enumerates every `(path, leaf value)` pair in depth-first key order.
    pub fn leaves(&self) -> Vec<(Vec<String>, &Value)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        prefix: &mut Vec<String>,
        out: &mut Vec<(Vec<String>, &'a Value)>,
    ) {
        for (key, node) in &self.entries {
            prefix.push(key.clone());
            match node {
                Node::Leaf(value) => out.push((prefix.clone(), value)),
                Node::Branch(sub) => sub.collect_leaves(prefix, out),
            }
            prefix.pop();
        }
    }
}

fn descend<'a, S: AsRef<str>>(
    tree: &'a mut ConfigTree,
    prefix: &[S],
    full_path: &[S],
) -> Result<&'a mut ConfigTree, CachelabError> {
    let Some((key, rest)) = prefix.split_first() else {
        return Ok(tree);
    };
    let node = tree
        .entries
        .entry(key.as_ref().to_string())
        .or_insert_with(|| Node::Branch(ConfigTree::new()));
    match node {
        Node::Branch(sub) => descend(sub, rest, full_path),
        Node::Leaf(_) => Err(type_mismatch(full_path, key.as_ref())),
    }
}

fn type_mismatch<S: AsRef<str>>(path: &[S], key: &str) -> CachelabError {
    CachelabError::Tree(
        ErrorInfo::new(
            "tree-type-mismatch",
            "path traverses an existing leaf value",
        )
        .with_context("path", join_path(path))
        .with_context("key", key),
    )
}

fn empty_path(operation: &str) -> CachelabError {
    CachelabError::Tree(
        ErrorInfo::new("tree-empty-path", "tree operations require a non-empty path")
            .with_context("operation", operation),
    )
}

fn join_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}
