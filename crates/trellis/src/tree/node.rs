//! The configuration tree.
//!
//! A [`ConfigTree`] holds every node of a hierarchical configuration in a
//! keyed arena ([`slotmap::SlotMap`]). Nodes refer to their parent and
//! children by [`NodeId`], so the parent back-reference is a plain non-owning
//! handle and no reference cycles exist. The tree is the single source of
//! truth for values; views and models hold it behind shared references and
//! read through [`NodeId`]s.
//!
//! Every node is exactly one of:
//!
//! - a **leaf**: holds a [`ConfigValue`] scalar and has no children, or
//! - a **branch**: holds no value and owns an ordered set of named children.
//!
//! Mixing the two is a structural error. A freshly attached node starts as an
//! empty branch and becomes a leaf the first time a value is stored on it.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use trellis::tree::ConfigTree;
//!
//! let tree = ConfigTree::from_value(&json!({
//!     "algo1": { "opt1": 1, "opt2": 2 },
//!     "general_opt": "abc",
//! }))
//! .unwrap();
//!
//! assert_eq!(tree.child_count(tree.root()), 2);
//! assert_eq!(
//!     tree.to_value(tree.root()).unwrap(),
//!     json!({ "algo1": { "opt1": 1, "opt2": 2 }, "general_opt": "abc" }),
//! );
//! ```

use serde_json::{Map, Number, Value};
use slotmap::{SlotMap, new_key_type};

use crate::error::{ConfigError, Result};
use crate::smartcast::smartcast;

use super::IndexedMap;

new_key_type! {
    /// Handle to a node inside a [`ConfigTree`] arena.
    pub struct NodeId;
}

/// A scalar configuration value.
///
/// This is the output domain of the smart-cast parser. `Null` is a real
/// stored value (a leaf can legitimately hold "nothing"); it is distinct from
/// the branch state, which has no value at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
}

impl ConfigValue {
    /// Convert a JSON scalar into a `ConfigValue`.
    ///
    /// Containers are rejected: objects become branches at the tree level,
    /// and arrays are not part of the configuration data model.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                // Out-of-range u64s and actual floats both land here.
                None => Ok(Self::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Array(_) => Err(ConfigError::UnsupportedSource { kind: "an array" }),
            Value::Object(_) => Err(ConfigError::UnsupportedSource { kind: "a mapping" }),
        }
    }

    /// Convert back into a JSON value.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::Number(Number::from(*i)),
            Self::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Str(s) => Value::String(s.clone()),
        }
    }

    /// The numeric content, if this value is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether this value is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }
}

impl std::fmt::Display for ConfigValue {
    /// Renders the value as cell text. `Null` displays as the literal
    /// string `None`, matching what the smart-cast parser reads back.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Editing metadata attached to a node.
///
/// The editor-selection policy is derived entirely from this: `choices`
/// selects a combo box, a numeric bound or step selects a spin box, and a
/// bare leaf gets a free-text editor.
#[derive(Debug, Clone, Default)]
pub struct NodeMeta {
    /// Finite set of legal values, if the entry is an enumeration.
    pub choices: Option<Vec<ConfigValue>>,
    /// Lower bound for numeric values.
    pub min_value: Option<f64>,
    /// Upper bound for numeric values.
    pub max_value: Option<f64>,
    /// Spin-box step size.
    pub step_value: Option<f64>,
    /// Whether the entry may be set to null from an editor.
    pub nullable: bool,
}

impl NodeMeta {
    /// Clamp `value` into `[min_value, max_value]`.
    ///
    /// Only applies when both bounds are configured and the value is
    /// numeric; everything else passes through untouched. An integer that
    /// clamps onto a whole bound stays an integer.
    pub fn clamp(&self, value: ConfigValue) -> ConfigValue {
        let (Some(lo), Some(hi)) = (self.min_value, self.max_value) else {
            return value;
        };
        match value {
            ConfigValue::Int(i) => {
                let c = (i as f64).clamp(lo, hi);
                if c.fract() == 0.0 {
                    ConfigValue::Int(c as i64)
                } else {
                    ConfigValue::Float(c)
                }
            }
            ConfigValue::Float(v) if v.is_finite() => ConfigValue::Float(v.clamp(lo, hi)),
            other => other,
        }
    }
}

/// The leaf-or-branch state of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    /// No value; the node holds (or will hold) children.
    Branch,
    /// A scalar value; the node can never gain children.
    Leaf(ConfigValue),
}

/// One entry of a configuration tree.
///
/// Nodes are owned by the [`ConfigTree`] arena and addressed by [`NodeId`].
pub struct ConfigNode {
    key: Option<String>,
    parent: Option<NodeId>,
    payload: NodePayload,
    children: IndexedMap<NodeId>,
    meta: NodeMeta,
}

impl ConfigNode {
    fn new(key: Option<String>, parent: Option<NodeId>) -> Self {
        Self {
            key,
            parent,
            payload: NodePayload::Branch,
            children: IndexedMap::new(),
            meta: NodeMeta::default(),
        }
    }

    /// The key this node is stored under, or `None` for the root.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The parent handle, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The leaf-or-branch state.
    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    /// The stored value, if this node is a leaf.
    pub fn value(&self) -> Option<&ConfigValue> {
        match &self.payload {
            NodePayload::Leaf(value) => Some(value),
            NodePayload::Branch => None,
        }
    }

    /// Whether this node is a leaf. Leaves are the editable entries.
    pub fn is_leaf(&self) -> bool {
        matches!(self.payload, NodePayload::Leaf(_))
    }

    /// Whether this node is a branch (the no-value state).
    pub fn is_branch(&self) -> bool {
        matches!(self.payload, NodePayload::Branch)
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// The child stored under `key`.
    pub fn child(&self, key: &str) -> Option<NodeId> {
        self.children.get(key).copied()
    }

    /// The child at display position `row`.
    pub fn child_at(&self, row: usize) -> Option<NodeId> {
        self.children.value_at(row).copied()
    }

    /// Iterate `(key, child)` pairs in display order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(k, id)| (k, *id))
    }

    /// Editing metadata.
    pub fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    /// Mutable editing metadata.
    pub fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }
}

/// A hierarchical configuration tree backed by a node arena.
///
/// The root node always exists and is always a branch. All mutation goes
/// through the tree so the leaf/branch invariant can be enforced in one
/// place.
pub struct ConfigTree {
    nodes: SlotMap<NodeId, ConfigNode>,
    root: NodeId,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Create an empty tree containing only the root branch.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ConfigNode::new(None, None));
        Self { nodes, root }
    }

    /// Build a tree from a nested JSON mapping.
    ///
    /// Every object becomes a branch and every scalar becomes a leaf; child
    /// order follows the mapping's own iteration order. Anything other than
    /// an object at the top level is a type error.
    pub fn from_value(config: &Value) -> Result<Self> {
        let Value::Object(map) = config else {
            return Err(ConfigError::UnsupportedSource {
                kind: json_kind(config),
            });
        };
        let mut tree = Self::new();
        let root = tree.root;
        tree.graft(root, map)?;
        Ok(tree)
    }

    /// Coerce optional input into a tree.
    ///
    /// `None` yields an empty tree, a JSON object is converted with
    /// [`from_value`](Self::from_value), and any other JSON value is a type
    /// error. (An existing `ConfigTree` needs no coercion in a typed
    /// language: pass it along as-is.)
    pub fn coerce(data: Option<&Value>) -> Result<Self> {
        match data {
            None => Ok(Self::new()),
            Some(value) => Self::from_value(value),
        }
    }

    /// The root handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node, or `None` if the handle is stale.
    pub fn node(&self, id: NodeId) -> Option<&ConfigNode> {
        self.nodes.get(id)
    }

    /// Borrow a node mutably, or `None` if the handle is stale.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut ConfigNode> {
        self.nodes.get_mut(id)
    }

    /// Borrow a node, failing with [`ConfigError::StaleNode`].
    pub fn get(&self, id: NodeId) -> Result<&ConfigNode> {
        self.nodes.get(id).ok_or(ConfigError::StaleNode)
    }

    /// Attach a new (empty) child under `parent` at key `key`.
    ///
    /// Re-using an existing key replaces that child (mapping update
    /// semantics) while keeping its display position. Attaching under a leaf
    /// is a structural error.
    pub fn add_child(&mut self, parent: NodeId, key: impl Into<String>) -> Result<NodeId> {
        let key = key.into();
        let parent_node = self.get(parent)?;
        if parent_node.is_leaf() {
            return Err(ConfigError::LeafHasNoChildren { key });
        }

        let id = self
            .nodes
            .insert(ConfigNode::new(Some(key.clone()), Some(parent)));
        let replaced = self
            .nodes
            .get_mut(parent)
            .ok_or(ConfigError::StaleNode)?
            .children
            .insert(key, id);
        if let Some(old) = replaced {
            self.release_subtree(old);
        }
        Ok(id)
    }

    /// Attach a leaf holding `value` under `parent` at key `key`.
    pub fn add_leaf(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        value: ConfigValue,
    ) -> Result<NodeId> {
        let id = self.add_child(parent, key)?;
        self.set_value(id, value)?;
        Ok(id)
    }

    /// Store a value on a node, turning it into a leaf.
    ///
    /// Fails if the node already has children.
    pub fn set_value(&mut self, id: NodeId, value: ConfigValue) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(ConfigError::StaleNode)?;
        if !node.children.is_empty() {
            return Err(ConfigError::BranchHasNoValue {
                key: node.key.clone().unwrap_or_default(),
            });
        }
        node.payload = NodePayload::Leaf(value);
        Ok(())
    }

    /// Parse a textual edit and store the result.
    ///
    /// This is the sole mutation path used by editors: the text is
    /// smart-cast to the most specific scalar it can be, clamped into the
    /// node's numeric bounds when both are configured, and stored. Returns
    /// the value actually stored.
    pub fn set_value_from_text(&mut self, id: NodeId, text: &str) -> Result<ConfigValue> {
        let node = self.get(id)?;
        let value = node.meta.clamp(smartcast(text));
        tracing::debug!(
            target: "trellis::tree",
            key = node.key().unwrap_or("<root>"),
            %value,
            "storing edited value"
        );
        self.set_value(id, value.clone())?;
        Ok(value)
    }

    /// Remove a child. Unsupported by design: the tree is
    /// append/update-only, so this always fails.
    pub fn remove_child(&mut self, _parent: NodeId, _key: &str) -> Result<()> {
        Err(ConfigError::RemovalUnsupported)
    }

    /// Number of children under `id` (0 for leaves and stale handles).
    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes.get(id).map_or(0, |n| n.child_count())
    }

    /// The child of `parent` at display position `row`.
    pub fn child_at(&self, parent: NodeId, row: usize) -> Option<NodeId> {
        self.nodes.get(parent).and_then(|n| n.child_at(row))
    }

    /// The child of `parent` stored under `key`.
    pub fn child(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        self.nodes.get(parent).and_then(|n| n.child(key))
    }

    /// A node's position among its siblings, or `None` for the root.
    pub fn row_in_parent(&self, id: NodeId) -> Option<usize> {
        let node = self.nodes.get(id)?;
        let parent = self.nodes.get(node.parent?)?;
        parent.children.index_of(node.key.as_deref()?)
    }

    /// Walk a key path from the root.
    pub fn node_at_path(&self, path: &[&str]) -> Result<NodeId> {
        let mut current = self.root;
        for key in path {
            current = self
                .child(current, key)
                .ok_or_else(|| ConfigError::unknown_key(*key))?;
        }
        Ok(current)
    }

    /// Reconstruct the `(key, value)` pairs of a branch.
    ///
    /// Branch children appear as nested objects, leaves as their scalar
    /// value. Calling this on a leaf is a structural error: leaves have no
    /// items.
    pub fn items(&self, id: NodeId) -> Result<Vec<(String, Value)>> {
        let node = self.get(id)?;
        if node.is_leaf() {
            return Err(ConfigError::LeafHasNoItems {
                key: node.key.clone().unwrap_or_default(),
            });
        }
        let mut out = Vec::with_capacity(node.child_count());
        for (key, child_id) in node.children() {
            let child = self.get(child_id)?;
            let value = match child.value() {
                Some(v) => v.to_json(),
                None => self.to_value(child_id)?,
            };
            out.push((key.to_string(), value));
        }
        Ok(out)
    }

    /// Reconstruct the nested mapping rooted at `id`.
    ///
    /// Inverse of [`from_value`](Self::from_value): for any nested mapping
    /// of scalars with unique keys per level,
    /// `to_value(from_value(m).root()) == m`.
    pub fn to_value(&self, id: NodeId) -> Result<Value> {
        let mut map = Map::new();
        for (key, value) in self.items(id)? {
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    /// Render the tree as an indented debug listing.
    pub fn format_tree(&self) -> String {
        let mut out = String::from("<root>\n");
        self.format_children(self.root, "", &mut out);
        out
    }

    fn format_children(&self, id: NodeId, indent: &str, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let count = node.child_count();
        for (row, (key, child_id)) in node.children().enumerate() {
            let last = row + 1 == count;
            let branch = if last { "└─ " } else { "├─ " };
            out.push_str(indent);
            out.push_str(branch);
            out.push_str(key);
            if let Some(child) = self.nodes.get(child_id) {
                if let Some(value) = child.value() {
                    out.push_str(" = ");
                    out.push_str(&value.to_string());
                }
                out.push('\n');
                let next_indent = format!("{indent}{}", if last { "   " } else { "│  " });
                self.format_children(child_id, &next_indent, out);
            } else {
                out.push('\n');
            }
        }
    }

    fn graft(&mut self, parent: NodeId, map: &Map<String, Value>) -> Result<()> {
        for (key, value) in map {
            match value {
                Value::Object(child_map) => {
                    let id = self.add_child(parent, key.as_str())?;
                    self.graft(id, child_map)?;
                }
                scalar => {
                    let value = ConfigValue::from_json(scalar)?;
                    self.add_leaf(parent, key.as_str(), value)?;
                }
            }
        }
        Ok(())
    }

    /// Drop a replaced subtree from the arena.
    fn release_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        let children: Vec<NodeId> = node.children.values().copied().collect();
        for child in children {
            self.release_subtree(child);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "algo1": { "opt1": 1, "opt2": 2 },
            "algo2": { "opt1": 1, "opt2": 2 },
            "general_opt": "abc",
        })
    }

    #[test]
    fn test_round_trip() {
        let config = sample();
        let tree = ConfigTree::from_value(&config).unwrap();
        assert_eq!(tree.to_value(tree.root()).unwrap(), config);
    }

    #[test]
    fn test_round_trip_scalar_kinds() {
        let config = json!({
            "s": "text",
            "i": -3,
            "f": 0.25,
            "b": true,
            "n": null,
        });
        let tree = ConfigTree::from_value(&config).unwrap();
        assert_eq!(tree.to_value(tree.root()).unwrap(), config);
    }

    #[test]
    fn test_child_order_is_insertion_order() {
        let tree = ConfigTree::from_value(&sample()).unwrap();
        let root = tree.node(tree.root()).unwrap();
        let keys: Vec<_> = root.children().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["algo1", "algo2", "general_opt"]);
    }

    #[test]
    fn test_leaf_branch_exclusivity() {
        let tree = ConfigTree::from_value(&sample()).unwrap();
        let mut pending = vec![tree.root()];
        while let Some(id) = pending.pop() {
            let node = tree.node(id).unwrap();
            if node.is_leaf() {
                assert_eq!(node.child_count(), 0);
                assert!(node.value().is_some());
            } else {
                assert!(node.value().is_none());
            }
            pending.extend(node.children().map(|(_, id)| id));
        }
    }

    #[test]
    fn test_items_on_leaf_fails() {
        let tree = ConfigTree::from_value(&sample()).unwrap();
        let leaf = tree.node_at_path(&["general_opt"]).unwrap();
        assert!(matches!(
            tree.items(leaf),
            Err(ConfigError::LeafHasNoItems { .. })
        ));
    }

    #[test]
    fn test_add_child_under_leaf_fails() {
        let mut tree = ConfigTree::new();
        let leaf = tree
            .add_leaf(tree.root(), "x", ConfigValue::Int(1))
            .unwrap();
        assert!(matches!(
            tree.add_child(leaf, "y"),
            Err(ConfigError::LeafHasNoChildren { .. })
        ));
    }

    #[test]
    fn test_set_value_on_branch_fails() {
        let mut tree = ConfigTree::from_value(&sample()).unwrap();
        let branch = tree.node_at_path(&["algo1"]).unwrap();
        assert!(matches!(
            tree.set_value(branch, ConfigValue::Int(7)),
            Err(ConfigError::BranchHasNoValue { .. })
        ));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut tree = ConfigTree::from_value(&sample()).unwrap();
        let root = tree.root();
        tree.add_leaf(root, "algo1", ConfigValue::Str("replaced".into()))
            .unwrap();

        let node = tree.node(root).unwrap();
        let keys: Vec<_> = node.children().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["algo1", "algo2", "general_opt"]);

        let replaced = tree.node_at_path(&["algo1"]).unwrap();
        assert_eq!(
            tree.node(replaced).unwrap().value(),
            Some(&ConfigValue::Str("replaced".into()))
        );
    }

    #[test]
    fn test_coerce() {
        let empty = ConfigTree::coerce(None).unwrap();
        assert_eq!(empty.child_count(empty.root()), 0);

        let tree = ConfigTree::coerce(Some(&sample())).unwrap();
        assert_eq!(tree.child_count(tree.root()), 3);

        assert!(matches!(
            ConfigTree::coerce(Some(&json!([1, 2]))),
            Err(ConfigError::UnsupportedSource { .. })
        ));
        assert!(matches!(
            ConfigTree::coerce(Some(&json!(5))),
            Err(ConfigError::UnsupportedSource { .. })
        ));
    }

    #[test]
    fn test_removal_unsupported() {
        let mut tree = ConfigTree::from_value(&sample()).unwrap();
        let root = tree.root();
        assert!(matches!(
            tree.remove_child(root, "algo1"),
            Err(ConfigError::RemovalUnsupported)
        ));
        // Nothing changed.
        assert_eq!(tree.child_count(root), 3);
    }

    #[test]
    fn test_set_value_from_text_casts() {
        let mut tree = ConfigTree::from_value(&sample()).unwrap();
        let leaf = tree.node_at_path(&["algo1", "opt1"]).unwrap();

        assert_eq!(
            tree.set_value_from_text(leaf, "2.5").unwrap(),
            ConfigValue::Float(2.5)
        );
        assert_eq!(
            tree.set_value_from_text(leaf, "true").unwrap(),
            ConfigValue::Bool(true)
        );
        assert_eq!(
            tree.set_value_from_text(leaf, "None").unwrap(),
            ConfigValue::Null
        );
    }

    #[test]
    fn test_set_value_from_text_clamps() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let leaf = tree.add_leaf(root, "low", ConfigValue::Float(0.1)).unwrap();
        {
            let meta = tree.node_mut(leaf).unwrap().meta_mut();
            meta.min_value = Some(0.0);
            meta.max_value = Some(1.0);
        }

        assert_eq!(
            tree.set_value_from_text(leaf, "5").unwrap(),
            ConfigValue::Int(1)
        );
        assert_eq!(
            tree.set_value_from_text(leaf, "-0.5").unwrap(),
            ConfigValue::Float(0.0)
        );
        // Non-numeric input is not clamped.
        assert_eq!(
            tree.set_value_from_text(leaf, "hello").unwrap(),
            ConfigValue::Str("hello".into())
        );
    }

    #[test]
    fn test_row_in_parent() {
        let tree = ConfigTree::from_value(&sample()).unwrap();
        let general = tree.node_at_path(&["general_opt"]).unwrap();
        assert_eq!(tree.row_in_parent(general), Some(2));
        assert_eq!(tree.row_in_parent(tree.root()), None);
    }

    #[test]
    fn test_format_tree() {
        let tree = ConfigTree::from_value(&json!({
            "a": { "b": 1 },
            "c": "x",
        }))
        .unwrap();
        let rendered = tree.format_tree();
        assert!(rendered.contains("├─ a"));
        assert!(rendered.contains("└─ c = x"));
        assert!(rendered.contains("b = 1"));
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(ConfigValue::Null.to_string(), "None");
        assert_eq!(ConfigValue::Bool(true).to_string(), "true");
        assert_eq!(ConfigValue::Int(-2).to_string(), "-2");
        assert_eq!(ConfigValue::Float(0.8).to_string(), "0.8");
        assert_eq!(ConfigValue::Str("abc".into()).to_string(), "abc");
    }
}
