//! Tree-to-table adapter for configuration trees.
//!
//! [`ConfigModel`] exposes a [`ConfigTree`](crate::tree::ConfigTree) through
//! the [`ItemModel`] protocol as a two-column table: column 0 shows each
//! node's key, column 1 shows (and edits) its value. Only column-0 cells
//! have children, which is what makes the tree render as an expandable
//! key/value grid.

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{Key, KeyData};
use trellis_core::Signal;

use crate::model::index::ModelIndex;
use crate::model::role::{CheckState, ItemData, ItemRole};
use crate::model::traits::{ItemFlags, ItemModel, ModelSignals, Orientation};
use crate::tree::{ConfigTree, ConfigValue, NodeId};

/// Column showing node keys.
pub const KEY_COLUMN: usize = 0;
/// Column showing node values.
pub const VALUE_COLUMN: usize = 1;

/// An editable two-column item model over a configuration tree.
///
/// The model does not copy the tree: it adapts it. Node handles ride inside
/// each [`ModelIndex`] as the internal ID, so every protocol call resolves
/// straight back to the arena.
///
/// # Signals
///
/// Besides the standard [`ModelSignals`], the model owns a
/// [`value_edited`](Self::value_edited) signal carrying the key of the
/// entry that changed, or `None` when a multi-cell refresh makes the
/// specific key unknowable. Application code that only cares about "the
/// configuration changed" connects here instead of to `data_changed`.
pub struct ConfigModel {
    tree: Arc<RwLock<ConfigTree>>,
    signals: ModelSignals,
    value_edited: Signal<Option<String>>,
}

impl ConfigModel {
    /// Create a model owning the given tree.
    pub fn new(tree: ConfigTree) -> Self {
        Self::with_shared(Arc::new(RwLock::new(tree)))
    }

    /// Create a model over a tree shared with other owners.
    pub fn with_shared(tree: Arc<RwLock<ConfigTree>>) -> Self {
        Self {
            tree,
            signals: ModelSignals::new(),
            value_edited: Signal::new(),
        }
    }

    /// The shared tree handle.
    pub fn tree(&self) -> Arc<RwLock<ConfigTree>> {
        self.tree.clone()
    }

    /// Signal emitted after a value edit, carrying the edited key.
    ///
    /// `None` means several cells changed at once and no single key can be
    /// named.
    pub fn value_edited(&self) -> &Signal<Option<String>> {
        &self.value_edited
    }

    /// Replace the whole tree, notifying views via the reset signals.
    pub fn reset_tree(&self, new_tree: ConfigTree) {
        self.signals.emit_reset(|| {
            *self.tree.write() = new_tree;
        });
        tracing::debug!(target: "trellis::model", "model reset with new tree");
    }

    /// The node behind an index. An invalid index addresses the root.
    pub fn node_for_index(&self, index: &ModelIndex) -> NodeId {
        if index.is_valid() {
            NodeId::from(KeyData::from_ffi(index.internal_id()))
        } else {
            self.tree.read().root()
        }
    }

    /// Build the column-`column` index addressing `id`.
    ///
    /// The root maps to the invalid index.
    pub fn index_for_node(&self, id: NodeId, column: usize) -> ModelIndex {
        let tree = self.tree.read();
        self.index_for_node_locked(&tree, id, column)
    }

    fn index_for_node_locked(&self, tree: &ConfigTree, id: NodeId, column: usize) -> ModelIndex {
        if id == tree.root() {
            return ModelIndex::invalid();
        }
        let Some(row) = tree.row_in_parent(id) else {
            return ModelIndex::invalid();
        };
        let parent = tree
            .node(id)
            .and_then(|n| n.parent())
            .map(|p| self.index_for_node_locked(tree, p, KEY_COLUMN))
            .unwrap_or_else(ModelIndex::invalid);
        ModelIndex::new(row, column, parent, id.data().as_ffi())
    }

    /// Resolve a key path to an index, for programmatic navigation.
    pub fn index_at_path(&self, path: &[&str], column: usize) -> Option<ModelIndex> {
        let id = self.tree.read().node_at_path(path).ok()?;
        Some(self.index_for_node(id, column))
    }

    /// Emit change notifications for the cell range `top..=bottom`.
    ///
    /// `data_changed` always fires; `value_edited` carries the key when the
    /// range is a single cell and `None` otherwise.
    pub fn announce_data_changed(
        &self,
        top: ModelIndex,
        bottom: ModelIndex,
        roles: Vec<ItemRole>,
    ) {
        let key = if top == bottom {
            let id = self.node_for_index(&top);
            let tree = self.tree.read();
            tree.node(id).and_then(|n| n.key()).map(str::to_string)
        } else {
            None
        };
        self.signals
            .data_changed
            .emit((top, bottom, roles));
        self.value_edited.emit(key);
    }

    fn value_text(node_value: Option<&ConfigValue>) -> String {
        // Branches render as empty cells; Null leaves render as "None".
        node_value.map(ConfigValue::to_string).unwrap_or_default()
    }
}

impl ItemModel for ConfigModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        // Only key-column cells have children; this keeps the view from
        // drawing a duplicate subtree under every value cell.
        if parent.is_valid() && parent.column() != KEY_COLUMN {
            return 0;
        }
        // Resolve the handle before locking: resolving an invalid index
        // takes the read lock itself.
        let id = self.node_for_index(parent);
        self.tree.read().child_count(id)
    }

    fn column_count(&self, _parent: &ModelIndex) -> usize {
        2
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        if !index.is_valid() {
            return ItemData::None;
        }
        let id = self.node_for_index(index);
        let tree = self.tree.read();
        let Some(node) = tree.node(id) else {
            return ItemData::None;
        };

        match (index.column(), role) {
            (KEY_COLUMN, ItemRole::Display | ItemRole::ToolTip) => {
                ItemData::String(node.key().unwrap_or_default().to_string())
            }
            (VALUE_COLUMN, ItemRole::Display | ItemRole::Edit | ItemRole::ToolTip) => {
                ItemData::String(Self::value_text(node.value()))
            }
            (VALUE_COLUMN, ItemRole::CheckState) => match node.value() {
                Some(&ConfigValue::Bool(b)) => ItemData::CheckState(CheckState::from(b)),
                _ => ItemData::None,
            },
            _ => ItemData::None,
        }
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if column >= 2 || (parent.is_valid() && parent.column() != KEY_COLUMN) {
            return ModelIndex::invalid();
        }
        let id = self.node_for_index(parent);
        let tree = self.tree.read();
        match tree.child_at(id, row) {
            Some(id) => ModelIndex::new(row, column, parent.clone(), id.data().as_ffi()),
            None => ModelIndex::invalid(),
        }
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        if !index.is_valid() {
            return ModelIndex::invalid();
        }
        let id = self.node_for_index(index);
        let tree = self.tree.read();
        let Some(node) = tree.node(id) else {
            return ModelIndex::invalid();
        };
        match node.parent() {
            Some(parent_id) => self.index_for_node_locked(&tree, parent_id, KEY_COLUMN),
            None => ModelIndex::invalid(),
        }
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn set_data(&self, index: &ModelIndex, value: ItemData, role: ItemRole) -> bool {
        if !index.is_valid() || index.column() != VALUE_COLUMN {
            return false;
        }
        let id = self.node_for_index(index);

        // Mutate under the write lock, then notify with the lock released:
        // slots are free to read the model back.
        let stored = {
            let mut tree = self.tree.write();
            let Some(node) = tree.node(id) else {
                return false;
            };
            if !node.is_leaf() {
                return false;
            }

            // Writes come in under Edit (text) or CheckState (checkbox)
            // only; Display is a read-side role.
            let result = match role {
                ItemRole::Edit => {
                    let text = match value {
                        ItemData::String(s) => s,
                        ItemData::Int(n) => n.to_string(),
                        ItemData::Float(f) => f.to_string(),
                        ItemData::Bool(b) => b.to_string(),
                        _ => return false,
                    };
                    tree.set_value_from_text(id, &text)
                }
                ItemRole::CheckState => {
                    let checked = match value {
                        ItemData::CheckState(state) => state.is_fully_checked(),
                        ItemData::Bool(b) => b,
                        _ => return false,
                    };
                    let stored = ConfigValue::Bool(checked);
                    tree.set_value(id, stored.clone()).map(|_| stored)
                }
                _ => return false,
            };

            match result {
                Ok(stored) => stored,
                Err(err) => {
                    tracing::warn!(target: "trellis::model", %err, "edit rejected");
                    return false;
                }
            }
        };

        tracing::debug!(
            target: "trellis::model",
            row = index.row(),
            %stored,
            "value committed"
        );
        self.announce_data_changed(
            index.clone(),
            index.clone(),
            vec![ItemRole::Display, role],
        );
        true
    }

    fn flags(&self, index: &ModelIndex) -> ItemFlags {
        if !index.is_valid() {
            return ItemFlags::disabled();
        }
        if index.column() == KEY_COLUMN {
            return ItemFlags::new();
        }
        let id = self.node_for_index(index);
        let tree = self.tree.read();
        match tree.node(id).and_then(|n| n.value()) {
            // Booleans toggle via checkbox rather than a text editor.
            Some(ConfigValue::Bool(_)) => ItemFlags::checkable(),
            Some(_) => ItemFlags::editable(),
            // Branch value cells are visible but inert.
            None => ItemFlags::disabled().with_enabled(true),
        }
    }

    fn header_data(&self, section: usize, orientation: Orientation, role: ItemRole) -> ItemData {
        if orientation != Orientation::Horizontal || role != ItemRole::Display {
            return ItemData::None;
        }
        match section {
            KEY_COLUMN => ItemData::String("Key".to_string()),
            VALUE_COLUMN => ItemData::String("Value".to_string()),
            _ => ItemData::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn sample_model() -> ConfigModel {
        let tree = ConfigTree::from_value(&json!({
            "algo1": { "opt1": 1, "opt2": 2 },
            "algo2": { "opt1": 1, "opt2": 2.2, "opt3": null },
            "flag": true,
            "general_opt": "abc",
        }))
        .unwrap();
        ConfigModel::new(tree)
    }

    #[test]
    fn test_dimensions() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        assert_eq!(model.row_count(&root), 4);
        assert_eq!(model.column_count(&root), 2);

        let algo1 = model.index(0, KEY_COLUMN, &root);
        assert_eq!(model.row_count(&algo1), 2);
    }

    #[test]
    fn test_only_key_column_has_children() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let algo1_value = model.index(0, VALUE_COLUMN, &root);
        assert!(algo1_value.is_valid());
        assert_eq!(model.row_count(&algo1_value), 0);
        assert!(!model.has_children(&algo1_value));
        assert!(!model.index(0, KEY_COLUMN, &algo1_value).is_valid());
    }

    #[test]
    fn test_display_data() {
        let model = sample_model();
        let root = ModelIndex::invalid();

        let algo1 = model.index(0, KEY_COLUMN, &root);
        assert_eq!(model.display_text(&algo1).as_deref(), Some("algo1"));
        // Branch value cells render empty.
        let algo1_value = model.index(0, VALUE_COLUMN, &root);
        assert_eq!(model.display_text(&algo1_value).as_deref(), Some(""));

        let opt1_value = model.index(0, VALUE_COLUMN, &algo1);
        assert_eq!(model.display_text(&opt1_value).as_deref(), Some("1"));

        // Null leaves render as "None".
        let algo2 = model.index(1, KEY_COLUMN, &root);
        let opt3_value = model.index(2, VALUE_COLUMN, &algo2);
        assert_eq!(model.display_text(&opt3_value).as_deref(), Some("None"));
    }

    #[test]
    fn test_parent_round_trip() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let algo1 = model.index(0, KEY_COLUMN, &root);
        let opt2 = model.index(1, KEY_COLUMN, &algo1);

        assert_eq!(model.parent(&opt2), algo1);
        assert!(!model.parent(&algo1).is_valid());
        assert!(!model.parent(&root).is_valid());
    }

    #[test]
    fn test_out_of_range_index_is_invalid() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        assert!(!model.index(99, KEY_COLUMN, &root).is_valid());
        assert!(!model.index(0, 2, &root).is_valid());
    }

    #[test]
    fn test_header_data() {
        let model = sample_model();
        assert_eq!(
            model
                .header_data(0, Orientation::Horizontal, ItemRole::Display)
                .as_string(),
            Some("Key")
        );
        assert_eq!(
            model
                .header_data(1, Orientation::Horizontal, ItemRole::Display)
                .as_string(),
            Some("Value")
        );
        assert!(
            model
                .header_data(0, Orientation::Vertical, ItemRole::Display)
                .is_none()
        );
    }

    #[test]
    fn test_flags() {
        let model = sample_model();
        let root = ModelIndex::invalid();

        let algo1 = model.index(0, KEY_COLUMN, &root);
        let key_flags = model.flags(&algo1);
        assert!(key_flags.selectable && key_flags.enabled && !key_flags.editable);

        let branch_value = model.index(0, VALUE_COLUMN, &root);
        let flags = model.flags(&branch_value);
        assert!(flags.enabled && !flags.editable && !flags.checkable);

        let flag_value = model.index(2, VALUE_COLUMN, &root);
        assert!(model.flags(&flag_value).checkable);

        let str_value = model.index(3, VALUE_COLUMN, &root);
        assert!(model.flags(&str_value).editable);
    }

    #[test]
    fn test_set_data_edits_value() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let algo1 = model.index(0, KEY_COLUMN, &root);
        let opt1_value = model.index(0, VALUE_COLUMN, &algo1);

        assert!(model.set_data(&opt1_value, ItemData::from("2.5"), ItemRole::Edit));
        assert_eq!(model.display_text(&opt1_value).as_deref(), Some("2.5"));

        let tree = model.tree();
        let tree = tree.read();
        let id = tree.node_at_path(&["algo1", "opt1"]).unwrap();
        assert_eq!(tree.node(id).unwrap().value(), Some(&ConfigValue::Float(2.5)));
    }

    #[test]
    fn test_set_data_rejects_read_side_roles() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let general = model.index(3, VALUE_COLUMN, &root);

        assert!(!model.set_data(&general, ItemData::from("x"), ItemRole::Display));
        assert!(!model.set_data(&general, ItemData::from("x"), ItemRole::ToolTip));
        assert_eq!(model.display_text(&general).as_deref(), Some("abc"));
    }

    #[test]
    fn test_set_data_rejects_key_column_and_branches() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let algo1 = model.index(0, KEY_COLUMN, &root);
        let branch_value = model.index(0, VALUE_COLUMN, &root);

        assert!(!model.set_data(&algo1, ItemData::from("x"), ItemRole::Edit));
        assert!(!model.set_data(&branch_value, ItemData::from("x"), ItemRole::Edit));
    }

    #[test]
    fn test_set_data_emits_once_after_store() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let general = model.index(3, VALUE_COLUMN, &root);

        // Record what the model reports at emit time; the new value must
        // already be observable from within the slot.
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let tree = model.tree();
        let seen_clone = seen.clone();
        let _guard = model.signals().data_changed.connect_scoped(move |args| {
            let (top, bottom, _) = args;
            assert_eq!(top, bottom);
            let tree = tree.read();
            let id = tree.node_at_path(&["general_opt"]).unwrap();
            seen_clone
                .lock()
                .unwrap()
                .push(tree.node(id).unwrap().value().unwrap().to_string());
        });

        assert!(model.set_data(&general, ItemData::from("xyz"), ItemRole::Edit));
        assert_eq!(*seen.lock().unwrap(), vec!["xyz".to_string()]);
    }

    #[test]
    fn test_value_edited_carries_key() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let general = model.index(3, VALUE_COLUMN, &root);

        let keys: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let keys_clone = keys.clone();
        let _guard = model.value_edited().connect_scoped(move |key| {
            keys_clone.lock().unwrap().push(key.clone());
        });

        assert!(model.set_data(&general, ItemData::from("42"), ItemRole::Edit));
        assert_eq!(
            *keys.lock().unwrap(),
            vec![Some("general_opt".to_string())]
        );
    }

    #[test]
    fn test_announce_batch_has_no_key() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let first = model.index(2, VALUE_COLUMN, &root);
        let last = model.index(3, VALUE_COLUMN, &root);

        let keys: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let keys_clone = keys.clone();
        let _guard = model.value_edited().connect_scoped(move |key| {
            keys_clone.lock().unwrap().push(key.clone());
        });

        model.announce_data_changed(first, last, vec![ItemRole::Display]);
        assert_eq!(*keys.lock().unwrap(), vec![None]);
    }

    #[test]
    fn test_checkbox_toggles_bool() {
        let model = sample_model();
        let root = ModelIndex::invalid();
        let flag_value = model.index(2, VALUE_COLUMN, &root);

        assert_eq!(model.check_state(&flag_value), Some(CheckState::Checked));
        assert!(model.set_check_state(&flag_value, CheckState::Unchecked));
        assert_eq!(model.check_state(&flag_value), Some(CheckState::Unchecked));
        assert_eq!(model.display_text(&flag_value).as_deref(), Some("false"));
    }

    #[test]
    fn test_index_at_path() {
        let model = sample_model();
        let index = model.index_at_path(&["algo2", "opt2"], VALUE_COLUMN).unwrap();
        assert_eq!(model.display_text(&index).as_deref(), Some("2.2"));
        assert!(model.index_at_path(&["missing"], 0).is_none());
    }

    #[test]
    fn test_reset_tree() {
        let model = sample_model();
        let resets = Arc::new(Mutex::new(0));
        let resets_clone = resets.clone();
        let _guard = model.signals().model_reset.connect_scoped(move |_| {
            *resets_clone.lock().unwrap() += 1;
        });

        model.reset_tree(ConfigTree::from_value(&json!({ "only": 1 })).unwrap());
        assert_eq!(*resets.lock().unwrap(), 1);
        assert_eq!(model.row_count(&ModelIndex::invalid()), 1);
    }
}
