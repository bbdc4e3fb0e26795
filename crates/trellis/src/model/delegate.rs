//! Editor selection and commit for configuration cells.
//!
//! [`ConfigDelegate`] decides which editor a value cell gets and moves data
//! between the editor and the model. The policy is driven entirely by the
//! node's [`NodeMeta`](crate::tree::NodeMeta): an enumerated entry gets a
//! combo box, a numerically constrained entry gets a spin box, and
//! everything else gets a line edit. Boolean cells never reach the
//! delegate; the view toggles their check state directly.

use crate::editor::NullableSpinBox;
use crate::model::config_model::{ConfigModel, VALUE_COLUMN};
use crate::model::index::ModelIndex;
use crate::model::role::{ItemData, ItemRole};
use crate::model::traits::ItemModel;
use crate::tree::{ConfigValue, NodeMeta};

/// The kind of editor a cell should receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// A drop-down over a fixed set of choices.
    ComboBox,
    /// A numeric stepper honoring the node's bounds and step.
    SpinBox,
    /// A free-text editor.
    LineEdit,
}

/// Pick the editor kind for a node's metadata.
///
/// Choices win over numeric constraints: an enumerated entry is a combo box
/// even if it also carries bounds.
pub fn editor_kind_for(meta: &NodeMeta) -> EditorKind {
    if meta.choices.is_some() {
        EditorKind::ComboBox
    } else if meta.min_value.is_some() || meta.max_value.is_some() || meta.step_value.is_some() {
        EditorKind::SpinBox
    } else {
        EditorKind::LineEdit
    }
}

/// A live cell editor produced by the delegate.
pub enum CellEditor {
    /// A drop-down; `current` indexes into `choices`.
    ComboBox {
        /// The legal values.
        choices: Vec<ConfigValue>,
        /// The selected entry.
        current: usize,
    },
    /// A numeric stepper.
    SpinBox(NullableSpinBox),
    /// A free-text editor.
    LineEdit {
        /// The text being edited.
        text: String,
    },
}

impl CellEditor {
    /// The kind of this editor.
    pub fn kind(&self) -> EditorKind {
        match self {
            CellEditor::ComboBox { .. } => EditorKind::ComboBox,
            CellEditor::SpinBox(_) => EditorKind::SpinBox,
            CellEditor::LineEdit { .. } => EditorKind::LineEdit,
        }
    }

    /// The text this editor would commit right now.
    pub fn text(&self) -> String {
        match self {
            CellEditor::ComboBox { choices, current } => choices
                .get(*current)
                .map(ConfigValue::to_string)
                .unwrap_or_default(),
            CellEditor::SpinBox(spin) => spin.text(),
            CellEditor::LineEdit { text } => text.clone(),
        }
    }
}

/// Delegate wiring configuration cells to their editors.
#[derive(Debug, Default)]
pub struct ConfigDelegate;

impl ConfigDelegate {
    /// Create a delegate.
    pub fn new() -> Self {
        Self
    }

    /// Whether the cell accepts a text editor at all.
    pub fn is_editable(&self, model: &ConfigModel, index: &ModelIndex) -> bool {
        index.column() == VALUE_COLUMN && model.flags(index).editable
    }

    /// The editor kind for a cell, or `None` when the cell takes no editor
    /// (key column, branches, and checkbox cells).
    pub fn editor_kind(&self, model: &ConfigModel, index: &ModelIndex) -> Option<EditorKind> {
        if !self.is_editable(model, index) {
            return None;
        }
        let id = model.node_for_index(index);
        let tree = model.tree();
        let tree = tree.read();
        Some(editor_kind_for(tree.node(id)?.meta()))
    }

    /// Build an editor for the cell, prefilled with its current value.
    pub fn create_editor(&self, model: &ConfigModel, index: &ModelIndex) -> Option<CellEditor> {
        let kind = self.editor_kind(model, index)?;
        let id = model.node_for_index(index);
        let tree = model.tree();
        let tree = tree.read();
        let node = tree.node(id)?;
        let meta = node.meta();

        let editor = match kind {
            EditorKind::ComboBox => {
                let choices = meta.choices.clone().unwrap_or_default();
                let current = node
                    .value()
                    .and_then(|v| choices.iter().position(|c| c == v))
                    .unwrap_or(0);
                CellEditor::ComboBox { choices, current }
            }
            EditorKind::SpinBox => {
                let mut spin = NullableSpinBox::new().with_range(
                    meta.min_value.unwrap_or(f64::NEG_INFINITY),
                    meta.max_value.unwrap_or(f64::INFINITY),
                );
                if let Some(step) = meta.step_value {
                    spin = spin.with_single_step(step);
                }
                spin.set_value(node.value().and_then(ConfigValue::as_f64));
                CellEditor::SpinBox(spin)
            }
            EditorKind::LineEdit => CellEditor::LineEdit {
                text: node.value().map(ConfigValue::to_string).unwrap_or_default(),
            },
        };
        tracing::trace!(
            target: "trellis::editor",
            ?kind,
            key = node.key().unwrap_or_default(),
            "editor created"
        );
        Some(editor)
    }

    /// Commit the editor's current text back into the model.
    pub fn commit_editor(
        &self,
        model: &ConfigModel,
        index: &ModelIndex,
        editor: &CellEditor,
    ) -> bool {
        model.set_data(index, ItemData::String(editor.text()), ItemRole::Edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ConfigTree;
    use serde_json::json;

    fn model_with_meta() -> ConfigModel {
        let mut tree = ConfigTree::from_value(&json!({
            "mode": "fast",
            "ratio": 0.5,
            "name": "x",
            "flag": true,
        }))
        .unwrap();

        let mode = tree.node_at_path(&["mode"]).unwrap();
        tree.node_mut(mode).unwrap().meta_mut().choices = Some(vec![
            ConfigValue::Str("fast".into()),
            ConfigValue::Str("slow".into()),
        ]);

        let ratio = tree.node_at_path(&["ratio"]).unwrap();
        {
            let meta = tree.node_mut(ratio).unwrap().meta_mut();
            meta.min_value = Some(0.0);
            meta.max_value = Some(1.0);
        }
        ConfigModel::new(tree)
    }

    #[test]
    fn test_editor_kind_policy() {
        let mut meta = NodeMeta::default();
        assert_eq!(editor_kind_for(&meta), EditorKind::LineEdit);

        meta.step_value = Some(0.1);
        assert_eq!(editor_kind_for(&meta), EditorKind::SpinBox);

        meta.choices = Some(vec![ConfigValue::Int(1)]);
        assert_eq!(editor_kind_for(&meta), EditorKind::ComboBox);
    }

    #[test]
    fn test_delegate_selects_editor_per_node() {
        let model = model_with_meta();
        let delegate = ConfigDelegate::new();

        let mode = model.index_at_path(&["mode"], VALUE_COLUMN).unwrap();
        assert_eq!(delegate.editor_kind(&model, &mode), Some(EditorKind::ComboBox));

        let ratio = model.index_at_path(&["ratio"], VALUE_COLUMN).unwrap();
        assert_eq!(delegate.editor_kind(&model, &ratio), Some(EditorKind::SpinBox));

        let name = model.index_at_path(&["name"], VALUE_COLUMN).unwrap();
        assert_eq!(delegate.editor_kind(&model, &name), Some(EditorKind::LineEdit));

        // Checkbox cells and the key column take no editor.
        let flag = model.index_at_path(&["flag"], VALUE_COLUMN).unwrap();
        assert_eq!(delegate.editor_kind(&model, &flag), None);
        let key = model.index_at_path(&["name"], 0).unwrap();
        assert_eq!(delegate.editor_kind(&model, &key), None);
    }

    #[test]
    fn test_combo_box_prefilled_with_current_choice() {
        let model = model_with_meta();
        let delegate = ConfigDelegate::new();
        let mode = model.index_at_path(&["mode"], VALUE_COLUMN).unwrap();

        let Some(CellEditor::ComboBox { choices, current }) =
            delegate.create_editor(&model, &mode)
        else {
            panic!("expected a combo box");
        };
        assert_eq!(choices.len(), 2);
        assert_eq!(current, 0);
    }

    #[test]
    fn test_spin_box_inherits_bounds() {
        let model = model_with_meta();
        let delegate = ConfigDelegate::new();
        let ratio = model.index_at_path(&["ratio"], VALUE_COLUMN).unwrap();

        let Some(CellEditor::SpinBox(spin)) = delegate.create_editor(&model, &ratio) else {
            panic!("expected a spin box");
        };
        assert_eq!(spin.minimum(), 0.0);
        assert_eq!(spin.maximum(), 1.0);
        assert_eq!(spin.value(), Some(0.5));
        assert_eq!(spin.single_step(), 0.05);
    }

    #[test]
    fn test_commit_round_trip() {
        let model = model_with_meta();
        let delegate = ConfigDelegate::new();
        let name = model.index_at_path(&["name"], VALUE_COLUMN).unwrap();

        let editor = CellEditor::LineEdit { text: "renamed".into() };
        assert!(delegate.commit_editor(&model, &name, &editor));
        assert_eq!(model.display_text(&name).as_deref(), Some("renamed"));

        // A spin box holding null commits the literal text "None".
        let ratio = model.index_at_path(&["ratio"], VALUE_COLUMN).unwrap();
        let mut spin = NullableSpinBox::new().with_range(0.0, 1.0);
        spin.set_value(None);
        assert!(delegate.commit_editor(&model, &ratio, &CellEditor::SpinBox(spin)));
        assert_eq!(model.display_text(&ratio).as_deref(), Some("None"));
    }
}
