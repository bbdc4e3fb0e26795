//! Core traits for the Model/View architecture.
//!
//! This module defines the fundamental traits that models must implement
//! to work with the view system.

use trellis_core::Signal;

use super::index::ModelIndex;
use super::role::{CheckState, ItemData, ItemRole};

/// Flags indicating what operations are allowed on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    /// Item can be selected.
    pub selectable: bool,
    /// Item can be edited.
    pub editable: bool,
    /// Item has a checkbox.
    pub checkable: bool,
    /// Item is enabled (can interact).
    pub enabled: bool,
}

impl ItemFlags {
    /// Creates flags with all defaults (selectable and enabled only).
    pub fn new() -> Self {
        Self {
            selectable: true,
            enabled: true,
            ..Default::default()
        }
    }

    /// Creates flags for a disabled item.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Creates flags for an editable item.
    pub fn editable() -> Self {
        Self {
            selectable: true,
            editable: true,
            enabled: true,
            ..Default::default()
        }
    }

    /// Creates flags for a checkable item.
    pub fn checkable() -> Self {
        Self {
            selectable: true,
            checkable: true,
            enabled: true,
            ..Default::default()
        }
    }

    /// Sets the selectable flag.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the editable flag.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Sets the checkable flag.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Header orientation for `header_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Horizontal header (column headers).
    Horizontal,
    /// Vertical header (row headers).
    Vertical,
}

/// The core trait for item models in the Model/View architecture.
///
/// `ItemModel` provides a flexible interface for representing hierarchical
/// data. Views use this interface to query and display data without needing
/// to know the underlying data structure.
///
/// # Implementation Requirements
///
/// At minimum, you must implement:
/// - [`row_count`](ItemModel::row_count) - Number of rows under a parent
/// - [`column_count`](ItemModel::column_count) - Number of columns
/// - [`data`](ItemModel::data) - Data for a given index and role
/// - [`index`](ItemModel::index) - Create an index for a position
/// - [`parent`](ItemModel::parent) - Get the parent of an index
///
/// For editable models, also implement:
/// - [`set_data`](ItemModel::set_data) - Modify data at an index
/// - [`flags`](ItemModel::flags) - Return appropriate flags
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows under the given parent.
    ///
    /// For tree models, return the number of children of the parent item.
    fn row_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the number of columns for children of the given parent.
    fn column_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the data stored under the given role for the item at index.
    ///
    /// Return `ItemData::None` if:
    /// - The index is invalid
    /// - The role is not supported
    /// - There's no data for that role
    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData;

    /// Creates a model index for the given row and column under parent.
    ///
    /// Return `ModelIndex::invalid()` if the position is out of bounds.
    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex;

    /// Returns the parent of the given index.
    ///
    /// Return `ModelIndex::invalid()` for root-level items and invalid
    /// indices.
    fn parent(&self, index: &ModelIndex) -> ModelIndex;

    /// Returns the signals for this model.
    ///
    /// Views connect to these signals to receive notifications about
    /// data changes, insertions, resets, etc.
    fn signals(&self) -> &ModelSignals;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Sets the data for the given index and role.
    ///
    /// Returns `true` if the data was successfully set.
    /// The default implementation returns `false` (read-only).
    ///
    /// Implementations should emit the `data_changed` signal after
    /// modifying data.
    fn set_data(&self, _index: &ModelIndex, _value: ItemData, _role: ItemRole) -> bool {
        false
    }

    /// Returns the flags for the item at the given index.
    ///
    /// The default returns selectable and enabled flags.
    fn flags(&self, _index: &ModelIndex) -> ItemFlags {
        ItemFlags::new()
    }

    /// Returns `true` if the item at parent has any children.
    ///
    /// The default implementation checks if `row_count(parent) > 0`.
    fn has_children(&self, parent: &ModelIndex) -> bool {
        self.row_count(parent) > 0
    }

    /// Returns header data for the given section (row or column header).
    ///
    /// - For horizontal headers, `section` is the column index
    /// - For vertical headers, `section` is the row index
    ///
    /// The default returns `ItemData::None`.
    fn header_data(&self, _section: usize, _orientation: Orientation, _role: ItemRole) -> ItemData {
        ItemData::None
    }

    // -------------------------------------------------------------------------
    // Convenience methods
    // -------------------------------------------------------------------------

    /// Returns the display text for an item (convenience for `data(index, Display)`).
    fn display_text(&self, index: &ModelIndex) -> Option<String> {
        self.data(index, ItemRole::Display).into_string()
    }

    /// Returns the check state for an item.
    fn check_state(&self, index: &ModelIndex) -> Option<CheckState> {
        self.data(index, ItemRole::CheckState).as_check_state()
    }

    /// Sets the check state for an item (convenience for `set_data`).
    fn set_check_state(&self, index: &ModelIndex, state: CheckState) -> bool {
        self.set_data(index, ItemData::CheckState(state), ItemRole::CheckState)
    }

    /// Creates a sibling index at the given row and column.
    ///
    /// This validates against the model, unlike `ModelIndex::sibling`.
    fn sibling(&self, index: &ModelIndex, row: usize, column: usize) -> ModelIndex {
        if !index.is_valid() {
            return ModelIndex::invalid();
        }
        self.index(row, column, &index.parent())
    }
}

/// Collection of signals emitted by item models.
///
/// Views connect to these signals to stay synchronized with the model.
/// Models should emit the appropriate signals when their data changes.
pub struct ModelSignals {
    /// Emitted just before rows are inserted.
    /// Args: (parent index, first row, last row)
    pub rows_about_to_be_inserted: Signal<(ModelIndex, usize, usize)>,

    /// Emitted after rows have been inserted.
    /// Args: (parent index, first row, last row)
    pub rows_inserted: Signal<(ModelIndex, usize, usize)>,

    /// Emitted when data in existing items changes.
    /// Args: (top-left index, bottom-right index, changed roles)
    pub data_changed: Signal<(ModelIndex, ModelIndex, Vec<ItemRole>)>,

    /// Emitted when header data changes.
    /// Args: (orientation, first section, last section)
    pub header_data_changed: Signal<(Orientation, usize, usize)>,

    /// Emitted before the model is reset.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            data_changed: Signal::new(),
            header_data_changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits signals for row insertion.
    ///
    /// Calls the provided function between the about_to_be_inserted and
    /// inserted signals.
    pub fn emit_rows_inserted<F>(&self, parent: ModelIndex, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted
            .emit((parent.clone(), first, last));
        insert_fn();
        self.rows_inserted.emit((parent, first, last));
    }

    /// Emits a data change for a single cell.
    pub fn emit_data_changed_single(&self, index: ModelIndex, roles: Vec<ItemRole>) {
        self.data_changed.emit((index.clone(), index, roles));
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about_to_reset and reset
    /// signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}
