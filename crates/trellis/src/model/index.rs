//! Model index for addressing items in hierarchical models.
//!
//! The `ModelIndex` type is the fundamental way to reference items within
//! an `ItemModel`. It contains row, column, and parent information to
//! uniquely identify any item in a hierarchical data structure.

use std::hash::{Hash, Hasher};

/// Represents a position within an `ItemModel`.
///
/// `ModelIndex` is used by views, delegates, and selection models to locate
/// items within a model. Each index contains:
/// - Row and column within the parent
/// - A reference to the parent index (for hierarchical models)
/// - An internal ID the model uses to find its backing data
///
/// # Index Validity
///
/// Model indices should be used immediately and not stored long-term.
/// After structural model modifications, previously obtained indices may
/// become invalid.
#[derive(Clone, Debug)]
pub struct ModelIndex {
    /// The row within the parent.
    row: usize,
    /// The column within the parent.
    column: usize,
    /// The parent index. `None` indicates a root-level item.
    parent: Option<Box<ModelIndex>>,
    /// An identifier the owning model uses to locate its internal data.
    internal_id: u64,
    /// Whether this index is valid.
    valid: bool,
}

impl Default for ModelIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl ModelIndex {
    /// Creates an invalid (null) model index.
    ///
    /// An invalid index is used to represent:
    /// - The root of the model (as a parent reference)
    /// - A non-existent or out-of-bounds item
    /// - An uninitialized index
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            row: 0,
            column: 0,
            parent: None,
            internal_id: 0,
            valid: false,
        }
    }

    /// Creates a new valid model index.
    ///
    /// This is typically called by model implementations rather than
    /// directly; the `internal_id` is whatever handle the model needs to
    /// get back to the underlying item.
    #[inline]
    pub fn new(row: usize, column: usize, parent: ModelIndex, internal_id: u64) -> Self {
        Self {
            row,
            column,
            parent: if parent.is_valid() {
                Some(Box::new(parent))
            } else {
                None
            },
            internal_id,
            valid: true,
        }
    }

    /// Returns `true` if this index points to an existing item.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The row within the parent.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// The column within the parent.
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// The model's internal identifier for this item.
    #[inline]
    pub fn internal_id(&self) -> u64 {
        self.internal_id
    }

    /// The parent index, or an invalid index for root-level items.
    pub fn parent(&self) -> ModelIndex {
        match &self.parent {
            Some(parent) => (**parent).clone(),
            None => ModelIndex::invalid(),
        }
    }

    /// Whether this index has a valid parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Creates an index at the same depth with a different row/column.
    ///
    /// Keeps this index's internal ID only when the position is unchanged;
    /// the owning model must re-resolve true siblings.
    pub fn sibling(&self, row: usize, column: usize) -> ModelIndex {
        if !self.valid {
            return ModelIndex::invalid();
        }
        if row == self.row && column == self.column {
            return self.clone();
        }
        ModelIndex::new(row, column, self.parent(), 0)
    }
}

impl PartialEq for ModelIndex {
    fn eq(&self, other: &Self) -> bool {
        // Two invalid indices are always equal regardless of content.
        if !self.valid && !other.valid {
            return true;
        }
        self.valid == other.valid
            && self.row == other.row
            && self.column == other.column
            && self.internal_id == other.internal_id
    }
}

impl Eq for ModelIndex {}

impl Hash for ModelIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.valid.hash(state);
        if self.valid {
            self.row.hash(state);
            self.column.hash(state);
            self.internal_id.hash(state);
        }
    }
}
