//! Convenient glob-import for the common Trellis types.
//!
//! ```
//! use trellis::prelude::*;
//! ```

pub use crate::editor::{NullableDoubleValidator, NullableSpinBox, ValidationState, Validator};
pub use crate::error::{ConfigError, Result};
pub use crate::model::{
    CellEditor, CheckState, ConfigDelegate, ConfigModel, EditorKind, ItemData, ItemFlags,
    ItemModel, ItemRole, KEY_COLUMN, ModelIndex, ModelSignals, Orientation, VALUE_COLUMN,
};
pub use crate::smartcast::smartcast;
pub use crate::tree::{ConfigNode, ConfigTree, ConfigValue, NodeId, NodeMeta, NodePayload};
pub use trellis_core::{ConnectionGuard, ConnectionId, Signal};
