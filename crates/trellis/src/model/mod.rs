//! Model/View protocol and the configuration-tree model.
//!
//! The [`ItemModel`] trait and its supporting types ([`ModelIndex`],
//! [`ItemRole`], [`ItemData`], [`ModelSignals`]) define the generic protocol
//! views speak. [`ConfigModel`] is the concrete implementation over a
//! [`ConfigTree`](crate::tree::ConfigTree), and [`ConfigDelegate`] picks and
//! commits the per-cell editors.

mod config_model;
mod delegate;
mod index;
mod role;
mod traits;

pub use config_model::{ConfigModel, KEY_COLUMN, VALUE_COLUMN};
pub use delegate::{CellEditor, ConfigDelegate, EditorKind, editor_kind_for};
pub use index::ModelIndex;
pub use role::{CheckState, ItemData, ItemRole};
pub use traits::{ItemFlags, ItemModel, ModelSignals, Orientation};
