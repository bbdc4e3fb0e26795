//! Trellis: a configuration-tree Model/View toolkit.
//!
//! Trellis turns a nested configuration mapping into an editable two-column
//! tree: keys on the left, values on the right. It is organized along the
//! classic Model/View split:
//!
//! - [`tree`] owns the data: [`ConfigTree`](tree::ConfigTree) is an arena of
//!   keyed nodes where every node is either a scalar leaf or an ordered
//!   branch.
//! - [`model`] adapts the tree to the [`ItemModel`](model::ItemModel)
//!   protocol so generic views can display and edit it, and picks per-cell
//!   editors via [`ConfigDelegate`](model::ConfigDelegate).
//! - [`editor`] provides the widgets-side pieces: a nullable numeric spin
//!   box and three-state text validation.
//! - [`smartcast`] parses the free-form text users type into typed values.
//!
//! # Quick start
//!
//! ```
//! use serde_json::json;
//! use trellis::prelude::*;
//!
//! let tree = ConfigTree::from_value(&json!({
//!     "algo1": { "opt1": 1, "opt2": 2 },
//!     "general_opt": "abc",
//! }))?;
//! let model = ConfigModel::new(tree);
//!
//! // Navigate like a view would.
//! let root = ModelIndex::invalid();
//! let algo1 = model.index(0, KEY_COLUMN, &root);
//! assert_eq!(model.display_text(&algo1).as_deref(), Some("algo1"));
//!
//! // Edit like a delegate would.
//! let opt1 = model.index(0, VALUE_COLUMN, &algo1);
//! assert!(model.set_data(&opt1, ItemData::from("2.5"), ItemRole::Edit));
//! # Ok::<(), trellis::ConfigError>(())
//! ```
//!
//! # Logging
//!
//! All instrumentation goes through `tracing`; see
//! [`trellis_core::logging`] for the per-subsystem target names.

pub mod editor;
pub mod error;
pub mod model;
pub mod prelude;
pub mod smartcast;
pub mod tree;

pub use error::{ConfigError, Result};

// Re-export the signal primitives so downstream crates need only one
// dependency.
pub use trellis_core::{ConnectionGuard, ConnectionId, Signal};
