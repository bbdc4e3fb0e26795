//! Configuration tree data structures.
//!
//! The tree side of the Model/View split: [`ConfigTree`] owns the data,
//! [`IndexedMap`] gives each node ordered children, and [`NodeId`] is the
//! stable handle the model layer stores inside its indexes.

mod indexed_map;
mod node;

pub use indexed_map::IndexedMap;
pub use node::{ConfigNode, ConfigTree, ConfigValue, NodeId, NodeMeta, NodePayload};
