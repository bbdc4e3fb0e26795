//! Error types for Trellis.

/// Result type alias for configuration-tree operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while building or editing a configuration tree.
///
/// Structural and type errors are not recovered locally: they propagate to
/// the caller, which is expected to log and abort the specific operation.
/// Out-of-range *navigation* never produces an error — the model protocol
/// answers those with an invalid index instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `items`/`to_value` was called on a leaf node.
    #[error("leaf node '{key}' has no items")]
    LeafHasNoItems { key: String },

    /// A child was attached under a leaf node.
    #[error("cannot attach child '{key}' under a leaf node")]
    LeafHasNoChildren { key: String },

    /// A value was stored on a node that already has children.
    #[error("branch node '{key}' cannot hold a value")]
    BranchHasNoValue { key: String },

    /// `coerce`/`from_value` received something other than a mapping.
    #[error("cannot build a configuration tree from {kind} (expected a mapping)")]
    UnsupportedSource { kind: &'static str },

    /// Child removal was requested. The tree is append/update-only.
    #[error("removing children is not supported; configuration trees are append/update-only")]
    RemovalUnsupported,

    /// A path component did not name an existing child.
    #[error("no child named '{key}'")]
    UnknownKey { key: String },

    /// A node handle no longer refers to a live node.
    #[error("node is no longer present in the tree")]
    StaleNode,
}

impl ConfigError {
    /// Create a [`ConfigError::UnknownKey`].
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }
}
