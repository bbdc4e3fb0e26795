//! Logging conventions for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```
//! // Initialize tracing (you can customize this)
//! tracing_subscriber::fmt().try_init().ok();
//!
//! // Your application code...
//! ```
//!
//! Every subsystem logs under a fixed target name, listed in [`targets`], so
//! individual subsystems can be filtered with `tracing` directives, e.g.
//! `RUST_LOG=trellis::model=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Configuration tree target.
    pub const TREE: &str = "trellis::tree";
    /// Item model target.
    pub const MODEL: &str = "trellis::model";
    /// Editor/validation target.
    pub const EDITOR: &str = "trellis::editor";
}
