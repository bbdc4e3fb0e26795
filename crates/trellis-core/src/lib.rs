//! Core systems for Trellis.
//!
//! This crate provides the foundational pieces shared by the Trellis
//! configuration toolkit:
//!
//! - **Signal/Slot System**: Type-safe change notification between objects
//! - **Logging**: `tracing` target conventions for the toolkit's subsystems
//!
//! Trellis is single-threaded and event-driven: signals here invoke their
//! slots synchronously, on the emitting thread, immediately after the state
//! they describe has been updated. There is no event loop and no queued
//! delivery.
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
