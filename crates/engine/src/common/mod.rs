//! Common building blocks shared across the pipeline engine.
//!
//! This module provides the primitives every other component is built from:
//! 1. **Errors:** The two fatal failure categories (configuration defects and
//!    protocol violations) and the top-level engine error.
//! 2. **Queues:** A generic bounded FIFO used by instruction buffers.
//! 3. **Timing:** The timed-access protocol (readiness flag + countdown)
//!    shared by every latency-modeled storage resource.

/// Error types for configuration defects and protocol violations.
pub mod error;

/// Generic bounded FIFO queue.
pub mod queue;

/// Timed-access protocol: delay modes, access timers, latency arithmetic.
pub mod timing;

pub use error::{ConfigError, ProtocolError, SimError};
pub use queue::BoundedQueue;
pub use timing::{access_latency, AccessTimer, DelayMode};
