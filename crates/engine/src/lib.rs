//! Cycle-level single-issue pipeline simulator library.
//!
//! This crate implements a discrete-event pipeline engine with the following:
//! 1. **Common:** Bounded queues, the timed-access protocol, and the two
//!    fatal error categories (configuration defects, protocol violations).
//! 2. **Storage:** Byte-cell arrays (register file, data memory),
//!    instruction memory, and timed instruction buffers.
//! 3. **Units:** ALU, load/store unit, fetch unit, and the decode/dispatch
//!    state machine with pipelined and non-pipelined fetch policies.
//! 4. **Core:** The chip step function ticking fetch and decode in fixed
//!    order, plus pull-based snapshots and retirement statistics.
//!
//! Access latency between units is scaled by their relative clock
//! frequencies: a requester at `f_R` reaching a resource at `f_X` waits
//! `ceil(f_R / f_X)` (at least one) of the resource's ticks.

/// Common types (errors, bounded queue, timed-access protocol).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// Chip core (stages, units, step function).
pub mod core;
/// Instruction set model (opcodes, classes, instruction values).
pub mod isa;
/// Latency-modeled storage (cell arrays, instruction memory, buffers).
pub mod mem;
/// Read-only observer snapshots.
pub mod snapshot;
/// Retirement and cycle statistics.
pub mod stats;

/// Main chip type; owns the pipeline, storage, and stats.
pub use crate::core::Chip;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;

/// Top-level engine error.
pub use crate::common::error::SimError;
