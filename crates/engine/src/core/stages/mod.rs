//! Per-cycle pipeline stage functions.
//!
//! Each stage is a free function over the owning [`crate::core::Chip`],
//! run once per simulated cycle in fixed order: fetch, then decode (which
//! dispatches to the execution units).

/// Decode/dispatch stage.
pub mod decode;

/// Instruction fetch stage.
pub mod fetch;

pub use decode::decode_stage;
pub use fetch::fetch_stage;
