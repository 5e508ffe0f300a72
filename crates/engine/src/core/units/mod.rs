//! Pipeline execution units.
//!
//! 1. **ALU:** Arithmetic execution and branch predicate evaluation.
//! 2. **LSU:** Register/memory transfers for memory-class instructions.
//! 3. **Fetcher:** Program counter and fetch orchestration.
//! 4. **Decoder:** Decode/dispatch state machine and branch resolution.

/// Arithmetic logic unit.
pub mod alu;

/// Decode/dispatch unit.
pub mod decoder;

/// Instruction fetch unit.
pub mod fetcher;

/// Load/store ("IO") unit.
pub mod lsu;

pub use alu::Alu;
pub use decoder::{DecodeState, Decoder, RetirementSink};
pub use fetcher::{FetchState, Fetcher};
pub use lsu::Lsu;
