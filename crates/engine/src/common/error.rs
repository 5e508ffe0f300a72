//! Engine error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Configuration errors:** Out-of-bounds addresses, oversized transfers,
//!    and invalid opcodes — defects in the caller's setup or program.
//! 2. **Protocol violations:** Accesses that break the timed-resource
//!    handshake or read from a pipeline sink.
//! 3. **The top-level error:** A transparent wrapper over both categories.
//!
//! Both categories are fatal and represent caller defects rather than
//! expected runtime conditions. Re-polling readiness is the normal
//! steady-state control loop, not error recovery; nothing here is retried
//! or swallowed inside the engine.

use thiserror::Error;

use crate::isa::Opcode;

/// A defect in the caller's configuration or program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An address outside the bounds of the addressed store.
    #[error("address {addr} out of bounds for a store of {len} cells")]
    AddressOutOfBounds {
        /// The offending address.
        addr: usize,
        /// Number of addressable cells in the store.
        len: usize,
    },

    /// Enqueue attempted on a full queue.
    #[error("queue overflow: capacity {capacity} reached")]
    Overflow {
        /// The queue's fixed capacity.
        capacity: usize,
    },

    /// A bulk transfer request larger than the buffer can ever hold.
    #[error("transfer of {requested} items exceeds buffer capacity {capacity}")]
    OversizedTransfer {
        /// Number of items requested.
        requested: usize,
        /// The buffer's fixed capacity.
        capacity: usize,
    },

    /// An opcode dispatched to a unit that does not implement it.
    #[error("opcode {0:?} is not valid for this unit")]
    InvalidOpcode(Opcode),
}

/// A violation of the timed-access protocol or a component contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A delayed resource was accessed before its latency elapsed.
    #[error("resource accessed before the requested latency elapsed")]
    NotReady,

    /// A timed request was issued against a no-delay resource.
    ///
    /// No-delay resources are implicitly always ready and never need asking.
    #[error("timed access request issued to a no-delay resource")]
    RequestOnImmediate,

    /// The decoder's output was read.
    ///
    /// The decoder is a pipeline sink; reading from it is undefined by
    /// design and always fails.
    #[error("the decoder is a pipeline sink; its output cannot be read")]
    DecoderIsSink,

    /// Branch resolution was signalled while no branch awaited a predicate.
    #[error("branch resolution with no branch awaiting a predicate")]
    BranchNotPending,
}

/// Top-level engine error covering both fatal categories.
///
/// All failures propagate synchronously at the point of misuse and abort
/// the offending step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// A configuration defect.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A protocol violation.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
