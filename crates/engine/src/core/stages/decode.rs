//! Decode/dispatch stage.
//!
//! Runs one cycle of the decoder's state machine:
//! 1. **Pull:** An empty slot tries to read one instruction from the fetch
//!    buffer. With nothing available, the fetch policy applies: pipelined
//!    mode keeps the fetch stage busy unconditionally; non-pipelined mode
//!    stalls fetch until both execution units are ready.
//! 2. **Overlap:** A held non-branch instruction in pipelined mode
//!    triggers the next fetch *before* dispatch — the defining difference
//!    from non-pipelined mode, which only fetches after retirement.
//! 3. **Dispatch:** With both units ready and every delayed cell array
//!    the instruction touches granted, the instruction goes to the ALU
//!    (arithmetic), the LSU (memory), or — for a branch — the ALU for
//!    its predicate, followed by resolution through
//!    [`crate::core::units::Decoder::take_branch`]. A missing grant is
//!    requested and the slot stalls to re-poll next tick.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::Chip;
use crate::core::units::decoder::{DecodeState, Decoder};
use crate::isa::{InstrClass, Instruction};
use crate::mem::cells::DataCellArray;

/// Executes the decode/dispatch stage for one cycle.
///
/// # Errors
///
/// Propagates configuration and protocol errors from the units and
/// storage touched during dispatch.
pub fn decode_stage(chip: &mut Chip) -> Result<(), SimError> {
    let Chip {
        fetcher,
        decoder,
        alu,
        lsu,
        regs,
        dmem,
        imem,
        stats,
    } = chip;

    if decoder.is_empty() {
        match fetcher.pull(decoder.clock_hz())? {
            Some(inst) => {
                trace!(opcode = ?inst.opcode(), "instruction entered decode slot");
                decoder.hold(inst);
            }
            None => {
                // Fetch policy with nothing to decode.
                if decoder.is_pipelined() || (alu.is_ready() && lsu.is_ready()) {
                    fetcher.request_fetch();
                }
                return Ok(());
            }
        }
    }

    let DecodeState::Held(inst) = decoder.state() else {
        // A branch awaiting an externally supplied predicate stays put.
        return Ok(());
    };

    // Overlapped fetch: instruction N+1 is requested while N still
    // occupies the slot. Branches never prefetch their fall-through.
    if decoder.is_pipelined() && inst.class() != InstrClass::Branch {
        fetcher.request_fetch();
    }

    if !(alu.is_ready() && lsu.is_ready()) {
        return Ok(());
    }

    // Delayed cell arrays stall dispatch until their grants arrive.
    if !storage_ready(decoder, &inst, regs, dmem)? {
        return Ok(());
    }

    match inst.class() {
        InstrClass::Arithmetic => {
            decoder.mark_dispatched(inst);
            let _ = alu.compute(&inst, regs)?;
            decoder.retire(&inst, stats);
        }
        InstrClass::Memory => {
            decoder.mark_dispatched(inst);
            lsu.process_io(&inst, regs, dmem)?;
            decoder.retire(&inst, stats);
        }
        InstrClass::Branch => {
            let taken = alu.compute(&inst, regs)?.unwrap_or_default();
            decoder.mark_awaiting_predicate(inst);
            decoder.take_branch(taken, fetcher, imem, stats)?;
        }
    }
    Ok(())
}

/// Requests and polls access to the cell arrays the instruction will
/// touch. Requests go out in parallel and are re-polled on later ticks;
/// returns `true` only once every involved array is ready, so each
/// dispatch consumes fresh grants.
fn storage_ready(
    decoder: &Decoder,
    inst: &Instruction,
    regs: &mut DataCellArray,
    dmem: &mut DataCellArray,
) -> Result<bool, SimError> {
    let mut ready = true;
    if !regs.is_ready() {
        if !regs.in_flight() {
            regs.request_access(decoder.clock_hz())?;
            trace!("register grant requested for dispatch");
        }
        ready = false;
    }
    if inst.class() == InstrClass::Memory && !dmem.is_ready() {
        if !dmem.in_flight() {
            dmem.request_access(decoder.clock_hz())?;
            trace!("data memory grant requested for dispatch");
        }
        ready = false;
    }
    Ok(ready)
}
