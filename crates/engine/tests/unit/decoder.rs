//! Decoder policy and branch resolution.

use scalar_core::common::error::{ProtocolError, SimError};
use scalar_core::core::units::DecodeState;
use scalar_core::isa::{Instruction, Opcode};
use scalar_core::Config;

use crate::common::TestContext;

fn pipelined(on: bool) -> Config {
    let mut config = Config::default();
    config.pipeline.pipelined = on;
    config
}

fn adds(n: usize) -> Vec<Instruction> {
    (0..n).map(|_| Instruction::alu(Opcode::Add, 0, 1, 2)).collect()
}

#[test]
fn pipelined_decoder_requests_next_fetch_in_the_dispatch_tick() {
    let mut ctx = TestContext::with_config(&pipelined(true)).load_program(&adds(4));

    // Cycle 1 requests the first fetch; cycle 2 fetches and dispatches.
    ctx.run(2);
    assert_eq!(ctx.retired(), 1);
    // The overlapped fetch for instruction N+1 was requested in the same
    // tick instruction N dispatched.
    assert!(ctx.chip.fetcher.has_pending_request());
}

#[test]
fn non_pipelined_decoder_fetches_only_after_retirement() {
    let mut ctx = TestContext::with_config(&pipelined(false)).load_program(&adds(4));

    ctx.run(2);
    assert_eq!(ctx.retired(), 1);
    // No fetch was issued while the instruction was held; the next
    // request only goes out on the following empty-slot tick.
    assert!(!ctx.chip.fetcher.has_pending_request());

    ctx.run(1);
    assert!(ctx.chip.fetcher.has_pending_request());
}

#[test]
fn pipelined_mode_sustains_higher_throughput() {
    let mut fast = TestContext::with_config(&pipelined(true)).load_program(&adds(8));
    let mut slow = TestContext::with_config(&pipelined(false)).load_program(&adds(8));

    fast.run(9);
    slow.run(9);

    // Overlapping fetch with execution retires one instruction per cycle
    // after priming; the non-pipelined policy alternates fetch and decode.
    assert_eq!(fast.retired(), 8);
    assert_eq!(slow.retired(), 4);
}

#[test]
fn taken_branch_redirects_and_retires_exactly_once() {
    // r0 == r1, so the branch at address 1 jumps back to address 0.
    let mut ctx = TestContext::new().load_program(&[
        Instruction::alu(Opcode::Add, 2, 2, 3),
        Instruction::branch(Opcode::BranchEq, 0, 1, 0),
        Instruction::alu(Opcode::Add, 2, 2, 4),
    ]);

    ctx.run(3);
    assert_eq!(ctx.chip.stats.retired_branch, 1);
    // Redirect: the PC went back to the branch target.
    assert_eq!(ctx.chip.fetcher.pc(), 0);
    // The fall-through instruction never executed.
    assert_eq!(ctx.get_reg(4), 0);
}

#[test]
fn not_taken_branch_leaves_pc_unchanged_and_retires_once() {
    let mut ctx = TestContext::new().load_program(&[
        Instruction::branch(Opcode::BranchEq, 0, 1, 5),
        Instruction::alu(Opcode::Add, 2, 2, 3),
    ]);
    ctx.set_reg(0, 1); // r0 != r1: predicate is false

    ctx.run(2);
    assert_eq!(ctx.chip.stats.retired_branch, 1);
    // Fall-through: the PC kept advancing from where it was.
    assert_eq!(ctx.chip.fetcher.pc(), 1);

    // The fall-through instruction executes normally afterwards.
    ctx.run(3);
    assert_eq!(ctx.chip.stats.retired_arithmetic, 1);
}

#[test]
fn take_branch_without_a_pending_branch_is_a_protocol_violation() {
    let mut ctx = TestContext::new();
    let chip = &mut ctx.chip;
    assert_eq!(chip.decoder.state(), DecodeState::Empty);

    let result = chip.decoder.take_branch(
        true,
        &mut chip.fetcher,
        &mut chip.imem,
        &mut chip.stats,
    );
    assert_eq!(
        result,
        Err(SimError::Protocol(ProtocolError::BranchNotPending))
    );
}

#[test]
fn reading_the_decoder_output_is_unsupported() {
    let ctx = TestContext::new();
    assert_eq!(
        ctx.chip.decoder.read_output(),
        Err(SimError::Protocol(ProtocolError::DecoderIsSink))
    );
}
