//! Instruction buffer protocol and transfers.

use scalar_core::common::error::{ConfigError, ProtocolError, SimError};
use scalar_core::common::timing::DelayMode;
use scalar_core::isa::{Instruction, Opcode};
use scalar_core::mem::buffer::InstructionBuffer;

fn inst(n: usize) -> Instruction {
    Instruction::alu(Opcode::Add, n, n, n)
}

#[test]
fn immediate_buffer_passes_instructions_through() {
    let mut buf = InstructionBuffer::new(2, DelayMode::Immediate, 100);
    buf.write(inst(0)).unwrap();
    buf.write(inst(1)).unwrap();
    assert!(buf.is_full());
    assert_eq!(buf.read().unwrap(), Some(inst(0)));
    assert_eq!(buf.read().unwrap(), Some(inst(1)));
    assert_eq!(buf.read().unwrap(), None);
}

#[test]
fn overflowing_a_full_buffer_is_a_configuration_error() {
    let mut buf = InstructionBuffer::new(1, DelayMode::Immediate, 100);
    buf.write(inst(0)).unwrap();
    assert_eq!(
        buf.write(inst(1)),
        Err(SimError::Config(ConfigError::Overflow { capacity: 1 }))
    );
}

#[test]
fn delayed_buffer_requires_request_per_access() {
    let mut buf = InstructionBuffer::new(1, DelayMode::Delayed, 100);
    assert_eq!(
        buf.write(inst(0)),
        Err(SimError::Protocol(ProtocolError::NotReady))
    );

    buf.request_access(100).unwrap();
    buf.tick();
    buf.write(inst(0)).unwrap();

    // Write consumed readiness; the read side asks again.
    assert_eq!(buf.read(), Err(SimError::Protocol(ProtocolError::NotReady)));
    buf.request_access(200).unwrap();
    buf.tick();
    assert!(!buf.is_ready());
    buf.tick();
    assert_eq!(buf.read().unwrap(), Some(inst(0)));
}

#[test]
fn oversized_transfer_is_rejected_up_front() {
    let mut src = InstructionBuffer::new(2, DelayMode::Immediate, 100);
    let mut dst = InstructionBuffer::new(2, DelayMode::Immediate, 100);
    assert_eq!(
        src.transfer_to(&mut dst, 3),
        Err(SimError::Config(ConfigError::OversizedTransfer {
            requested: 3,
            capacity: 2
        }))
    );
}

#[test]
fn transfer_to_moves_the_minimum_and_preserves_order() {
    let mut src = InstructionBuffer::new(4, DelayMode::Immediate, 100);
    let mut dst = InstructionBuffer::new(2, DelayMode::Immediate, 100);
    for n in 0..3 {
        src.write(inst(n)).unwrap();
    }

    // dest can only take two: partial transfer, not an error.
    assert_eq!(src.transfer_to(&mut dst, 3).unwrap(), 2);
    assert_eq!(src.len(), 1);
    assert_eq!(dst.read().unwrap(), Some(inst(0)));
    assert_eq!(dst.read().unwrap(), Some(inst(1)));
    assert_eq!(src.peek(), Some(&inst(2)));
}
