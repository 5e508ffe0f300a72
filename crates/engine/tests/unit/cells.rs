//! Data cell array contract.

use scalar_core::common::error::{ConfigError, ProtocolError, SimError};
use scalar_core::common::timing::DelayMode;
use scalar_core::mem::cells::{AccessSource, DataCellArray};

#[test]
fn write_then_read_returns_value_mod_256() {
    let mut arr = DataCellArray::new(2, 2, DelayMode::Immediate, 100);
    for (addr, value, expected) in [(0, 300_i64, 44_u8), (1, -300, 212), (2, 255, 255), (3, 256, 0)]
    {
        arr.write(addr, value, AccessSource::External).unwrap();
        assert_eq!(arr.read(addr).unwrap(), expected);
    }
}

#[test]
fn geometry_is_words_times_word_width() {
    let arr = DataCellArray::new(4, 2, DelayMode::Immediate, 100);
    assert_eq!(arr.len(), 8);
}

#[test]
fn out_of_bounds_write_is_a_configuration_error() {
    let mut arr = DataCellArray::new(2, 2, DelayMode::Immediate, 100);
    assert_eq!(
        arr.write(9, 1, AccessSource::External),
        Err(SimError::Config(ConfigError::AddressOutOfBounds {
            addr: 9,
            len: 4
        }))
    );
}

#[test]
fn delayed_array_honors_frequency_ratio() {
    // Requester at 100 against an array at 50: two array ticks of latency.
    let mut arr = DataCellArray::new(1, 1, DelayMode::Delayed, 50);
    arr.request_access(100).unwrap();

    assert_eq!(arr.read(0), Err(SimError::Protocol(ProtocolError::NotReady)));
    arr.tick();
    assert_eq!(arr.read(0), Err(SimError::Protocol(ProtocolError::NotReady)));
    arr.tick();
    assert_eq!(arr.read(0).unwrap(), 0);

    // The read consumed readiness; the next access must re-ask.
    assert_eq!(arr.read(0), Err(SimError::Protocol(ProtocolError::NotReady)));
}

#[test]
fn last_write_records_advisory_source_tag() {
    let mut arr = DataCellArray::new(2, 1, DelayMode::Immediate, 100);
    assert_eq!(arr.last_write(), None);
    arr.write(1, 7, AccessSource::Alu).unwrap();
    assert_eq!(arr.last_write(), Some((1, AccessSource::Alu)));
}
