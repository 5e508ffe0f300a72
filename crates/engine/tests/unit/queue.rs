//! Bounded queue properties.
//!
//! The queue invariant (`0 <= len <= capacity`) must survive arbitrary
//! operation sequences, which is checked against a model `VecDeque` with
//! proptest.

use proptest::prelude::*;
use scalar_core::common::error::ConfigError;
use scalar_core::common::queue::BoundedQueue;
use std::collections::VecDeque;

/// One queue operation for the property-based model check.
#[derive(Debug, Clone)]
enum Op {
    Enqueue(u8),
    Dequeue,
    Peek,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Enqueue),
        Just(Op::Dequeue),
        Just(Op::Peek),
    ]
}

proptest! {
    #[test]
    fn queue_matches_model_and_stays_bounded(
        capacity in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        let mut queue = BoundedQueue::new(capacity);
        let mut model: VecDeque<u8> = VecDeque::new();

        for op in ops {
            match op {
                Op::Enqueue(v) => {
                    let result = queue.enqueue(v);
                    if model.len() < capacity {
                        prop_assert!(result.is_ok());
                        model.push_back(v);
                    } else {
                        prop_assert_eq!(
                            result,
                            Err(ConfigError::Overflow { capacity })
                        );
                    }
                }
                Op::Dequeue => {
                    prop_assert_eq!(queue.dequeue(), model.pop_front());
                }
                Op::Peek => {
                    prop_assert_eq!(queue.peek(), model.front());
                }
            }
            prop_assert!(queue.len() <= capacity);
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.remaining(), capacity - model.len());
        }
    }

    #[test]
    fn move_to_transfers_exactly_the_minimum(
        src_len in 0usize..6,
        dst_len in 0usize..6,
        count in 0usize..8,
    ) {
        let mut src = BoundedQueue::new(6);
        let mut dst = BoundedQueue::new(6);
        for i in 0..src_len {
            src.enqueue(i as u8).unwrap();
        }
        for i in 0..dst_len {
            dst.enqueue(100 + i as u8).unwrap();
        }

        let expected = count.min(src_len).min(6 - dst_len);
        let moved = src.move_to(&mut dst, count);

        prop_assert_eq!(moved, expected);
        prop_assert_eq!(src.len(), src_len - expected);
        prop_assert_eq!(dst.len(), dst_len + expected);

        // Relative order is preserved across the seam.
        let tail: Vec<u8> = dst.iter().skip(dst_len).copied().collect();
        let expected_tail: Vec<u8> = (0..expected as u8).collect();
        prop_assert_eq!(tail, expected_tail);
    }
}
