//! Generic bounded FIFO queue.
//!
//! The queue underlying every instruction buffer in the engine. Capacity is
//! fixed at construction and `0 <= len <= capacity` holds at all times.
//! Dequeueing from an empty queue is not an error (it yields `None`);
//! enqueueing onto a full queue is.

use std::collections::VecDeque;

use crate::common::error::ConfigError;

/// A FIFO queue with a fixed maximum capacity.
#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue with the given fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// The queue's fixed maximum capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Number of additional items the queue can accept.
    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    /// Appends an item at the back.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Overflow`] if the queue is already full.
    pub fn enqueue(&mut self, item: T) -> Result<(), ConfigError> {
        if self.is_full() {
            return Err(ConfigError::Overflow {
                capacity: self.capacity,
            });
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Removes and returns the front item, or `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Non-destructive view of the front item.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Transfers up to `count` items into `dest`, front-to-back, preserving
    /// relative order.
    ///
    /// Moves exactly `min(count, self.len(), dest.remaining())` items; a
    /// partial transfer is allowed and is not an error. Returns the number
    /// of items actually moved.
    pub fn move_to(&mut self, dest: &mut Self, count: usize) -> usize {
        let moved = count.min(self.len()).min(dest.remaining());
        for _ in 0..moved {
            if let Some(item) = self.items.pop_front() {
                dest.items.push_back(item);
            }
        }
        moved
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the held items, front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
