//! Bounded FIFO work queue with a freeze/thaw read boundary.
//!
//! The queue holds pending light updates in strict FIFO order — the
//! breadth-first diffusion depends on it. Capacity is fixed at
//! construction; enqueueing past it is a typed overflow, never a silent
//! drop. [`freeze`](LightQueue::freeze) marks a read boundary so that
//! items appended during an in-progress drain stay queued but invisible
//! until [`thaw`](LightQueue::thaw).

use std::collections::VecDeque;

/// One pending light update: "this cell should receive at least `level`".
///
/// Items are transient values with no identity; duplicates are valid and
/// expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightItem {
    /// World-space cell x.
    pub x: i32,
    /// World-space cell y.
    pub y: i32,
    /// World-space cell z.
    pub z: i32,
    /// Target light level, 0–15.
    pub level: u8,
}

/// Errors raised by the light machinery.
#[derive(Debug, thiserror::Error)]
pub enum LightError {
    /// The fixed queue capacity is exhausted; the flood fill would
    /// otherwise run unbounded.
    #[error("light queue overflow: capacity {capacity} exhausted")]
    QueueOverflow {
        /// The queue's fixed capacity.
        capacity: usize,
    },
}

/// A bounded FIFO queue of [`LightItem`]s.
///
/// Backed by a [`VecDeque`] that grows on demand up to the fixed capacity,
/// so the worst-case bound costs nothing until approached.
pub struct LightQueue {
    items: VecDeque<LightItem>,
    capacity: usize,
    /// Items visible to `dequeue` while frozen; `None` when thawed.
    frozen_visible: Option<usize>,
}

impl LightQueue {
    /// Creates an empty queue with the given fixed capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
            frozen_visible: None,
        }
    }

    /// Appends an item.
    ///
    /// # Errors
    ///
    /// [`LightError::QueueOverflow`] when the queue already holds
    /// `capacity` items; the item is not stored.
    pub fn enqueue(&mut self, item: LightItem) -> Result<(), LightError> {
        if self.items.len() >= self.capacity {
            return Err(LightError::QueueOverflow {
                capacity: self.capacity,
            });
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Pops the oldest visible item, preserving FIFO order.
    ///
    /// While frozen, items appended after the boundary are not returned;
    /// `None` then means "current drain exhausted", not "queue empty".
    pub fn dequeue(&mut self) -> Option<LightItem> {
        if let Some(visible) = self.frozen_visible.as_mut() {
            if *visible == 0 {
                return None;
            }
            *visible -= 1;
        }
        self.items.pop_front()
    }

    /// Marks the read boundary at the current tail.
    pub fn freeze(&mut self) {
        self.frozen_visible = Some(self.items.len());
    }

    /// Removes the read boundary, making all queued items visible again.
    pub fn thaw(&mut self) {
        self.frozen_visible = None;
    }

    /// Drops all items and any read boundary.
    pub fn clear(&mut self) {
        self.items.clear();
        self.frozen_visible = None;
    }

    /// Total number of queued items, including frozen ones.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are queued at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
