//! SampleBuffer: the rolling window of recent samples for one sensor.

use std::collections::VecDeque;

/// Fixed-capacity FIFO window over a single sensor's readings.
///
/// Appending to a full buffer drops exactly the oldest sample, so the length
/// never exceeds `capacity` and the contents are always the most recent
/// samples in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    capacity: usize,
    values: VecDeque<f64>,
}

impl SampleBuffer {
    /// Create an empty buffer. A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Add `value` as the newest sample, evicting the oldest one when full.
    pub fn append(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Owned copy of the current contents, oldest first.
    pub fn values(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Most recently appended sample, if any.
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all samples; the capacity is kept.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
