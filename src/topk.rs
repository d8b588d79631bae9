//! Top-K selector
//!
//! Keeps the [`CAPACITY`] largest samples seen so far, largest at index 0.
//! Each sample costs one scan plus one in-place shift of at most 32 entries,
//! which beats a heap at this size and needs no side structure.
//!
//! Duplicates are kept. A sample equal to existing entries lands in front of
//! them, so once the buffer is full the oldest of a run of equal values is
//! the first to fall off the end.

use crate::codec::{Sample, SampleBatch};
use crate::CAPACITY;

/// The 32 largest samples seen, in non-increasing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopK {
    values: [Sample; CAPACITY],
    len: usize,
}

impl TopK {
    /// Create an empty selector
    pub const fn new() -> Self {
        Self {
            values: [0; CAPACITY],
            len: 0,
        }
    }

    /// Offer every sample of a batch, in order
    pub fn insert(&mut self, batch: &SampleBatch) {
        for &sample in batch {
            self.insert_sample(sample);
        }
    }

    /// Offer a single sample.
    ///
    /// Returns the index it was stored at, or `None` when the buffer is full
    /// and the sample is smaller than every entry.
    pub fn insert_sample(&mut self, sample: Sample) -> Option<usize> {
        let position = self
            .as_slice()
            .iter()
            .position(|&kept| sample >= kept)
            .unwrap_or(self.len);

        if position >= CAPACITY {
            return None;
        }

        // Last slot that receives a shifted entry; anything past CAPACITY-1 drops
        let end = (self.len + 1).min(CAPACITY);
        self.values.copy_within(position..end - 1, position + 1);
        self.values[position] = sample;
        self.len = end;

        Some(position)
    }

    /// Number of samples held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no sample has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if all 32 slots are taken
    pub fn is_full(&self) -> bool {
        self.len == CAPACITY
    }

    /// Held samples, largest first
    pub fn as_slice(&self) -> &[Sample] {
        &self.values[..self.len]
    }

    /// Held samples, smallest first
    pub fn ascending(&self) -> core::iter::Rev<core::slice::Iter<'_, Sample>> {
        self.as_slice().iter().rev()
    }

    /// Largest sample seen
    pub fn max(&self) -> Option<Sample> {
        self.as_slice().first().copied()
    }

    /// Smallest sample still held; once full, the admission threshold
    pub fn min(&self) -> Option<Sample> {
        self.as_slice().last().copied()
    }

    /// Discard all samples
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for TopK {
    fn default() -> Self {
        Self::new()
    }
}
