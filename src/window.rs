//! Retention window
//!
//! Keeps the most recent [`CAPACITY`] samples in arrival order, oldest first.
//! Storage is a fixed array shifted in place, so appends never allocate.

use crate::codec::{Sample, SampleBatch};
use crate::CAPACITY;

/// The last 32 samples seen, in the order they were produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionWindow {
    values: [Sample; CAPACITY],
    len: usize,
}

impl RetentionWindow {
    /// Create an empty window
    pub const fn new() -> Self {
        Self {
            values: [0; CAPACITY],
            len: 0,
        }
    }

    /// Append a batch, evicting the oldest entries once the window is full
    pub fn append(&mut self, batch: &SampleBatch) {
        let incoming = batch.as_slice();
        // A batch can never exceed CAPACITY, but keep only its tail if it does
        let incoming = &incoming[incoming.len().saturating_sub(CAPACITY)..];

        let keep = self.len.min(CAPACITY - incoming.len());
        self.values.copy_within(self.len - keep..self.len, 0);
        self.values[keep..keep + incoming.len()].copy_from_slice(incoming);
        self.len = keep + incoming.len();
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the window has saturated and now slides
    pub fn is_full(&self) -> bool {
        self.len == CAPACITY
    }

    /// Retained samples, oldest first
    pub fn as_slice(&self) -> &[Sample] {
        &self.values[..self.len]
    }

    /// Most recent sample
    pub fn newest(&self) -> Option<Sample> {
        self.as_slice().last().copied()
    }

    /// Oldest retained sample
    pub fn oldest(&self) -> Option<Sample> {
        self.as_slice().first().copied()
    }

    /// Discard all samples
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for RetentionWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(first: Sample, last: Sample) -> SampleBatch {
        let mut values = [0; CAPACITY];
        let n = (last - first + 1) as usize;
        for (i, slot) in values[..n].iter_mut().enumerate() {
            *slot = first + i as Sample;
        }
        SampleBatch::from_slice(&values[..n])
    }

    #[test]
    fn test_window_new() {
        let window = RetentionWindow::new();
        assert!(window.is_empty());
        assert_eq!(window.newest(), None);
    }

    #[test]
    fn test_append_under_capacity() {
        let mut window = RetentionWindow::new();
        window.append(&batch(1, 5));
        window.append(&batch(6, 10));

        assert_eq!(window.len(), 10);
        assert_eq!(window.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert!(!window.is_full());
    }

    #[test]
    fn test_slides_after_forty_samples() {
        let mut window = RetentionWindow::new();
        for start in (1..=40).step_by(8) {
            window.append(&batch(start, start + 7));
        }

        assert!(window.is_full());
        assert!(window.as_slice().iter().copied().eq(9..=40));
        assert_eq!(window.oldest(), Some(9));
        assert_eq!(window.newest(), Some(40));
    }

    #[test]
    fn test_full_batch_replaces_window() {
        let mut window = RetentionWindow::new();
        window.append(&batch(100, 110));
        window.append(&batch(1, 32));

        assert!(window.as_slice().iter().copied().eq(1..=32));
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut window = RetentionWindow::new();
        window.append(&batch(1, 3));
        let before = window.clone();

        window.append(&SampleBatch::new());
        assert_eq!(window, before);
    }

    #[test]
    fn test_clear() {
        let mut window = RetentionWindow::new();
        window.append(&batch(1, 3));
        window.clear();
        assert!(window.is_empty());
    }
}
