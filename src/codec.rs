//! Sample codec
//!
//! Unpacks the 12-bit samples of a hardware FIFO read. Two samples share
//! three bytes:
//!
//! ```text
//! ┌──────────────┬─────────────────────────┬──────────────┐
//! │ byte 0       │ byte 1                  │ byte 2       │
//! │ A[11:4]      │ A[3:0] <<4 | B[11:8]    │ B[7:0]       │
//! └──────────────┴─────────────────────────┴──────────────┘
//! ```
//!
//! Even-indexed samples take a full byte plus the high nibble of the next
//! byte. Odd-indexed samples take the low nibble of the previous byte plus a
//! full byte. A trailing byte that cannot complete a sample is dropped.

use crate::{CAPACITY, MAX_BATCH_BYTES, SAMPLE_MASK};

/// One 12-bit sensor reading in a 16-bit slot
pub type Sample = u16;

/// How the odd-indexed samples merge the shared nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NibbleMerge {
    /// `(prev & 0x0F) << 8 | cur`
    #[default]
    Masked,
    /// Reference firmware behaviour: the mask was applied after the shift,
    /// which clears the whole previous byte, so only `cur` survives.
    Legacy,
}

impl NibbleMerge {
    /// Combine the byte before an odd-indexed sample with its low byte
    #[inline]
    pub fn combine(self, prev: u8, cur: u8) -> Sample {
        match self {
            NibbleMerge::Masked => (Sample::from(prev & 0x0F) << 8) | Sample::from(cur),
            NibbleMerge::Legacy => (Sample::from(prev) & 0x0F00) | Sample::from(cur),
        }
    }
}

/// Samples decoded from one FIFO read
///
/// Fixed storage for a full FIFO, so decoding never allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBatch {
    values: [Sample; CAPACITY],
    len: usize,
}

impl SampleBatch {
    /// Create an empty batch
    pub const fn new() -> Self {
        Self {
            values: [0; CAPACITY],
            len: 0,
        }
    }

    /// Build a batch from already-decoded samples.
    ///
    /// Keeps at most [`CAPACITY`] samples and masks each to 12 bits.
    pub fn from_slice(samples: &[Sample]) -> Self {
        let mut batch = Self::new();
        for &sample in samples.iter().take(CAPACITY) {
            batch.push(sample);
        }
        batch
    }

    #[inline]
    fn push(&mut self, sample: Sample) {
        if self.len < CAPACITY {
            self.values[self.len] = sample & SAMPLE_MASK;
            self.len += 1;
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the batch holds no samples
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Samples in arrival order
    pub fn as_slice(&self) -> &[Sample] {
        &self.values[..self.len]
    }

    /// Iterate over the samples in arrival order
    pub fn iter(&self) -> core::slice::Iter<'_, Sample> {
        self.as_slice().iter()
    }
}

impl Default for SampleBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a SampleBatch {
    type Item = &'a Sample;
    type IntoIter = core::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Byte accounting for one unpack call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnpackReport {
    /// Bytes that contributed to a sample
    pub consumed: usize,
    /// Bytes beyond [`MAX_BATCH_BYTES`] that were cut off before decoding
    pub clamped: usize,
    /// Trailing bytes too short to start a sample
    pub discarded: usize,
}

impl UnpackReport {
    /// Check if the input exceeded the FIFO size
    pub fn was_clamped(&self) -> bool {
        self.clamped > 0
    }
}

/// Unpack a FIFO read with the default [`NibbleMerge::Masked`] layout
pub fn unpack(bytes: &[u8]) -> (SampleBatch, UnpackReport) {
    unpack_with(bytes, NibbleMerge::Masked)
}

/// Unpack a FIFO read
///
/// Input longer than [`MAX_BATCH_BYTES`] is truncated first; the report
/// carries how many bytes were dropped.
pub fn unpack_with(bytes: &[u8], merge: NibbleMerge) -> (SampleBatch, UnpackReport) {
    let clamped = bytes.len().saturating_sub(MAX_BATCH_BYTES);
    let bytes = &bytes[..bytes.len() - clamped];

    let mut batch = SampleBatch::new();
    let mut offset = 0;

    while offset < bytes.len() {
        if batch.len() & 1 == 0 {
            // Needs this byte and the high nibble of the next one
            let Some(&next) = bytes.get(offset + 1) else {
                break;
            };
            batch.push((Sample::from(bytes[offset]) << 4) | Sample::from(next >> 4));
            offset += 2;
        } else {
            batch.push(merge.combine(bytes[offset - 1], bytes[offset]));
            offset += 1;
        }
    }

    let report = UnpackReport {
        consumed: offset,
        clamped,
        discarded: bytes.len() - offset,
    };
    (batch, report)
}

/// Number of samples produced by `byte_count` packed bytes (before clamping)
pub const fn samples_for_bytes(byte_count: usize) -> usize {
    byte_count * 2 / 3
}
