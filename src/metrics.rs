//! Run statistics
//!
//! Counters collected by the driver loop, useful for spotting short reads,
//! oversized batches and odd-length captures.

use crate::codec::UnpackReport;
use core::fmt;

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of transport reads processed
    pub batches: u64,
    /// Total raw bytes delivered by the transport
    pub bytes_read: u64,
    /// Total samples produced by the codec
    pub samples_decoded: u64,
    /// Reads larger than a full FIFO that had to be truncated
    pub clamped_batches: u64,
    /// Bytes dropped, either past the FIFO size or as a lone trailing byte
    pub discarded_bytes: u64,
}

impl RunStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one unpacked batch
    pub fn record_batch(&mut self, raw_len: usize, samples: usize, report: &UnpackReport) {
        self.batches += 1;
        self.bytes_read += raw_len as u64;
        self.samples_decoded += samples as u64;
        if report.was_clamped() {
            self.clamped_batches += 1;
        }
        self.discarded_bytes += (report.clamped + report.discarded) as u64;
    }

    /// Average samples per batch
    pub fn average_batch_samples(&self) -> f64 {
        if self.batches == 0 {
            return 0.0;
        }
        self.samples_decoded as f64 / self.batches as f64
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a human-readable report
    #[cfg(feature = "std")]
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== FIFO Run Statistics ===")?;
        writeln!(f, "Batches read: {}", self.batches)?;
        writeln!(f, "Bytes read: {} bytes", self.bytes_read)?;
        writeln!(f, "Samples decoded: {}", self.samples_decoded)?;
        writeln!(
            f,
            "Average samples per batch: {:.1}",
            self.average_batch_samples()
        )?;
        writeln!(f, "Clamped batches: {}", self.clamped_batches)?;
        write!(f, "Discarded bytes: {}", self.discarded_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_batch() {
        let mut stats = RunStats::new();
        let report = UnpackReport {
            consumed: 24,
            clamped: 0,
            discarded: 0,
        };
        stats.record_batch(24, 16, &report);
        stats.record_batch(24, 16, &report);

        assert_eq!(stats.batches, 2);
        assert_eq!(stats.bytes_read, 48);
        assert_eq!(stats.samples_decoded, 32);
        assert_eq!(stats.clamped_batches, 0);
        assert_eq!(stats.average_batch_samples(), 16.0);
    }

    #[test]
    fn test_clamped_and_discarded() {
        let mut stats = RunStats::new();
        let report = UnpackReport {
            consumed: 46,
            clamped: 4,
            discarded: 2,
        };
        stats.record_batch(52, 31, &report);

        assert_eq!(stats.clamped_batches, 1);
        assert_eq!(stats.discarded_bytes, 6);
    }

    #[test]
    fn test_empty_stats() {
        let stats = RunStats::new();
        assert_eq!(stats.average_batch_samples(), 0.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_report_generation() {
        let mut stats = RunStats::new();
        stats.record_batch(3, 2, &UnpackReport::default());

        let report = stats.report();
        assert!(report.contains("Batches read: 1"));
        assert!(report.contains("Samples decoded: 2"));
    }

    #[test]
    fn test_reset() {
        let mut stats = RunStats::new();
        stats.record_batch(3, 2, &UnpackReport::default());
        stats.reset();
        assert_eq!(stats, RunStats::default());
    }
}
