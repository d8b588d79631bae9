// peakfifo - 12-bit sensor FIFO processing
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Driver loop
//!
//! Pulls FIFO reads from a [`Transport`] until it reports exhaustion. Each
//! read goes through the codec, then into the retention window and the top-K
//! selector. The two consumers are independent, so their order does not
//! matter.

use crate::codec::{self, NibbleMerge};
use crate::error::Result;
use crate::metrics::RunStats;
use crate::topk::TopK;
use crate::transport::Transport;
use crate::window::RetentionWindow;
use crate::{aligned_batch_bytes, DEFAULT_BATCH_BYTES, MAX_BATCH_BYTES};

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Bytes requested from the transport per read (default: 24)
    pub batch_bytes: usize,
    /// Nibble merge used for odd-indexed samples (default: Masked)
    pub merge: NibbleMerge,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_bytes: DEFAULT_BATCH_BYTES,
            merge: NibbleMerge::Masked,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with a custom read size, aligned to whole
    /// sample pairs
    pub fn with_batch_bytes(batch_bytes: usize) -> Self {
        Self {
            batch_bytes: aligned_batch_bytes(batch_bytes),
            ..Default::default()
        }
    }

    /// Create a configuration with a specific nibble merge
    pub fn with_merge(merge: NibbleMerge) -> Self {
        Self {
            merge,
            ..Default::default()
        }
    }
}

/// Driver loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// More batches may follow
    #[default]
    Running,
    /// The transport reported exhaustion
    Done,
}

/// Owns the two result buffers for one run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    window: RetentionWindow,
    top_k: TopK,
    stats: RunStats,
    state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline with the default configuration
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with a custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            config,
            window: RetentionWindow::new(),
            top_k: TopK::new(),
            stats: RunStats::new(),
            state: PipelineState::Running,
        }
    }

    /// Feed one raw FIFO read through the codec and both buffers.
    ///
    /// Reads longer than a full FIFO are truncated and counted, never
    /// rejected.
    pub fn process(&mut self, bytes: &[u8]) {
        let (batch, report) = codec::unpack_with(bytes, self.config.merge);

        #[cfg(feature = "logging")]
        if report.was_clamped() {
            log::warn!(
                "Batch of {} bytes exceeds FIFO size, {} bytes dropped",
                bytes.len(),
                report.clamped
            );
        }

        self.window.append(&batch);
        self.top_k.insert(&batch);
        self.stats.record_batch(bytes.len(), batch.len(), &report);

        #[cfg(feature = "logging")]
        log::debug!(
            "Batch {}: {} bytes, {} samples, window {}, top {}",
            self.stats.batches,
            bytes.len(),
            batch.len(),
            self.window.len(),
            self.top_k.len()
        );
    }

    /// Perform one driver step: read, unpack, update both buffers.
    ///
    /// A transport error is returned before anything is processed.
    pub fn step<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Result<PipelineState> {
        if self.state == PipelineState::Done {
            return Ok(self.state);
        }

        let mut buf = [0u8; MAX_BATCH_BYTES];
        let read = transport.next_batch(&mut buf)?;
        let len = read.len.min(MAX_BATCH_BYTES);
        self.process(&buf[..len]);

        if read.exhausted {
            self.state = PipelineState::Done;
        }
        Ok(self.state)
    }

    /// Drive the transport to exhaustion
    pub fn run<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Result<RunStats> {
        while self.step(transport)? == PipelineState::Running {}

        #[cfg(feature = "logging")]
        log::info!(
            "Run complete: {} batches, {} samples",
            self.stats.batches,
            self.stats.samples_decoded
        );

        Ok(self.stats)
    }

    /// The last 32 samples, oldest first
    pub fn window(&self) -> &RetentionWindow {
        &self.window
    }

    /// The 32 largest samples, largest first
    pub fn top_k(&self) -> &TopK {
        &self.top_k
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Current driver state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clear both buffers and statistics for a new run
    pub fn reset(&mut self) {
        self.window.clear();
        self.top_k.clear();
        self.stats.reset();
        self.state = PipelineState::Running;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
