//! # peakfifo - 12-bit sensor FIFO processing
//!
//! Unpacks 12-bit samples read from a packed hardware FIFO and keeps two
//! views over the whole stream in fixed memory: the last 32 samples and the
//! 32 largest samples.
//!
//! ## Key Features
//!
//! - **Fixed storage**: every structure is a 32-slot array plus a length
//! - **No allocation** in the per-batch path (`unpack`, `append`, `insert`)
//! - **`no_std` core**: the codec, window and selector build without `std`
//! - **File simulation**: a transport that replays a captured FIFO dump
//!
//! ## Quick Start
//!
//! ```rust
//! use peakfifo::{codec, RetentionWindow, TopK};
//!
//! let mut window = RetentionWindow::new();
//! let mut top = TopK::new();
//!
//! let (batch, _) = codec::unpack(&[0xAB, 0xCD, 0xEF]);
//! window.append(&batch);
//! top.insert(&batch);
//!
//! assert_eq!(window.as_slice(), &[0xABC, 0xDEF]);
//! assert_eq!(top.as_slice(), &[0xDEF, 0xABC]);
//! ```
//!
//! With `std`, [`Pipeline`] drives a [`Transport`] to exhaustion:
//!
//! ```rust
//! # #[cfg(feature = "std")]
//! # {
//! use peakfifo::{MemoryTransport, Pipeline};
//!
//! let mut transport = MemoryTransport::with_batches(vec![vec![0x0F, 0x00, 0x00]]);
//! let mut pipeline = Pipeline::new();
//! let stats = pipeline.run(&mut transport).unwrap();
//!
//! assert_eq!(stats.samples_decoded, 2);
//! assert_eq!(pipeline.window().as_slice(), &[0x0F0, 0x000]);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: 12-bit unpacking
//! - [`window`]: last-32 retention window
//! - [`topk`]: largest-32 selector
//! - [`metrics`]: run statistics
//! - `pipeline`, `transport`, `render`, `error`: std-only driver and I/O

#![cfg_attr(not(feature = "std"), no_std)]

// Modules
pub mod codec;
pub mod metrics;
pub mod topk;
pub mod window;

#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
pub mod pipeline;
#[cfg(feature = "std")]
pub mod render;
#[cfg(feature = "std")]
pub mod transport;

// Re-exports for convenient access
pub use codec::{NibbleMerge, Sample, SampleBatch};
pub use metrics::RunStats;
pub use topk::TopK;
pub use window::RetentionWindow;

#[cfg(feature = "std")]
pub use error::{Error, Result};
#[cfg(feature = "std")]
pub use pipeline::{Pipeline, PipelineConfig, PipelineState};
#[cfg(feature = "std")]
pub use render::{render, render_to_file, MAX_HEADER, WINDOW_HEADER};
#[cfg(feature = "std")]
pub use transport::{BatchRead, FileTransport, MemoryTransport, Transport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of samples held by the hardware FIFO, the window and the selector
pub const CAPACITY: usize = 32;

/// Packed size of a full FIFO: 32 samples of 12 bits
pub const MAX_BATCH_BYTES: usize = CAPACITY * 3 / 2;

/// Default number of bytes requested from a transport per read
pub const DEFAULT_BATCH_BYTES: usize = 24;

/// Mask of the valid bits in a sample
pub const SAMPLE_MASK: u16 = 0x0FFF;

/// Round a requested read size down to whole sample pairs, between one pair
/// and a full FIFO.
///
/// A read that splits a 3-byte pair would restart the nibble alternation
/// mid-pair on the next batch.
pub const fn aligned_batch_bytes(requested: usize) -> usize {
    let aligned = requested - requested % 3;
    if aligned < 3 {
        3
    } else if aligned > MAX_BATCH_BYTES {
        MAX_BATCH_BYTES
    } else {
        aligned
    }
}
