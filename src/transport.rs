// peakfifo - 12-bit sensor FIFO processing
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Transport abstraction module
//!
//! A transport delivers raw FIFO reads to the driver loop. On hardware this
//! is the sensor bus; here [`FileTransport`] replays a captured dump and
//! [`MemoryTransport`] serves canned batches for tests.

use crate::error::{Error, Result};
use crate::{aligned_batch_bytes, DEFAULT_BATCH_BYTES, MAX_BATCH_BYTES};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Outcome of one transport read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchRead {
    /// Number of bytes written into the caller's buffer
    pub len: usize,
    /// No further batches exist after this one
    pub exhausted: bool,
}

/// Trait for FIFO sources
pub trait Transport {
    /// Read the next batch into `buf`.
    ///
    /// Reaching the end of the stream is reported through
    /// [`BatchRead::exhausted`] on the final read, never as an error.
    fn next_batch(&mut self, buf: &mut [u8; MAX_BATCH_BYTES]) -> Result<BatchRead>;
}

/// Replays a FIFO capture file in fixed-size reads
///
/// The read cursor belongs to the session, so several transports can replay
/// the same file independently.
#[derive(Debug)]
pub struct FileTransport {
    file: File,
    file_size: u64,
    cursor: u64,
    batch_bytes: usize,
}

impl FileTransport {
    /// Open a capture file with the default read size
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_batch_bytes(path, DEFAULT_BATCH_BYTES)
    }

    /// Open a capture file, reading `batch_bytes` per batch.
    ///
    /// The read size is aligned with [`aligned_batch_bytes`].
    pub fn with_batch_bytes(path: impl AsRef<Path>, batch_bytes: usize) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |e: std::io::Error| Error::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let file = File::open(path).map_err(unavailable)?;
        let metadata = file.metadata().map_err(unavailable)?;
        if metadata.is_dir() {
            return Err(Error::SourceUnavailable {
                path: path.display().to_string(),
                reason: "is a directory".to_string(),
            });
        }

        Ok(Self {
            file,
            file_size: metadata.len(),
            cursor: 0,
            batch_bytes: aligned_batch_bytes(batch_bytes),
        })
    }

    /// Size of the capture in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Bytes already delivered
    pub fn position(&self) -> u64 {
        self.cursor
    }

    /// Bytes requested per read
    pub fn batch_bytes(&self) -> usize {
        self.batch_bytes
    }
}

impl Transport for FileTransport {
    fn next_batch(&mut self, buf: &mut [u8; MAX_BATCH_BYTES]) -> Result<BatchRead> {
        let remaining = self.file_size.saturating_sub(self.cursor);
        let want = (self.batch_bytes as u64).min(remaining) as usize;

        let mut len = 0;
        while len < want {
            match self.file.read(&mut buf[len..want]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Read(e.to_string())),
            }
        }

        self.cursor += len as u64;
        // A file that shrank under us ends the run at the short read
        let exhausted = self.cursor >= self.file_size || len < want;

        Ok(BatchRead { len, exhausted })
    }
}

/// In-memory transport serving a fixed list of batches
#[derive(Debug, Default)]
pub struct MemoryTransport {
    batches: VecDeque<Vec<u8>>,
    served: usize,
}

impl MemoryTransport {
    /// Create a transport with no batches; the first read is empty and
    /// exhausted
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that serves `batches` in order
    pub fn with_batches(batches: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
            served: 0,
        }
    }

    /// Queue another batch
    pub fn push_batch(&mut self, batch: Vec<u8>) {
        self.batches.push_back(batch);
    }

    /// Number of batches not yet served
    pub fn pending(&self) -> usize {
        self.batches.len()
    }

    /// Number of batches served so far
    pub fn served(&self) -> usize {
        self.served
    }
}

impl Transport for MemoryTransport {
    fn next_batch(&mut self, buf: &mut [u8; MAX_BATCH_BYTES]) -> Result<BatchRead> {
        let batch = self.batches.pop_front().unwrap_or_default();
        // A read never exceeds the FIFO buffer; longer canned batches are cut
        let len = batch.len().min(MAX_BATCH_BYTES);
        buf[..len].copy_from_slice(&batch[..len]);
        self.served += 1;

        Ok(BatchRead {
            len,
            exhausted: self.batches.is_empty(),
        })
    }
}
