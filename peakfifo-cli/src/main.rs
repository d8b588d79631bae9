// peakfifo - 12-bit sensor FIFO processing
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! # peakfifo CLI
//!
//! Replays a captured FIFO dump and writes the largest 32 and last 32
//! samples.
//!
//! ## Usage
//!
//! ```bash
//! peakfifo test1.bin test1.out
//!
//! # Read a full FIFO per batch and reproduce reference firmware output
//! peakfifo test1.bin test1.out --batch-bytes 48 --legacy-nibbles
//! ```

use clap::Parser;
use peakfifo::{render_to_file, FileTransport, NibbleMerge, Pipeline, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// FIFO capture replayer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Packed 12-bit capture to read
    input: PathBuf,

    /// Text report to write
    output: PathBuf,

    /// Bytes per FIFO read, rounded down to whole sample pairs (3-48)
    #[arg(short, long, default_value_t = peakfifo::DEFAULT_BATCH_BYTES)]
    batch_bytes: usize,

    /// Use the reference firmware's nibble merge for odd samples
    #[arg(long)]
    legacy_nibbles: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            merge: if self.legacy_nibbles {
                NibbleMerge::Legacy
            } else {
                NibbleMerge::Masked
            },
            ..PipelineConfig::with_batch_bytes(self.batch_bytes)
        }
    }
}

fn run(args: &Args) -> peakfifo::Result<()> {
    let config = args.pipeline_config();

    // Fails before any output exists if the capture cannot be opened
    let mut transport = FileTransport::with_batch_bytes(&args.input, config.batch_bytes)?;
    info!(
        "Replaying {} ({} bytes, {} per read)",
        args.input.display(),
        transport.file_size(),
        transport.batch_bytes()
    );

    let mut pipeline = Pipeline::with_config(config);
    let stats = pipeline.run(&mut transport)?;
    info!("{}", stats.report());

    render_to_file(&args.output, pipeline.window(), pipeline.top_k())?;
    info!("Report written to {}", args.output.display());

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
