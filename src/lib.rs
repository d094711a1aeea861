#![warn(rust_2018_idioms)]

//! Compresses WebRTC diagnostic event logs into compact JSONL suitable for
//! LLM analysis. Input is a JSON array of `[name, scope, payload, ts]`
//! events; each payload shrinks through a per-event-type transform, with
//! counter-to-delta conversion, SDP digests, and optional adaptive
//! sampling of dense getstats telemetry.

pub mod error;
pub mod event;
pub mod handlers;
pub mod ice;
pub mod pipeline;
pub mod prompts;
pub mod sampling;
pub mod sdp;
pub mod transform;

mod count_writer;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use count_writer::CountWriter;

pub use error::{Error, Result};
pub use event::TimestampMode;
pub use sampling::SamplingConfig;

/// Processing behavior knobs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    pub ts_mode: TimestampMode,
    /// Indented JSON output.
    pub pretty: bool,
    /// Adaptive sampling of getstats events; `None` disables it.
    pub sampling: Option<SamplingConfig>,
}

/// Processing statistics for the size report.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    pub input_bytes: u64,
    pub output_bytes: u64,
    /// 0–1 fraction of input removed.
    pub reduction: f64,
    pub event_count: usize,
}

impl Summary {
    fn new(input_bytes: u64, output_bytes: u64, event_count: usize) -> Summary {
        let reduction = if input_bytes > 0 {
            1.0 - output_bytes as f64 / input_bytes as f64
        } else {
            0.0
        };
        Summary {
            input_bytes,
            output_bytes,
            reduction,
            event_count,
        }
    }
}

/// Processes input bytes in memory and returns the output bytes.
pub fn process_bytes(input: &[u8], options: &Options) -> Result<(Vec<u8>, Summary)> {
    let reader = event::Reader::new(input)?;

    let mut sink = CountWriter::new(Vec::new());
    let mut pipeline = pipeline::Pipeline::new(
        &mut sink,
        options.ts_mode,
        options.pretty,
        options.sampling,
    );
    pipeline.run(reader.events())?;

    let summary = Summary::new(input.len() as u64, sink.count(), reader.len());
    log::debug!(
        "processed {} events: {} -> {}",
        summary.event_count,
        summary.input_bytes,
        summary.output_bytes
    );
    Ok((sink.into_inner(), summary))
}

/// Reads all of `input`, processes it, and writes JSONL to `output`.
pub fn process<R: Read, W: Write>(mut input: R, output: W, options: &Options) -> Result<Summary> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    let reader = event::Reader::new(&data)?;

    let mut sink = CountWriter::new(output);
    let mut pipeline = pipeline::Pipeline::new(
        &mut sink,
        options.ts_mode,
        options.pretty,
        options.sampling,
    );
    pipeline.run(reader.events())?;

    Ok(Summary::new(data.len() as u64, sink.count(), reader.len()))
}

/// Processes `input_path`; `None` or "-" as `output_path` writes to stdout.
pub fn process_file(
    input_path: &Path,
    output_path: Option<&Path>,
    options: &Options,
) -> Result<Summary> {
    let input = File::open(input_path)?;

    match output_path {
        Some(path) if path.as_os_str() != "-" => {
            let output = File::create(path)?;
            process(input, output, options)
        }
        _ => process(input, io::stdout().lock(), options),
    }
}

/// Formats a byte count the way the size report wants it.
pub fn human_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
