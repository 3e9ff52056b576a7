//! warcscan: print the WARC records whose text is mostly in a target script.
//!
//! Reads a WARC/WET stream from stdin (or `--input`), classifies every record
//! concurrently and prints matching record ids, or their text with
//! `--emit body`. Output order follows completion, not input order.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use warcscan::config::{self, ClassifierConfig, DetectConfig, Emit, Sampling};
use warcscan::{input, logging, run_detect, ScriptSet};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// Threshold 0.35, 500 byte-offset samples
    Ids,
    /// Threshold 0.30, 200 codepoint samples
    Bodies,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SamplingArg {
    Codepoint,
    ByteOffset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmitArg {
    Id,
    Body,
}

#[derive(Debug, Parser)]
#[command(name = "warcscan")]
#[command(about = "Detect WARC records written mostly in a target script")]
#[command(version)]
struct Command {
    /// WARC/WET file to read instead of stdin (.gz is decompressed)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Target-script seed file, one character per line
    #[arg(short, long)]
    charset: Option<PathBuf>,
    /// Parameter set of a known deployment; other flags override it
    #[arg(long, value_enum, default_value = "ids")]
    preset: Preset,
    #[arg(long)]
    threshold: Option<f64>,
    #[arg(long)]
    sample_size: Option<usize>,
    #[arg(long, value_enum)]
    sampling: Option<SamplingArg>,
    /// What to print for a match; defaults to the preset's output
    #[arg(long, value_enum)]
    emit: Option<EmitArg>,
    /// Classification threads (default: available CPUs)
    #[arg(short, long)]
    workers: Option<usize>,
    #[arg(long, default_value_t = config::MAX_IN_FLIGHT)]
    max_in_flight: usize,
    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long)]
    verbose: bool,
    #[arg(short, long)]
    quiet: bool,
}

impl Command {
    fn detect_config(&self) -> DetectConfig {
        let (mut classifier, emit) = match self.preset {
            Preset::Ids => (ClassifierConfig::record_ids(), Emit::Id),
            Preset::Bodies => (ClassifierConfig::bodies(), Emit::Body),
        };
        if let Some(threshold) = self.threshold {
            classifier.threshold = threshold;
        }
        if let Some(sample_size) = self.sample_size {
            classifier.sample_size = sample_size;
        }
        if let Some(sampling) = self.sampling {
            classifier.sampling = match sampling {
                SamplingArg::Codepoint => Sampling::Codepoint,
                SamplingArg::ByteOffset => Sampling::ByteOffset,
            };
        }

        let mut detect = DetectConfig {
            classifier,
            emit: match self.emit {
                Some(EmitArg::Id) => Emit::Id,
                Some(EmitArg::Body) => Emit::Body,
                None => emit,
            },
            max_in_flight: self.max_in_flight,
            seed: self.seed,
            ..DetectConfig::default()
        };
        if let Some(workers) = self.workers {
            detect.workers = workers;
        }
        detect
    }
}

fn main() -> Result<()> {
    let opts = Command::parse();
    logging::init(opts.verbose, opts.quiet);

    let charset = config::charset_path(opts.charset.as_deref());
    let script = ScriptSet::load(&charset)
        .with_context(|| format!("Failed to load character set {}", charset.display()))?;
    if script.is_empty() {
        warn!("Character set {} is empty, no record can match", charset.display());
    } else {
        info!("Loaded {} target characters from {}", script.len(), charset.display());
    }

    let reader = input::open_stream_or_stdin(opts.input.as_deref())?;
    let out = BufWriter::new(io::stdout());
    run_detect(reader, Arc::new(script), &opts.detect_config(), out)
        .context("Detection aborted")?;
    Ok(())
}
