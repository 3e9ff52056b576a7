//! warcscan-meta: locate the HTML responses of a set of WARC records.
//!
//! Record ids are read from stdin (or `--ids`), one per line. The WAT metadata
//! file is then scanned and, for every 200 `text/html` response among those
//! ids, the container file is printed followed by `offset length` lines.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use warcscan::{input, logging, Correlator, HitWriter, RecordReader, ReferenceSet};

#[derive(Parser)]
#[command(name = "warcscan-meta")]
#[command(about = "Find container offsets of HTML responses for given record ids")]
#[command(version)]
struct Cli {
    /// WAT metadata file (.gz is decompressed)
    meta: PathBuf,

    /// File of record ids, one per line (default: stdin)
    #[arg(long)]
    ids: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let ids = input::open_stream_or_stdin(cli.ids.as_deref())?;
    let references = ReferenceSet::from_reader(ids).context("Failed to read record ids")?;
    info!("Found {} ids", references.len());

    let meta = input::open_stream(&cli.meta)?;
    let mut out = HitWriter::new(BufWriter::new(io::stdout()));
    Correlator::new(&references)
        .correlate(RecordReader::new(meta), &mut out)
        .with_context(|| format!("Correlation of {} aborted", cli.meta.display()))?;
    Ok(())
}
