//! Opening record streams, handling .gz compression.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

const READ_BUFFER: usize = 256 * 1024;

/// Open a record stream for reading, decompressing `.gz` files.
///
/// WAT and WARC files are concatenations of gzip members, one per record, so
/// the decoder keeps going past the first member.
pub fn open_stream(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::with_capacity(READ_BUFFER, file);

    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    if name.ends_with(".gz") {
        let decoder = MultiGzDecoder::new(reader);
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER, decoder)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Open `path` if given, otherwise standard input.
pub fn open_stream_or_stdin(path: Option<&Path>) -> Result<Box<dyn BufRead + Send>> {
    match path {
        Some(path) => open_stream(path),
        None => Ok(Box::new(BufReader::with_capacity(READ_BUFFER, io::stdin()))),
    }
}
