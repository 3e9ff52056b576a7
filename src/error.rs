//! Error types shared by the reader, classifier and correlator.
//!
//! Every variant is fatal for the stream being processed: a single malformed
//! record means the rest of the stream cannot be trusted. Records that are
//! merely uninteresting are skipped through `Option::None`, never through an
//! error.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Malformed record boundaries or headers.
#[derive(Debug, Error)]
pub enum FramingError {
    /// A non-blank line appeared where a record marker was expected.
    #[error("line {line_no}: expected record marker, found '{line}'")]
    UnexpectedLine { line_no: u64, line: String },
    /// The header ran past the configured ceiling without a blank line.
    #[error("line {line_no}: header exceeds {limit} lines")]
    HeaderTooLong { line_no: u64, limit: usize },
    /// The stream ended before the blank line closing the header.
    #[error("line {line_no}: stream ended inside a record header")]
    TruncatedHeader { line_no: u64 },
    /// `Content-Length` is not a non-negative integer.
    #[error("line {line_no}: invalid Content-Length '{value}'")]
    InvalidContentLength { line_no: u64, value: String },
    /// `Content-Length` was absent or zero.
    #[error("record {record_id}: no content length declared")]
    MissingContentLength { record_id: String },
    /// The header has no `WARC-Record-ID`.
    #[error("line {line_no}: record has no WARC-Record-ID")]
    MissingRecordId { line_no: u64 },
    /// The stream ended before the declared body length was read.
    #[error("record {record_id}: read {read} of {expected} body bytes")]
    TruncatedBody {
        record_id: String,
        expected: usize,
        read: usize,
    },
    /// A metadata record without the `WARC-Refers-To` pointer.
    #[error("metadata record {record_id} has no WARC-Refers-To")]
    MissingRefersTo { record_id: String },
}

/// The sampled regime failed to place every drawn sample on a codepoint.
///
/// This can only happen through an indexing defect, so callers treat it as
/// an invariant violation rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sampling consumed only {found} of {expected} samples")]
pub struct SamplingError {
    pub found: usize,
    pub expected: usize,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),
    #[error("record {record_id}: malformed metadata payload: {source}")]
    Decode {
        record_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("classifier invariant violated: {0}")]
    Sampling(#[from] SamplingError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Every sender went away before the collector saw all outcomes.
    #[error("collector lost its senders after {received} outcomes (expected {expected:?})")]
    CollectorDisconnected {
        received: usize,
        expected: Option<usize>,
    },
    /// A pool or collector thread panicked.
    #[error("worker thread panicked")]
    WorkerLost,
}
