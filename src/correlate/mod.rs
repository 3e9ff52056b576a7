//! Cross-reference record identifiers against a WAT metadata stream.
//!
//! For every metadata record that refers to one of the requested identifiers
//! and describes an HTTP 200 `text/html` response, the correlator reports
//! where the response sits in its gzip container: file name, byte offset and
//! compressed length.

pub mod metadata;
pub mod output;
pub mod reference;

pub use metadata::WatMetadata;
pub use output::HitWriter;
pub use reference::ReferenceSet;

use std::io::{BufRead, Write};

use log::{debug, info, trace};

use crate::error::{Error, FramingError, Result};
use crate::record::{Record, RecordReader, RecordType};

const RESPONSE_TYPE: &str = "response";
const HTML_CONTENT_TYPE: &str = "text/html";
const HTTP_OK: u64 = 200;

/// Location of a qualifying response inside its container file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub filename: String,
    pub offset: u64,
    /// Compressed (deflate) length of the gzip member.
    pub length: u64,
}

/// Counters for one correlation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorrelationStats {
    pub records: u64,
    pub metadata_records: u64,
    pub referenced: u64,
    pub hits: u64,
    pub files: u64,
}

pub struct Correlator<'a> {
    references: &'a ReferenceSet,
}

impl<'a> Correlator<'a> {
    pub fn new(references: &'a ReferenceSet) -> Self {
        Correlator { references }
    }

    /// Decide whether `record` yields a hit.
    ///
    /// `Ok(None)` is a skip. A metadata record without `WARC-Refers-To` and an
    /// undecodable payload are errors.
    pub fn evaluate(&self, record: &Record) -> Result<Option<Hit>> {
        if record.warc_type != RecordType::Metadata {
            return Ok(None);
        }
        let refers_to =
            record
                .refers_to
                .as_deref()
                .ok_or_else(|| FramingError::MissingRefersTo {
                    record_id: record.id.clone(),
                })?;
        if !self.references.contains(refers_to) {
            return Ok(None);
        }

        let meta = WatMetadata::from_slice(&record.body).map_err(|source| Error::Decode {
            record_id: record.id.clone(),
            source,
        })?;

        if meta.record_type() != RESPONSE_TYPE {
            trace!("{refers_to}: not a response ({})", meta.record_type());
            return Ok(None);
        }
        if meta.http_status() != HTTP_OK {
            trace!("{refers_to}: status {}", meta.http_status());
            return Ok(None);
        }
        if !meta.http_content_type().contains(HTML_CONTENT_TYPE) {
            trace!("{refers_to}: content type '{}'", meta.http_content_type());
            return Ok(None);
        }

        Ok(Some(Hit {
            filename: meta.container.filename,
            offset: meta.container.offset,
            length: meta.container.gzip_metadata.deflate_length,
        }))
    }

    /// Stream every hit in `records` to `out`, stopping at the first error.
    pub fn correlate<R: BufRead, W: Write>(
        &self,
        records: RecordReader<R>,
        out: &mut HitWriter<W>,
    ) -> Result<CorrelationStats> {
        let mut stats = CorrelationStats::default();
        let groups_before = out.groups();

        for record in records {
            let record = record?;
            stats.records += 1;
            if record.warc_type == RecordType::Metadata {
                stats.metadata_records += 1;
                if record
                    .refers_to
                    .as_deref()
                    .is_some_and(|id| self.references.contains(id))
                {
                    stats.referenced += 1;
                }
            }

            if let Some(hit) = self.evaluate(&record)? {
                debug!("{} -> {} @ {}", record.id, hit.filename, hit.offset);
                out.write_hit(&hit)?;
                stats.hits += 1;
            }
        }
        out.flush()?;
        stats.files = (out.groups() - groups_before) as u64;

        info!(
            "Scanned {} records ({} metadata, {} referenced): {} hits in {} file groups",
            stats.records, stats.metadata_records, stats.referenced, stats.hits, stats.files
        );
        Ok(stats)
    }
}
