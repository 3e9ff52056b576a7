use std::io::{BufRead, Read};

use crate::config::ReaderConfig;
use crate::error::{FramingError, Result};
use crate::record::{Record, RecordType};

const TYPE_PREFIX: &str = "WARC-Type: ";
const LENGTH_PREFIX: &str = "Content-Length: ";
const REFERS_TO_PREFIX: &str = "WARC-Refers-To: ";
const RECORD_ID_PREFIX: &str = "WARC-Record-ID: ";

const MAX_BODY_PREALLOC: usize = 1 << 20;

/// Splits a line-oriented byte stream into [`Record`]s.
///
/// Must be positioned at a record boundary (optionally preceded by blank
/// lines). Any error leaves the stream in an unknown position, so the
/// iterator stops after yielding the first one.
pub struct RecordReader<R> {
    inner: R,
    config: ReaderConfig,
    line: Vec<u8>,
    line_no: u64,
    records: u64,
    failed: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    pub fn with_config(inner: R, config: ReaderConfig) -> Self {
        RecordReader {
            inner,
            config,
            line: Vec::with_capacity(256),
            line_no: 0,
            records: 0,
            failed: false,
        }
    }

    /// Lines consumed so far, body lines excluded.
    pub fn line_no(&self) -> u64 {
        self.line_no
    }

    /// Records returned so far.
    pub fn records_read(&self) -> u64 {
        self.records
    }

    /// Read the next line, trimmed. `None` at end of stream.
    fn next_line(&mut self) -> Result<Option<String>> {
        self.line.clear();
        if self.inner.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(String::from_utf8_lossy(&self.line).trim().to_string()))
    }

    /// Parse the next record. `Ok(None)` means the stream ended cleanly
    /// between records.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let marker = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) if line == self.config.marker => break line,
                Some(line) => {
                    return Err(FramingError::UnexpectedLine {
                        line_no: self.line_no,
                        line,
                    }
                    .into())
                }
            }
        };

        let mut header = vec![marker];
        let mut warc_type = RecordType::Unknown;
        let mut content_length = 0usize;
        let mut refers_to = None;
        let mut id = None;

        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None => {
                    return Err(FramingError::TruncatedHeader {
                        line_no: self.line_no,
                    }
                    .into())
                }
            };
            if line.is_empty() {
                break;
            }
            if header.len() > self.config.max_header_lines {
                return Err(FramingError::HeaderTooLong {
                    line_no: self.line_no,
                    limit: self.config.max_header_lines,
                }
                .into());
            }

            if let Some(value) = line.strip_prefix(TYPE_PREFIX) {
                warc_type = RecordType::parse(value);
            } else if let Some(value) = line.strip_prefix(LENGTH_PREFIX) {
                content_length =
                    value
                        .parse()
                        .map_err(|_| FramingError::InvalidContentLength {
                            line_no: self.line_no,
                            value: value.to_string(),
                        })?;
            } else if let Some(value) = line.strip_prefix(REFERS_TO_PREFIX) {
                refers_to = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix(RECORD_ID_PREFIX) {
                id = Some(value.to_string());
            }
            header.push(line);
        }

        let id = id.ok_or(FramingError::MissingRecordId {
            line_no: self.line_no,
        })?;
        if content_length == 0 {
            return Err(FramingError::MissingContentLength { record_id: id }.into());
        }

        let body = self.read_body(&id, content_length)?;
        self.records += 1;

        Ok(Some(Record {
            id,
            warc_type,
            refers_to,
            content_length,
            header,
            body,
        }))
    }

    /// Read exactly `len` body bytes. The buffer grows with what actually
    /// arrives, so a corrupt `Content-Length` cannot force a huge allocation.
    fn read_body(&mut self, id: &str, len: usize) -> Result<Vec<u8>> {
        let mut body = Vec::with_capacity(len.min(MAX_BODY_PREALLOC));
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut body)?;
        if read < len {
            return Err(FramingError::TruncatedBody {
                record_id: id.to_string(),
                expected: len,
                read,
            }
            .into());
        }
        Ok(body)
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
