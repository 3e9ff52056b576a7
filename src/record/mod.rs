//! WARC record framing.
//!
//! A stream is a sequence of records, each a marker line, header lines, a
//! blank line and a body of exactly `Content-Length` bytes.

pub mod body;
pub mod reader;

pub use body::text_body;
pub use reader::RecordReader;

use std::fmt;

/// The `WARC-Type` of a record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordType {
    Warcinfo,
    Metadata,
    Response,
    Request,
    Other(String),
    /// No `WARC-Type` header was present.
    #[default]
    Unknown,
}

impl RecordType {
    pub fn parse(value: &str) -> Self {
        match value {
            "warcinfo" => RecordType::Warcinfo,
            "metadata" => RecordType::Metadata,
            "response" => RecordType::Response,
            "request" => RecordType::Request,
            other => RecordType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordType::Warcinfo => "warcinfo",
            RecordType::Metadata => "metadata",
            RecordType::Response => "response",
            RecordType::Request => "request",
            RecordType::Other(other) => other,
            RecordType::Unknown => "",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed record. Owned by whichever task handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// `WARC-Record-ID`.
    pub id: String,
    pub warc_type: RecordType,
    /// `WARC-Refers-To`, set on metadata and conversion records.
    pub refers_to: Option<String>,
    /// `Content-Length`; always equal to `body.len()`.
    pub content_length: usize,
    /// Header lines in stream order, starting with the marker.
    pub header: Vec<String>,
    pub body: Vec<u8>,
}

impl Record {
    /// Re-serialize the record in wire form, CRLF line endings included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 256);
        for line in &self.header {
            out.extend_from_slice(line.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out.extend_from_slice(b"\r\n\r\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_parse() {
        assert_eq!(RecordType::parse("warcinfo"), RecordType::Warcinfo);
        assert_eq!(RecordType::parse("metadata"), RecordType::Metadata);
        assert_eq!(RecordType::parse("response"), RecordType::Response);
        assert_eq!(RecordType::parse("request"), RecordType::Request);
        assert_eq!(
            RecordType::parse("conversion"),
            RecordType::Other("conversion".to_string())
        );
    }

    #[test]
    fn test_record_type_display_roundtrip() {
        for name in ["warcinfo", "metadata", "response", "request", "revisit"] {
            assert_eq!(RecordType::parse(name).to_string(), name);
        }
    }
}
