//! Decode targets for the JSON payload of WAT metadata records.
//!
//! WAT files encode most integers as JSON strings, e.g. `"Offset": "1234"`.
//! The integer fields here accept either form. Every field is optional since
//! the payload layout depends on the described record's type.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WatMetadata {
    #[serde(rename = "Envelope")]
    pub envelope: Envelope,
    #[serde(rename = "Container")]
    pub container: Container,
}

impl WatMetadata {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// `WARC-Type` of the described record.
    pub fn record_type(&self) -> &str {
        &self.envelope.header_metadata.warc_type
    }

    /// HTTP status of the described response, 0 when absent.
    pub fn http_status(&self) -> u64 {
        self.envelope
            .payload_metadata
            .response_metadata
            .response_message
            .status
    }

    /// `Content-Type` of the described HTTP response.
    pub fn http_content_type(&self) -> &str {
        &self
            .envelope
            .payload_metadata
            .response_metadata
            .headers
            .content_type
    }
}

/// Where the described record lives in its (gzip) container file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Container {
    #[serde(rename = "Compressed")]
    pub compressed: bool,
    #[serde(rename = "Offset", deserialize_with = "int_or_string")]
    pub offset: u64,
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Gzip-Metadata")]
    pub gzip_metadata: GzipMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GzipMetadata {
    #[serde(rename = "Deflate-Length", deserialize_with = "int_or_string")]
    pub deflate_length: u64,
    #[serde(rename = "Header-Length", deserialize_with = "int_or_string")]
    pub header_length: u64,
    #[serde(rename = "Inflated-Length", deserialize_with = "int_or_string")]
    pub inflated_length: u64,
    #[serde(rename = "Footer-Length", deserialize_with = "int_or_string")]
    pub footer_length: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Envelope {
    #[serde(rename = "Format")]
    pub format: String,
    #[serde(rename = "WARC-Header-Length", deserialize_with = "int_or_string")]
    pub header_length: u64,
    #[serde(rename = "Block-Digest")]
    pub block_digest: String,
    #[serde(rename = "Actual-Content-Length", deserialize_with = "int_or_string")]
    pub actual_content_length: u64,
    #[serde(rename = "WARC-Header-Metadata")]
    pub header_metadata: HeaderMetadata,
    #[serde(rename = "Payload-Metadata")]
    pub payload_metadata: PayloadMetadata,
}

/// Copy of the described record's WARC header.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeaderMetadata {
    #[serde(rename = "WARC-Type")]
    pub warc_type: String,
    #[serde(rename = "Content-Length", deserialize_with = "int_or_string")]
    pub content_length: u64,
    #[serde(rename = "WARC-Record-ID")]
    pub record_id: String,
    #[serde(rename = "WARC-Target-URI")]
    pub target_uri: String,
    #[serde(rename = "Content-Type")]
    pub content_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PayloadMetadata {
    #[serde(rename = "HTTP-Response-Metadata")]
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseMetadata {
    #[serde(rename = "Response-Message")]
    pub response_message: ResponseMessage,
    #[serde(rename = "Headers")]
    pub headers: HttpHeaders,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseMessage {
    #[serde(rename = "Status", deserialize_with = "int_or_string")]
    pub status: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpHeaders {
    #[serde(rename = "Content-Type", alias = "content-type")]
    pub content_type: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(u64),
    Str(String),
}

fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => Ok(value),
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got '{s}'"))),
    }
}
