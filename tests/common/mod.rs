//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

/// A WARC record in wire form with CRLF line endings.
pub fn warc_record(id: &str, warc_type: &str, refers_to: Option<&str>, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"WARC/1.0\r\n");
    out.extend_from_slice(format!("WARC-Type: {warc_type}\r\n").as_bytes());
    out.extend_from_slice(format!("WARC-Record-ID: {id}\r\n").as_bytes());
    if let Some(target) = refers_to {
        out.extend_from_slice(format!("WARC-Refers-To: {target}\r\n").as_bytes());
    }
    out.extend_from_slice(b"WARC-Date: 2013-05-18T05:19:37Z\r\n");
    out.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
    out.extend_from_slice(body);
    out.extend_from_slice(b"\r\n\r\n");
    out
}

/// A WET-style conversion record holding `text`.
pub fn text_record(id: &str, text: &str) -> Vec<u8> {
    warc_record(id, "conversion", None, text.as_bytes())
}

pub fn warcinfo_record(id: &str) -> Vec<u8> {
    warc_record(
        id,
        "warcinfo",
        None,
        "software: crawler\r\nformat: WARC File Format 1.0\r\n".as_bytes(),
    )
}

/// JSON body of a WAT metadata record describing an HTTP response.
pub fn wat_payload(
    kind: &str,
    filename: &str,
    offset: u64,
    deflate_length: u64,
    status: u16,
    content_type: &str,
) -> String {
    let value = serde_json::json!({
        "Container": {
            "Filename": filename,
            "Compressed": true,
            "Offset": offset.to_string(),
            "Gzip-Metadata": {
                "Deflate-Length": deflate_length.to_string(),
                "Header-Length": "10",
                "Footer-Length": "8",
                "Inflated-Length": "4096"
            }
        },
        "Envelope": {
            "Format": "WARC",
            "WARC-Header-Length": "320",
            "Block-Digest": "sha1:2WAXX5NUWNNCS2BDKCO5OVDQBJVNKIVV",
            "Actual-Content-Length": "3700",
            "WARC-Header-Metadata": {
                "WARC-Type": kind,
                "Content-Length": "3700",
                "WARC-Record-ID": "<urn:uuid:described>",
                "WARC-Target-URI": "http://example.com/",
                "Content-Type": "application/http; msgtype=response"
            },
            "Payload-Metadata": {
                "HTTP-Response-Metadata": {
                    "Response-Message": {
                        "Version": "HTTP/1.1",
                        "Status": status.to_string(),
                        "Reason": "OK"
                    },
                    "Headers": { "Content-Type": content_type }
                }
            }
        }
    });
    value.to_string()
}

/// A WAT metadata record that refers to `refers_to`.
pub fn metadata_record(id: &str, refers_to: &str, payload: &str) -> Vec<u8> {
    warc_record(id, "metadata", Some(refers_to), payload.as_bytes())
}

/// Write `bytes` gzip-compressed, one member per chunk like a real WAT file.
pub fn write_gz(path: &Path, chunks: &[Vec<u8>]) {
    let mut file = std::fs::File::create(path).unwrap();
    for chunk in chunks {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(chunk).unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
    }
}

pub const HAN_TEXT: &str = "中文网页的正文内容是用来测试脚本检测的一个例子我们在这里写了很多汉字";

/// Write a seed file holding every character of `HAN_TEXT`, one per line.
pub fn write_charset(path: &Path) {
    let lines: Vec<String> = HAN_TEXT.chars().map(|c| format!("{c}\n")).collect();
    std::fs::write(path, lines.concat()).unwrap();
}

pub const LATIN_TEXT: &str = "The quick brown fox jumps over the lazy dog while the archive crawler \
    fetches another page of plain English text that contains no target characters at all.";
