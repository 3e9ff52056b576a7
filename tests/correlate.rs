//! End-to-end tests for metadata correlation and the `warcscan-meta` binary.

mod common;

use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use common::{metadata_record, warc_record, wat_payload, warcinfo_record, write_gz};
use warcscan::{Correlator, Error, HitWriter, RecordReader, ReferenceSet};

fn correlate(references: &ReferenceSet, stream: &[u8]) -> warcscan::Result<String> {
    let mut out = HitWriter::new(Vec::new());
    Correlator::new(references).correlate(RecordReader::new(Cursor::new(stream)), &mut out)?;
    Ok(String::from_utf8(out.into_inner()).unwrap())
}

/// A WAT stream shaped like Common Crawl's: warcinfo, then request/response
/// records each followed by their metadata.
fn wat_stream() -> Vec<u8> {
    let mut bytes = warcinfo_record("<urn:uuid:wat-info>");
    let entries = [
        ("<urn:uuid:id-1>", "a.warc.gz", 100, 50, 200, "text/html; charset=UTF-8"),
        ("<urn:uuid:id-2>", "a.warc.gz", 200, 60, 404, "text/html"),
        ("<urn:uuid:id-3>", "a.warc.gz", 300, 70, 200, "text/html"),
        ("<urn:uuid:id-4>", "a.warc.gz", 400, 80, 200, "text/html"),
        ("<urn:uuid:id-5>", "b.warc.gz", 0, 90, 200, "TEXT/HTML"),
        ("<urn:uuid:id-6>", "b.warc.gz", 10, 11, 200, "text/html"),
    ];
    for (i, (id, file, offset, length, status, content_type)) in entries.iter().enumerate() {
        bytes.extend(warc_record(id, "response", None, b"HTTP/1.1 200 OK\r\n\r\n<html/>"));
        bytes.extend(metadata_record(
            &format!("<urn:uuid:meta-{i}>"),
            id,
            &wat_payload("response", file, *offset, *length, *status, content_type),
        ));
    }
    bytes
}

#[test]
fn test_only_referenced_html_responses_are_emitted() {
    let references: ReferenceSet = ["<urn:uuid:id-1>", "<urn:uuid:id-2>"].into_iter().collect();
    let mut stream = Vec::new();
    stream.extend(metadata_record(
        "<urn:uuid:m1>",
        "<urn:uuid:id-1>",
        &wat_payload("response", "f.warc.gz", 1234, 567, 200, "text/html"),
    ));
    stream.extend(metadata_record(
        "<urn:uuid:m2>",
        "<urn:uuid:id-2>",
        &wat_payload("response", "f.warc.gz", 2000, 10, 404, "text/html"),
    ));
    stream.extend(metadata_record(
        "<urn:uuid:m3>",
        "<urn:uuid:id-3>",
        &wat_payload("response", "f.warc.gz", 3000, 10, 200, "text/html"),
    ));

    assert_eq!(correlate(&references, &stream).unwrap(), "f.warc.gz\n1234 567\n");
}

#[test]
fn test_grouped_output() {
    let references: ReferenceSet = (1..=6).map(|i| format!("<urn:uuid:id-{i}>")).collect();
    let out = correlate(&references, &wat_stream()).unwrap();
    // id-2 is a 404; id-5's content type does not contain "text/html".
    assert_eq!(
        out,
        "a.warc.gz\n100 50\n300 70\n400 80\n\nb.warc.gz\n10 11\n"
    );
}

#[test]
fn test_request_metadata_is_skipped() {
    let references: ReferenceSet = ["<urn:uuid:req>"].into_iter().collect();
    let stream = metadata_record(
        "<urn:uuid:m>",
        "<urn:uuid:req>",
        &wat_payload("request", "f.warc.gz", 1, 1, 200, "text/html"),
    );
    assert_eq!(correlate(&references, &stream).unwrap(), "");
}

#[test]
fn test_correlation_is_idempotent() {
    let references: ReferenceSet = (1..=6).map(|i| format!("<urn:uuid:id-{i}>")).collect();
    let stream = wat_stream();
    let first = correlate(&references, &stream).unwrap();
    let second = correlate(&references, &stream).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stats() {
    let references: ReferenceSet = ["<urn:uuid:id-1>", "<urn:uuid:id-5>"].into_iter().collect();
    let mut out = HitWriter::new(Vec::new());
    let stats = Correlator::new(&references)
        .correlate(RecordReader::new(Cursor::new(wat_stream())), &mut out)
        .unwrap();
    assert_eq!(stats.records, 13);
    assert_eq!(stats.metadata_records, 6);
    assert_eq!(stats.referenced, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.files, 1);
}

#[test]
fn test_metadata_without_refers_to_is_fatal() {
    let references: ReferenceSet = ["<urn:uuid:id-1>"].into_iter().collect();
    let stream = warc_record("<urn:uuid:m>", "metadata", None, b"{}");
    let err = correlate(&references, &stream).unwrap_err();
    assert!(matches!(err, Error::Framing(_)), "{err}");
}

#[test]
fn test_malformed_payload_is_fatal() {
    let references: ReferenceSet = ["<urn:uuid:id-1>"].into_iter().collect();
    let stream = metadata_record("<urn:uuid:m>", "<urn:uuid:id-1>", "{\"Envelope\": [");
    let err = correlate(&references, &stream).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "{err}");
}

fn run_meta(meta: &Path, ids: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_warcscan-meta"))
        .arg(meta)
        .arg("--quiet")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run warcscan-meta");
    child.stdin.take().unwrap().write_all(ids.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_binary_on_gzip_wat() {
    let dir = tempfile::tempdir().unwrap();
    let meta = dir.path().join("sample.warc.wat.gz");
    // One gzip member per record, as in published WAT files.
    let stream = wat_stream();
    let records: Vec<Vec<u8>> = RecordReader::new(Cursor::new(stream))
        .map(|r| r.unwrap().to_bytes())
        .collect();
    write_gz(&meta, &records);

    let output = run_meta(&meta, "<urn:uuid:id-3>\n<urn:uuid:id-6>\n");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "a.warc.gz\n300 70\n\nb.warc.gz\n10 11\n"
    );
}

#[test]
fn test_binary_fails_on_bad_payload() {
    let dir = tempfile::tempdir().unwrap();
    let meta = dir.path().join("bad.wat.gz");
    write_gz(
        &meta,
        &[metadata_record("<urn:uuid:m>", "<urn:uuid:id-1>", "not json")],
    );

    let output = run_meta(&meta, "<urn:uuid:id-1>\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed metadata payload"));
}
