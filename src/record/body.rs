//! Text reconstruction for classification.

use crate::record::{Record, RecordType};

/// Lines carrying WARC metadata.
const METADATA_PREFIX: &str = "WARC";
/// Lines carrying content headers.
const CONTENT_PREFIX: &str = "Content-";

/// Join the text lines of a record's body with single spaces.
///
/// Blank lines and lines starting with `WARC` or `Content-` are dropped.
/// Returns `None` for `warcinfo` records and for bodies with no text left,
/// which callers treat as "nothing to classify".
pub fn text_body(record: &Record) -> Option<String> {
    if record.warc_type == RecordType::Warcinfo {
        return None;
    }

    let text = String::from_utf8_lossy(&record.body);
    let kept: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with(METADATA_PREFIX)
                && !line.starts_with(CONTENT_PREFIX)
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}
