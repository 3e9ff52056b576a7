//! Runtime configuration for the reader, classifier and dispatcher.

use std::env;
use std::path::{Path, PathBuf};

/// Line that opens every record.
pub const RECORD_MARKER: &str = "WARC/1.0";

/// Header lines allowed after the marker before the stream is considered corrupt.
pub const MAX_HEADER_LINES: usize = 100;

/// Slots in the outcome channel between the pool and the collector.
pub const RESULT_BUFFER: usize = 100;

/// Records allowed to be queued or running in the pool at once.
pub const MAX_IN_FLIGHT: usize = 256;

/// Environment variable naming the root of the tool's data directory.
pub const TOOLS_DIR_ENV: &str = "WARC_TOOLS_DIR";

/// Seed file location relative to `$WARC_TOOLS_DIR`.
pub const CHARSET_SUBPATH: &str = "detect-chinese/ordered_characters";

/// Seed file location used when nothing else is configured.
pub const CHARSET_FALLBACK: &str = "ordered_characters";

/// Framing parameters for [`crate::record::RecordReader`].
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Exact line that starts a record.
    pub marker: String,
    /// Ceiling on header lines following the marker.
    pub max_header_lines: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            marker: RECORD_MARKER.to_string(),
            max_header_lines: MAX_HEADER_LINES,
        }
    }
}

/// How the sampled regime picks codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Uniform indices over codepoint positions, with replacement.
    Codepoint,
    /// Uniform byte offsets mapped onto the enclosing codepoint, each
    /// codepoint counted once.
    ByteOffset,
}

/// Parameters of [`crate::classify::ScriptClassifier`].
///
/// The two known deployments disagree on threshold and sample size, so both
/// are kept as presets rather than folded into one default.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// A record matches when its target ratio is strictly above this.
    pub threshold: f64,
    /// Sample budget `n`; bodies with at most `n` codepoints are counted exhaustively.
    pub sample_size: usize,
    pub sampling: Sampling,
}

impl ClassifierConfig {
    /// Preset used when printing matching record ids.
    pub fn record_ids() -> Self {
        Self {
            threshold: 0.35,
            sample_size: 500,
            sampling: Sampling::ByteOffset,
        }
    }

    /// Preset used when printing matching body text.
    pub fn bodies() -> Self {
        Self {
            threshold: 0.30,
            sample_size: 200,
            sampling: Sampling::Codepoint,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::record_ids()
    }
}

/// What the detect pass prints for a matching record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// The `WARC-Record-ID`, one per line.
    Id,
    /// A blank line followed by the reconstructed body text.
    Body,
}

/// Configuration of the detect pipeline.
#[derive(Debug, Clone)]
pub struct DetectConfig {
    pub reader: ReaderConfig,
    pub classifier: ClassifierConfig,
    pub emit: Emit,
    /// Pool threads running classification.
    pub workers: usize,
    /// Records queued or running at once; the reader blocks beyond this.
    pub max_in_flight: usize,
    /// Capacity of the outcome channel.
    pub result_buffer: usize,
    /// Makes sampling reproducible when set.
    pub seed: Option<u64>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            reader: ReaderConfig::default(),
            classifier: ClassifierConfig::default(),
            emit: Emit::Id,
            workers: default_workers(),
            max_in_flight: MAX_IN_FLIGHT,
            result_buffer: RESULT_BUFFER,
            seed: None,
        }
    }
}

/// Number of pool threads when none is requested.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Locate the target-script seed file.
///
/// An explicit path wins, then `$WARC_TOOLS_DIR/detect-chinese/ordered_characters`,
/// then `ordered_characters` in the working directory.
pub fn charset_path(explicit: Option<&Path>) -> PathBuf {
    charset_path_from(explicit, env::var_os(TOOLS_DIR_ENV).map(PathBuf::from))
}

fn charset_path_from(explicit: Option<&Path>, tools_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match tools_dir {
        Some(root) if !root.as_os_str().is_empty() => root.join(CHARSET_SUBPATH),
        _ => PathBuf::from(CHARSET_FALLBACK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_stay_distinct() {
        let ids = ClassifierConfig::record_ids();
        let bodies = ClassifierConfig::bodies();
        assert_eq!(ids.threshold, 0.35);
        assert_eq!(ids.sample_size, 500);
        assert_eq!(ids.sampling, Sampling::ByteOffset);
        assert_eq!(bodies.threshold, 0.30);
        assert_eq!(bodies.sample_size, 200);
        assert_eq!(bodies.sampling, Sampling::Codepoint);
    }

    #[test]
    fn test_charset_path_explicit_wins() {
        let path = charset_path_from(
            Some(Path::new("/tmp/chars")),
            Some(PathBuf::from("/opt/tools")),
        );
        assert_eq!(path, PathBuf::from("/tmp/chars"));
    }

    #[test]
    fn test_charset_path_from_tools_dir() {
        let path = charset_path_from(None, Some(PathBuf::from("/opt/tools")));
        assert_eq!(
            path,
            PathBuf::from("/opt/tools/detect-chinese/ordered_characters")
        );
    }

    #[test]
    fn test_charset_path_fallback() {
        assert_eq!(
            charset_path_from(None, None),
            PathBuf::from("ordered_characters")
        );
        assert_eq!(
            charset_path_from(None, Some(PathBuf::new())),
            PathBuf::from("ordered_characters")
        );
    }

    #[test]
    fn test_detect_defaults() {
        let config = DetectConfig::default();
        assert_eq!(config.reader.marker, "WARC/1.0");
        assert_eq!(config.result_buffer, 100);
        assert!(config.workers > 0);
        assert!(config.seed.is_none());
    }
}
