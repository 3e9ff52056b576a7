//! warcscan library - shared modules for the `warcscan` and `warcscan-meta` binaries.
//!
//! # Modules
//!
//! - [`record`] - WARC record framing and body text reconstruction
//! - [`classify`] - Sampling-based target-script classifier
//! - [`dispatch`] - Concurrent detect pipeline (worker pool + collector)
//! - [`correlate`] - Cross-referencing record ids against WAT metadata
//!
//! # Example
//!
//! ```no_run
//! use std::io::Cursor;
//! use std::sync::Arc;
//! use warcscan::{run_detect, DetectConfig, ScriptSet};
//!
//! let script = Arc::new("中文的是".chars().collect::<ScriptSet>());
//! let input = Cursor::new(std::fs::read("capture.warc").unwrap());
//! let (_out, summary) = run_detect(input, script, &DetectConfig::default(), Vec::new())
//!     .expect("detect failed");
//! println!("{} of {} records matched", summary.matches, summary.records);
//! ```

pub mod classify;
pub mod config;
pub mod correlate;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod logging;
pub mod record;

// Re-export for convenience
pub use classify::{Classification, ScriptClassifier, ScriptSet, Verdict};
pub use config::{ClassifierConfig, DetectConfig, Emit, ReaderConfig, Sampling};
pub use correlate::{Correlator, CorrelationStats, Hit, HitWriter, ReferenceSet};
pub use dispatch::{run_detect, DetectSummary};
pub use error::{Error, FramingError, Result, SamplingError};
pub use record::{Record, RecordReader, RecordType};
