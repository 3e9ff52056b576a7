//! Gathers per-record outcomes without knowing the record count up front.
//!
//! Outcomes and the final total travel on the same channel but come from
//! different threads, so the total may arrive before, between or after the
//! outcomes it counts. [`Collector`] tracks both and is complete exactly when
//! the announced total equals the number of outcomes received.

use std::io::Write;
use std::sync::mpsc::Receiver;

use crate::config::Emit;
use crate::error::{Error, Result, SamplingError};

/// Result of classifying one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing to classify (`warcinfo` or no text).
    Skipped,
    NoMatch,
    /// Record id or body text, depending on [`Emit`].
    Match(String),
    Failed(SamplingError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Outcome(Outcome),
    /// Number of records dispatched, sent once after the input is exhausted.
    Total(usize),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetectSummary {
    pub records: usize,
    pub matches: usize,
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct Collector {
    received: usize,
    expected: Option<usize>,
    matches: usize,
    skipped: usize,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &Outcome) {
        self.received += 1;
        match outcome {
            Outcome::Match(_) => self.matches += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::NoMatch | Outcome::Failed(_) => {}
        }
    }

    pub fn set_expected(&mut self, total: usize) {
        self.expected = Some(total);
    }

    pub fn is_complete(&self) -> bool {
        self.expected == Some(self.received)
    }

    pub fn received(&self) -> usize {
        self.received
    }

    pub fn expected(&self) -> Option<usize> {
        self.expected
    }

    pub fn summary(&self) -> DetectSummary {
        DetectSummary {
            records: self.received,
            matches: self.matches,
            skipped: self.skipped,
        }
    }
}

/// Write a match the way `emit` asks for.
pub fn write_match<W: Write>(out: &mut W, emit: Emit, payload: &str) -> std::io::Result<()> {
    match emit {
        Emit::Id => writeln!(out, "{payload}"),
        Emit::Body => {
            writeln!(out)?;
            writeln!(out, "{payload}")
        }
    }
}

/// Drain `rx` until every announced outcome has arrived, writing matches in
/// arrival order.
///
/// Returns as soon as the collector is complete, leaving anything else in the
/// channel untouched. A failed outcome or a channel that disconnects early
/// ends collection with an error.
pub fn collect<W: Write>(
    rx: &Receiver<Message>,
    mut out: W,
    emit: Emit,
) -> Result<(W, DetectSummary)> {
    let mut collector = Collector::new();
    while !collector.is_complete() {
        let message = rx.recv().map_err(|_| Error::CollectorDisconnected {
            received: collector.received(),
            expected: collector.expected(),
        })?;
        match message {
            Message::Total(total) => collector.set_expected(total),
            Message::Outcome(outcome) => {
                collector.record(&outcome);
                match outcome {
                    Outcome::Match(payload) => write_match(&mut out, emit, &payload)?,
                    Outcome::Failed(err) => return Err(err.into()),
                    Outcome::Skipped | Outcome::NoMatch => {}
                }
            }
        }
    }
    out.flush()?;
    Ok((out, collector.summary()))
}
