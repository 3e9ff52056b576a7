//! Sampling-based script detection.
//!
//! A body is classified by the fraction of its codepoints found in a
//! [`ScriptSet`]. Short bodies are counted exhaustively; long ones are
//! estimated from a fixed number of random samples so the cost per record
//! stays bounded regardless of payload size.

pub mod script_set;

pub use script_set::ScriptSet;

use std::sync::Arc;

use rand::Rng;

use crate::config::{ClassifierConfig, Sampling};
use crate::error::SamplingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NoMatch,
}

/// Which counting regime produced a [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Exhaustive,
    Sampled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub verdict: Verdict,
    pub regime: Regime,
    /// Consulted codepoints that belong to the script set.
    pub matches: usize,
    /// Codepoints whose membership was checked; the ratio's denominator.
    pub consulted: usize,
    /// Random draws consumed (zero in the exhaustive regime).
    pub samples: usize,
    pub ratio: f64,
}

impl Classification {
    pub fn is_match(&self) -> bool {
        self.verdict == Verdict::Match
    }
}

/// Strict comparison: a ratio equal to the threshold does not match.
#[inline]
pub fn decide(ratio: f64, threshold: f64) -> Verdict {
    if ratio > threshold {
        Verdict::Match
    } else {
        Verdict::NoMatch
    }
}

/// Decides whether text is predominantly written in the target script.
#[derive(Debug, Clone)]
pub struct ScriptClassifier {
    script: Arc<ScriptSet>,
    config: ClassifierConfig,
}

impl ScriptClassifier {
    pub fn new(script: Arc<ScriptSet>, mut config: ClassifierConfig) -> Self {
        config.sample_size = config.sample_size.max(1);
        ScriptClassifier { script, config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify `text`, drawing samples from `rng` when it is longer than
    /// the sample budget.
    pub fn classify<R: Rng>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<Classification, SamplingError> {
        let len = text.chars().count();
        let n = self.config.sample_size;

        let (regime, matches, consulted, samples) = if len <= n {
            let matches = text.chars().filter(|&c| self.script.contains(c)).count();
            (Regime::Exhaustive, matches, len, 0)
        } else {
            let (matches, consulted) = match self.config.sampling {
                Sampling::Codepoint => self.sample_codepoints(text, len, rng),
                Sampling::ByteOffset => self.sample_byte_offsets(text, rng)?,
            };
            (Regime::Sampled, matches, consulted, n)
        };

        let ratio = if consulted == 0 {
            0.0
        } else {
            matches as f64 / consulted as f64
        };

        Ok(Classification {
            verdict: decide(ratio, self.config.threshold),
            regime,
            matches,
            consulted,
            samples,
            ratio,
        })
    }

    pub fn is_match<R: Rng>(&self, text: &str, rng: &mut R) -> Result<bool, SamplingError> {
        Ok(self.classify(text, rng)?.is_match())
    }

    /// Draw `n` codepoint positions with replacement and count each draw.
    fn sample_codepoints<R: Rng>(
        &self,
        text: &str,
        len: usize,
        rng: &mut R,
    ) -> (usize, usize) {
        let n = self.config.sample_size;
        let chars: Vec<char> = text.chars().collect();
        let matches = (0..n)
            .map(|_| chars[rng.random_range(0..len)])
            .filter(|&c| self.script.contains(c))
            .count();
        (matches, n)
    }

    /// Draw `n` byte offsets and count each codepoint hit by at least one.
    ///
    /// Offsets are sorted so one pass over `char_indices` resolves them all;
    /// every offset must land inside some codepoint.
    fn sample_byte_offsets<R: Rng>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<(usize, usize), SamplingError> {
        let n = self.config.sample_size;
        let mut offsets: Vec<usize> = (0..n).map(|_| rng.random_range(0..text.len())).collect();
        offsets.sort_unstable();

        let mut next = 0;
        let mut matches = 0;
        let mut consulted = 0;
        for (start, c) in text.char_indices() {
            let end = start + c.len_utf8();
            if offsets[next] >= end {
                continue;
            }
            if self.script.contains(c) {
                matches += 1;
            }
            consulted += 1;
            while next < n && offsets[next] < end {
                next += 1;
            }
            if next == n {
                break;
            }
        }

        if next != n {
            return Err(SamplingError {
                found: next,
                expected: n,
            });
        }
        Ok((matches, consulted))
    }
}
