use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Codepoints that indicate the target script.
///
/// Built once from a seed file and never modified afterwards, so it can be
/// shared between pool threads behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct ScriptSet {
    chars: HashSet<char>,
}

impl ScriptSet {
    /// Read a seed list: the first character of each trimmed, non-empty line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut chars = HashSet::new();
        for line in reader.lines() {
            if let Some(c) = line?.trim().chars().next() {
                chars.insert(c);
            }
        }
        Ok(ScriptSet { chars })
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl FromIterator<char> for ScriptSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        ScriptSet {
            chars: iter.into_iter().collect(),
        }
    }
}
