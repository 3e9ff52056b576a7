use std::collections::HashSet;
use std::io::BufRead;

use crate::error::Result;

/// Record identifiers whose metadata the correlator should report.
///
/// Read once before correlation starts and not modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    ids: HashSet<String>,
}

impl ReferenceSet {
    /// One identifier per line, surrounding whitespace trimmed, blank lines ignored.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut ids = HashSet::with_capacity(100);
        for line in reader.lines() {
            let line = line?;
            let id = line.trim();
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
        Ok(ReferenceSet { ids })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ReferenceSet {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
