use std::io::{self, Write};

use crate::correlate::Hit;

/// Writes hits grouped by container file.
///
/// Each new filename is printed on its own line, preceded by a blank line
/// unless it is the first group, followed by one `offset length` line per
/// hit. A filename that reappears after another group starts a new group.
pub struct HitWriter<W> {
    out: W,
    current: Option<String>,
    groups: usize,
    hits: usize,
}

impl<W: Write> HitWriter<W> {
    pub fn new(out: W) -> Self {
        HitWriter {
            out,
            current: None,
            groups: 0,
            hits: 0,
        }
    }

    pub fn write_hit(&mut self, hit: &Hit) -> io::Result<()> {
        if self.current.as_deref() != Some(hit.filename.as_str()) {
            if self.current.is_some() {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{}", hit.filename)?;
            self.current = Some(hit.filename.clone());
            self.groups += 1;
        }
        writeln!(self.out, "{} {}", hit.offset, hit.length)?;
        self.hits += 1;
        Ok(())
    }

    /// Filename groups started so far.
    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
