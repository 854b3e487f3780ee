//! Line reading with lossy UTF-8 decoding.

use std::io::{self, BufRead};

/// Iterator over the lines of a reader.
///
/// Invalid UTF-8 is replaced with U+FFFD instead of failing the read. Line
/// terminators are kept; callers trim.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }
}

/// First line that is not blank after trimming.
pub fn first_non_blank<R: BufRead>(reader: R) -> io::Result<Option<String>> {
    for line in LossyLines::new(reader) {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
    Ok(None)
}
