//! Lazy line reading that keeps line terminators intact

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Iterator over the raw lines of an MDOC source
///
/// Every yielded line still carries its terminator (`\n` or `\r\n`), and the
/// last line carries none if the source didn't end with one, so writing the
/// lines back out reproduces the input byte for byte.
pub struct MdocLines<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> MdocLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, done: false }
    }
}

impl<R: BufRead> Iterator for MdocLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(buf)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Open a file for lazy line reading
pub fn open_lines(path: &Path) -> io::Result<MdocLines<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(MdocLines::new(BufReader::new(file)))
}

/// Split a raw line into its content and its terminator
pub fn split_line_ending(raw: &str) -> (&str, &str) {
    if let Some(content) = raw.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = raw.strip_suffix('\n') {
        (content, "\n")
    } else {
        (raw, "")
    }
}
