use std::borrow::Cow;
use std::io::BufRead;

use crate::errors::Result;
use crate::utils;

/// A non-blank input line with its 1-based line number.
#[derive(Debug)]
pub struct RawLine {
    pub number: usize,
    pub text: String,

    /// Whether a line break followed the text.
    pub terminated: bool,

    /// Whether bytes that are not UTF-8 were replaced with U+FFFD.
    pub lossy: bool,
}

#[cfg(test)]
impl RawLine {
    pub fn new(number: usize, text: &str) -> Self {
        Self {
            number,
            text: text.to_string(),
            terminated: true,
            lossy: false,
        }
    }
}

/// Reads lines while skipping blank ones.
pub struct LineReader<R> {
    rdr: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R> LineReader<R>
where
    R: BufRead,
{
    pub fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: vec![],
            line_no: 0,
        }
    }

    /// Returns the next non-blank line, or `None` at the end of input.
    ///
    /// The line break, `\n` or `\r\n`, is removed from the text.
    pub fn next_non_blank(&mut self) -> Result<Option<RawLine>> {
        loop {
            self.buf.clear();
            if self.rdr.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let mut terminated = false;
            if self.buf.last() == Some(&b'\n') {
                self.buf.pop();
                terminated = true;
            }
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
                terminated = true;
            }
            let (text, lossy) = match String::from_utf8_lossy(&self.buf) {
                Cow::Borrowed(text) => (text.to_string(), false),
                Cow::Owned(text) => (text, true),
            };
            if !utils::is_blank_line(&text) {
                return Ok(Some(RawLine {
                    number: self.line_no,
                    text,
                    terminated,
                    lossy,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_blank_lines() {
        let data = "\n  \n1\r\n\t\n2;3\n\n";
        let mut lines = LineReader::new(data.as_bytes());
        let first = lines.next_non_blank().unwrap().unwrap();
        assert_eq!(3, first.number);
        assert_eq!("1", first.text);
        assert!(first.terminated);
        let second = lines.next_non_blank().unwrap().unwrap();
        assert_eq!(5, second.number);
        assert_eq!("2;3", second.text);
        assert!(lines.next_non_blank().unwrap().is_none());
        assert!(lines.next_non_blank().unwrap().is_none());
    }

    #[test]
    fn test_last_line_without_break() {
        let mut lines = LineReader::new("1\n2;".as_bytes());
        assert!(lines.next_non_blank().unwrap().unwrap().terminated);
        let last = lines.next_non_blank().unwrap().unwrap();
        assert_eq!("2;", last.text);
        assert!(!last.terminated);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let data: &[u8] = b"0;\xff;2\n3\n";
        let mut lines = LineReader::new(data);
        let first = lines.next_non_blank().unwrap().unwrap();
        assert_eq!("0;\u{fffd};2", first.text);
        assert!(first.lossy);
        let second = lines.next_non_blank().unwrap().unwrap();
        assert_eq!("3", second.text);
        assert!(!second.lossy);
    }
}
