//! Line source: trimmed, non-blank, non-comment lines with one line of lookahead.

use std::io::{self, BufRead};

use tracing::trace;

use crate::Span;

/// A content line after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based physical line number.
    pub number: usize,
    /// Byte range of the trimmed text in the stream.
    pub span: Span,
    /// Trimmed text.
    pub text: String,
}

impl Line {
    /// Create a line by hand (mostly useful in tests).
    pub fn new(number: usize, span: Span, text: impl Into<String>) -> Self {
        Self {
            number,
            span,
            text: text.into(),
        }
    }
}

/// Reads content lines from a byte stream.
///
/// Blank lines and lines starting with a comment prefix are skipped. The
/// source never closes the underlying reader.
pub struct LineSource<R> {
    reader: R,
    buf: String,
    /// Byte offset of the next physical line. Spans clamp it to `u32`.
    pos: u64,
    /// Physical lines consumed so far.
    number: usize,
    comment_prefixes: &'static [char],
    /// Single lookahead slot filled by [`LineSource::peek`].
    pending: Option<Line>,
}

impl<R: BufRead> LineSource<R> {
    /// Create a line source skipping `#` and `;` comments.
    pub fn new(reader: R) -> Self {
        Self::with_comment_prefixes(reader, &['#', ';'])
    }

    /// Create a line source with custom comment prefixes.
    pub fn with_comment_prefixes(reader: R, comment_prefixes: &'static [char]) -> Self {
        Self {
            reader,
            buf: String::new(),
            pos: 0,
            number: 0,
            comment_prefixes,
            pending: None,
        }
    }

    /// Take the next content line, `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<Line>> {
        match self.pending.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_line(),
        }
    }

    /// Look at the next content line without consuming it.
    pub fn peek(&mut self) -> io::Result<Option<&Line>> {
        if self.pending.is_none() {
            self.pending = self.read_line()?;
        }
        Ok(self.pending.as_ref())
    }

    fn is_comment(&self, text: &str) -> bool {
        text.starts_with(self.comment_prefixes)
    }

    fn read_line(&mut self) -> io::Result<Option<Line>> {
        loop {
            self.buf.clear();
            let read = self.reader.read_line(&mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }

            self.number += 1;
            let start = self.pos;
            self.pos = self.pos.saturating_add(read as u64);

            let raw = self.buf.trim_end_matches(['\n', '\r']);
            let text = raw.trim();
            if text.is_empty() || self.is_comment(text) {
                continue;
            }

            let leading = (raw.len() - raw.trim_start().len()) as u64;
            let text_start = start.saturating_add(leading);
            let span = Span::new(
                clamp_offset(text_start),
                clamp_offset(text_start.saturating_add(text.len() as u64)),
            );
            trace!(number = self.number, ?span, text, "line");
            return Ok(Some(Line::new(self.number, span, text)));
        }
    }
}

fn clamp_offset(offset: u64) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn lines(input: &str) -> Vec<Line> {
        let mut source = LineSource::new(Cursor::new(input));
        let mut out = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            out.push(line);
        }
        out
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let texts: Vec<_> = lines("\n# comment\n  ; other\n\tid = 1  \n\n  next\n")
            .into_iter()
            .map(|l| l.text)
            .collect();
        assert_eq!(texts, vec!["id = 1", "next"]);
    }

    #[test]
    fn test_line_numbers_and_spans() {
        let input = "a = 1\n\n   b = 2\r\nc";
        let lines = lines(input);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 3);
        assert_eq!(lines[2].number, 4);
        for line in &lines {
            assert_eq!(line.span.slice(input), Some(line.text.as_str()));
            assert_eq!(line.span.len() as usize, line.text.len());
        }
    }

    #[test]
    fn test_last_line_without_newline() {
        let lines = lines("id = /home/alex");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "id = /home/alex");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut source = LineSource::new(Cursor::new("one\ntwo\n"));
        assert_eq!(source.peek().unwrap().map(|l| l.text.as_str()), Some("one"));
        assert_eq!(source.peek().unwrap().map(|l| l.text.as_str()), Some("one"));
        assert_eq!(source.next_line().unwrap().unwrap().text, "one");
        assert_eq!(source.next_line().unwrap().unwrap().text, "two");
        assert!(source.peek().unwrap().is_none());
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn test_offsets_past_u32_range_saturate() {
        let mut source = LineSource::new(Cursor::new("abcdef
next
"));
        source.pos = u64::from(u32::MAX) - 3;

        let line = source.next_line().unwrap().unwrap();
        assert_eq!(line.text, "abcdef");
        assert_eq!(line.span, Span::new(u32::MAX - 3, u32::MAX));

        let line = source.next_line().unwrap().unwrap();
        assert_eq!(line.text, "next");
        assert_eq!(line.span, Span::new(u32::MAX, u32::MAX));
        assert!(line.span.is_empty());
    }

    #[test]
    fn test_custom_comment_prefixes() {
        let mut source = LineSource::with_comment_prefixes(Cursor::new("// c\n# kept\n"), &['/']);
        assert_eq!(source.next_line().unwrap().unwrap().text, "# kept");
        assert!(source.next_line().unwrap().is_none());
    }
}
