//! Joining of `key += value` continuation lines.

use std::io::{self, BufRead};

use tracing::trace;

use crate::classify::ends_continuation;
use crate::{LineSource, Span};

/// A value assembled from a `+=` line and the lines absorbed after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Joined {
    pub value: String,
    /// Span from the `+=` line to the last absorbed line.
    pub span: Span,
    pub absorbed: usize,
}

/// Absorb lines following a `+=` line until one loosely looks like a
/// key/value or a header, or input ends.
///
/// The line that stops the join stays in the source's lookahead slot.
pub(crate) fn assemble<R: BufRead>(
    source: &mut LineSource<R>,
    first: &str,
    span: Span,
) -> io::Result<Joined> {
    let mut joined = Joined {
        value: first.to_string(),
        span,
        absorbed: 0,
    };

    loop {
        match source.peek()? {
            Some(next) if !ends_continuation(&next.text) => {}
            _ => break,
        }
        let Some(line) = source.next_line()? else {
            break;
        };

        if !joined.value.is_empty() {
            joined.value.push(' ');
        }
        joined.value.push_str(&line.text);
        joined.span = joined.span.extend(line.span);
        joined.absorbed += 1;
    }

    trace!(absorbed = joined.absorbed, value = %joined.value, "continuation");
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn join(first: &str, rest: &str) -> (Joined, Option<String>) {
        let mut source = LineSource::new(Cursor::new(rest));
        let joined = assemble(&mut source, first, Span::default()).unwrap();
        let next = source.next_line().unwrap().map(|l| l.text);
        (joined, next)
    }

    #[test]
    fn test_joins_until_map_header() {
        let (joined, next) = join(
            "Hello, this is short SMH blurb",
            "   Append ABC Second line.\n   Append ABC Third line.\n\n\n[map.Press | XYZ]\n",
        );
        assert_eq!(
            joined.value,
            "Hello, this is short SMH blurb Append ABC Second line. Append ABC Third line."
        );
        assert_eq!(joined.absorbed, 2);
        assert_eq!(next.as_deref(), Some("[map.Press | XYZ]"));
    }

    #[test]
    fn test_stops_immediately_before_key_value() {
        let (joined, next) = join("Only one line. EOL.", "c = ######\n");
        assert_eq!(joined.value, "Only one line. EOL.");
        assert_eq!(joined.absorbed, 0);
        assert_eq!(next.as_deref(), Some("c = ######"));
    }

    #[test]
    fn test_joins_until_end_of_input() {
        let (joined, next) = join("lko", "MUST_APPPEND");
        assert_eq!(joined.value, "lko MUST_APPPEND");
        assert!(next.is_none());
    }

    #[test]
    fn test_empty_first_value_has_no_leading_space() {
        let (joined, _) = join("", "first\nsecond\n");
        assert_eq!(joined.value, "first second");
    }

    #[test]
    fn test_stops_before_malformed_header() {
        let (joined, next) = join("a", "b\n[not a header!]\n");
        assert_eq!(joined.value, "a b");
        assert_eq!(next.as_deref(), Some("[not a header!]"));
    }

    #[test]
    fn test_span_covers_absorbed_lines() {
        let input = "x\ny\n";
        let mut source = LineSource::new(Cursor::new(input));
        let joined = assemble(&mut source, "w", Span::new(0, 0)).unwrap();
        assert_eq!(joined.span, Span::new(0, 3));
    }
}
