//! Single-key lookup without running the parser.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use skini_parse::{Context, LineKind, LineSource, ParseError, ParseErrorKind, classify};
use tracing::debug;

use crate::Error;

/// Find the value of the first line that starts with `key` and reads as an
/// assignment (`=` or `+=`).
///
/// Lines are read one by one without tracking sections, maps or lists, and
/// without lookahead: a `+=` line yields only its own value and `key =`
/// yields `""`. Matching is by prefix, so `identity = no` answers a search
/// for `id`. A line starting with `key` that is not an assignment fails with
/// a syntax error. Fails with [`Error::KeyNotFound`] when no line starts
/// with `key`.
pub fn seek_key(path: impl AsRef<Path>, key: &str) -> Result<String, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(Error::io(path))?;
    match seek_key_in(BufReader::new(file), key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(Error::KeyNotFound {
            path: path.to_path_buf(),
            key: key.to_string(),
        }),
        Err(Error::Parse { path: None, error }) => Err(Error::Parse {
            path: Some(path.to_path_buf()),
            error,
        }),
        Err(err) => Err(err),
    }
}

/// Like [`seek_key`], over any reader. `None` when no line starts with `key`.
pub fn seek_key_in<R: BufRead>(reader: R, key: &str) -> Result<Option<String>, Error> {
    let mut source = LineSource::new(reader);
    while let Some(line) = source
        .next_line()
        .map_err(|err| ParseError::new(ParseErrorKind::Io(err), None, Context::default()))?
    {
        if !line.text.starts_with(key) {
            continue;
        }
        let value = match classify(&line.text, None) {
            LineKind::KeyValue { value, .. } | LineKind::ContinuationStart { value, .. } => {
                value.to_string()
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::Syntax,
                    Some(line),
                    Context::default(),
                )
                .into());
            }
        };
        debug!(key, line = line.number, "found key");
        return Ok(Some(value));
    }
    Ok(None)
}
