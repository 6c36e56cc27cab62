#![doc = include_str!("../README.md")]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

mod dir;
mod error;
mod schema;
mod seek;

pub use dir::{parse_dir, wildcard_regex};
pub use error::Error;
pub use schema::{Configure, Schema, SchemaBinder, Slot};
pub use seek::{seek_key, seek_key_in};
pub use skini_parse::{
    BindError, Binder, Diagnostic, Event, ParseErrorKind, ParseOptions, Parser, parse_into,
    to_field_name,
};
pub use skini_tree::{Document, ParseError, Value, render_diagnostic};

/// Parse `reader` into `target` with default options.
///
/// On error, assignments made before the failing line stay in `target`.
pub fn parse<T: Configure, R: BufRead>(target: &mut T, reader: R) -> Result<(), Error> {
    parse_with_options(target, reader, &ParseOptions::default()).map(|_| ())
}

/// Parse `reader` into `target`, returning the lines that were skipped.
pub fn parse_with_options<T: Configure, R: BufRead>(
    target: &mut T,
    reader: R,
    options: &ParseOptions,
) -> Result<Vec<Diagnostic>, Error> {
    let schema = T::schema();
    let mut binder = schema.bind(target);
    Ok(parse_into(&mut binder, reader, options)?)
}

/// Parse a string into `target`.
pub fn parse_str<T: Configure>(target: &mut T, source: &str) -> Result<(), Error> {
    parse(target, source.as_bytes())
}

/// Open and parse a file into `target`.
pub fn parse_file<T: Configure>(target: &mut T, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    debug!(path = %path.display(), "parsing file");
    let file = File::open(path).map_err(Error::io(path))?;
    parse(target, BufReader::new(file)).map_err(|err| match err {
        Error::Parse { path: None, error } => Error::Parse {
            path: Some(path.to_path_buf()),
            error,
        },
        other => other,
    })
}
