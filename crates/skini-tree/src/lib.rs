#![doc = include_str!("../README.md")]

use std::io::BufRead;

mod builder;
mod diagnostic;
mod value;

pub use builder::TreeBuilder;
pub use diagnostic::{ParseError, render_diagnostic};
pub use skini_parse::{Diagnostic, ParseErrorKind, ParseOptions, Span};
pub use value::{Entry, Table, Value};

/// A parsed skini document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level keys, sections and maps.
    pub root: Table,
}

impl Document {
    /// Parse a skini document with default options.
    ///
    /// Skipped lines are dropped; use [`Document::from_reader`] to see them.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::from_reader(source.as_bytes(), &ParseOptions::default()).map(|(doc, _)| doc)
    }

    /// Parse a skini document from a reader, returning the skipped lines too.
    pub fn from_reader<R: BufRead>(
        reader: R,
        options: &ParseOptions,
    ) -> Result<(Self, Vec<Diagnostic>), ParseError> {
        let mut builder = TreeBuilder::new();
        let diagnostics = skini_parse::parse_into(&mut builder, reader, options)?;
        Ok((
            Document {
                root: builder.finish(),
            },
            diagnostics,
        ))
    }

    /// Get a value by path, e.g. `ServerHttp.Port` or `Redirects[^abc/def$]`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        self.root.get_path(path)
    }

    /// Get a list item by path, e.g. `ServerHttp.Keys[0]`.
    pub fn get_item(&self, path: &str) -> Option<&str> {
        let (list, index) = path.strip_suffix(']')?.rsplit_once('[')?;
        let index: usize = index.parse().ok()?;
        self.get(list)?.as_list()?.get(index).map(String::as_str)
    }
}

/// Split off the first path segment.
fn split_path(path: &str) -> (&str, &str) {
    if path.starts_with('[')
        && let Some(end) = path.find(']')
    {
        let segment = &path[..=end];
        let rest = &path[end + 1..];
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        return (segment, rest);
    }

    let dot_pos = path.find('.');
    let bracket_pos = path.find('[');

    match (dot_pos, bracket_pos) {
        (Some(d), Some(b)) if b < d => (&path[..b], &path[b..]),
        (Some(d), _) => (&path[..d], &path[d + 1..]),
        (None, Some(b)) => (&path[..b], &path[b..]),
        (None, None) => (path, ""),
    }
}

#[cfg(test)]
mod tests;
