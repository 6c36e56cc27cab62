//! Pull-based event parser for skini.

use std::io::BufRead;

use tracing::{debug, trace, warn};

use crate::classify::{LineKind, classify};
use crate::continuation;
use crate::{
    Binder, Context, Diagnostic, Event, Line, LineSource, ParseError, ParseErrorKind,
    ParseOptions, to_field_name,
};

/// Pull-based event parser.
///
/// Each call to [`Parser::next_event`] consumes lines until one logical
/// assignment is complete. Headers and list starts only update the
/// [`Context`]; they produce no event of their own.
pub struct Parser<R> {
    source: LineSource<R>,
    context: Context,
    options: ParseOptions,
    diagnostics: Vec<Diagnostic>,
    /// Line that produced the most recent event.
    last_line: Option<Line>,
    started: bool,
}

impl<R: BufRead> Parser<R> {
    /// Create a new parser with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    /// Create a new parser with the given options.
    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            source: LineSource::with_comment_prefixes(reader, options.comment_prefixes),
            context: Context::default(),
            options,
            diagnostics: Vec::new(),
            last_line: None,
            started: false,
        }
    }

    /// Current parse context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Lines skipped so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Line that produced the most recent event.
    pub fn last_line(&self) -> Option<&Line> {
        self.last_line.as_ref()
    }

    /// Get the next event, `None` once the input is exhausted.
    pub fn next_event(&mut self) -> Result<Option<Event>, ParseError> {
        if !self.started {
            self.started = true;
            let empty = self
                .source
                .peek()
                .map_err(|err| ParseError::io(err, &self.context))?
                .is_none();
            if empty {
                return Err(ParseError::new(
                    ParseErrorKind::EmptyInput,
                    None,
                    Context::default(),
                ));
            }
            debug!(strict = self.options.strict, "parse started");
        }

        loop {
            let Some(line) = self
                .source
                .next_line()
                .map_err(|err| ParseError::io(err, &self.context))?
            else {
                debug!(skipped = self.diagnostics.len(), "parse finished");
                return Ok(None);
            };

            if let Some(event) = self.step(&line)? {
                trace!(%event, "event");
                return Ok(Some(event));
            }
        }
    }

    /// Parse all remaining events into a vector.
    pub fn parse_to_vec(mut self) -> Result<Vec<Event>, ParseError> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event()? {
            events.push(event);
        }
        Ok(events)
    }

    /// Classify one line and update the context.
    fn step(&mut self, line: &Line) -> Result<Option<Event>, ParseError> {
        let next = self
            .source
            .peek()
            .map_err(|err| ParseError::io(err, &self.context))?;
        let mut kind = classify(&line.text, next.map(|l| l.text.as_str()));
        trace!(number = line.number, kind = kind.name(), "classified");

        // Map blocks never hold lists; an empty value is legal there.
        if let LineKind::ListStart { key } = kind
            && self.context.map.is_some()
        {
            kind = LineKind::KeyValue { key, value: "" };
        }

        match kind {
            LineKind::Section { name } => {
                self.context.enter_section(name);
                debug!(section = name, "entered section");
                Ok(None)
            }
            LineKind::MapHeader { name, subkey } => {
                self.context.enter_map(name, subkey);
                debug!(map = name, ?subkey, "entered map");
                Ok(None)
            }
            LineKind::ListStart { key } => {
                self.context.start_list(key);
                debug!(list = key, "started list");
                Ok(None)
            }
            LineKind::KeyValue { key, value } => {
                Ok(Some(self.assignment(line.clone(), key, value.to_string())))
            }
            LineKind::ContinuationStart { key, value } => {
                let joined = continuation::assemble(&mut self.source, value, line.span)
                    .map_err(|err| ParseError::io(err, &self.context))?;
                let whole = Line {
                    span: joined.span,
                    ..line.clone()
                };
                Ok(Some(self.assignment(whole, key, joined.value)))
            }
            LineKind::Value { text } => self.bare_value(line, text),
            LineKind::Unrecognized => Err(ParseError::new(
                ParseErrorKind::Syntax,
                Some(line.clone()),
                self.context.clone(),
            )),
        }
    }

    /// `key = value` ends any list and lands in the map or the section.
    fn assignment(&mut self, line: Line, key: &str, value: String) -> Event {
        self.context.end_list();
        let number = line.number;
        self.last_line = Some(line);

        match &self.context.map {
            Some(map) => Event::SetMapEntry {
                line: number,
                map: to_field_name(map),
                submap: self.context.submap.clone(),
                key: key.to_string(),
                value,
            },
            None => Event::SetScalar {
                line: number,
                path: self.section_path(),
                key: to_field_name(key),
                value,
            },
        }
    }

    fn bare_value(&mut self, line: &Line, text: &str) -> Result<Option<Event>, ParseError> {
        if let Some(list) = &self.context.list {
            let event = Event::AppendListItem {
                line: line.number,
                path: self.section_path(),
                key: to_field_name(list),
                value: text.to_string(),
            };
            self.last_line = Some(line.clone());
            return Ok(Some(event));
        }

        // Only map blocks tolerate stray values.
        if self.options.strict || self.context.map.is_none() {
            return Err(ParseError::new(
                ParseErrorKind::UnsupportedConstruct,
                Some(line.clone()),
                self.context.clone(),
            ));
        }

        let diagnostic = Diagnostic {
            line: line.clone(),
            context: self.context.clone(),
        };
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
        Ok(None)
    }

    fn section_path(&self) -> String {
        to_field_name(self.context.section.as_deref().unwrap_or_default())
    }
}

/// Parse `reader` to completion, applying every event to `binder`.
///
/// Returns the lines skipped along the way. On error, events applied before
/// the failing line stay applied.
pub fn parse_into<B, R>(
    binder: &mut B,
    reader: R,
    options: &ParseOptions,
) -> Result<Vec<Diagnostic>, ParseError>
where
    B: Binder + ?Sized,
    R: BufRead,
{
    let mut parser = Parser::with_options(reader, options.clone());
    while let Some(event) = parser.next_event()? {
        if let Err(err) = event.apply(binder) {
            return Err(ParseError::new(
                ParseErrorKind::Binding(err),
                parser.last_line.clone(),
                parser.context.clone(),
            ));
        }
    }
    Ok(parser.into_diagnostics())
}
