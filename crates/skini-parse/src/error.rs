//! Parse errors and non-fatal diagnostics.

use std::{fmt, io};

use crate::{BindError, Context, Line};

/// Kind of parse error.
#[derive(Debug)]
pub enum ParseErrorKind {
    /// The input has no content line at all.
    EmptyInput,
    /// A line matches none of the productions.
    Syntax,
    /// The destination rejected an event.
    Binding(BindError),
    /// A bare value outside a list, outside a map block or in strict mode.
    UnsupportedConstruct,
    /// Reading the input failed.
    Io(io::Error),
}

/// Error that aborts a parse run.
///
/// Events applied before the error stay applied: a destination may be
/// partially populated.
#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The offending line, when there is one.
    pub line: Option<Line>,
    /// Context at the time of the error.
    pub context: Context,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: Option<Line>, context: Context) -> Self {
        Self {
            kind,
            line,
            context,
        }
    }

    pub(crate) fn io(err: io::Error, context: &Context) -> Self {
        Self::new(ParseErrorKind::Io(err), None, context.clone())
    }

    /// Short message without location.
    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::EmptyInput => "input is empty".to_string(),
            ParseErrorKind::Syntax => "unrecognized line".to_string(),
            ParseErrorKind::Binding(err) => err.to_string(),
            ParseErrorKind::UnsupportedConstruct => "bare value outside a list".to_string(),
            ParseErrorKind::Io(err) => format!("read error: {err}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())?;
        if let Some(line) = &self.line {
            write!(f, " at line {}: `{}`", line.number, line.text)?;
        }
        if !matches!(self.kind, ParseErrorKind::EmptyInput) {
            write!(f, " ({})", self.context)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Binding(err) => Some(err),
            ParseErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// A skipped line that did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: Line,
    pub context: Context,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped bare value outside a list at line {}: `{}` ({})",
            self.line.number, self.line.text, self.context
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    #[test]
    fn test_display_carries_line_and_context() {
        let mut context = Context::default();
        context.enter_map("redirects", None);
        let err = ParseError::new(
            ParseErrorKind::Syntax,
            Some(Line::new(7, Span::new(40, 48), "[bad!]")),
            context,
        );
        assert_eq!(
            err.to_string(),
            "unrecognized line at line 7: `[bad!]` (map `redirects`)"
        );
    }

    #[test]
    fn test_empty_input_display() {
        let err = ParseError::new(ParseErrorKind::EmptyInput, None, Context::default());
        assert_eq!(err.to_string(), "input is empty");
    }
}
