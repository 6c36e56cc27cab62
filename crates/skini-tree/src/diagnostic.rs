//! Diagnostic rendering for parser errors.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use skini_parse::{BindErrorReason, Diagnostic, ParseErrorKind, Span};

/// A parser error with source location.
#[derive(Debug)]
pub struct ParseError {
    /// The underlying parser error.
    pub error: skini_parse::ParseError,
}

impl ParseError {
    /// The kind of error.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.error.kind
    }

    /// Source location of the offending line, when there is one.
    pub fn span(&self) -> Option<Span> {
        self.error.line.as_ref().map(|line| line.span)
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        match self.write_report(filename, source, &mut output) {
            Ok(()) => String::from_utf8_lossy(&output).into_owned(),
            Err(_) => self.to_string(),
        }
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(
        &self,
        filename: &str,
        source: &str,
        writer: W,
    ) -> std::io::Result<()> {
        self.build_report(filename)
            .finish()
            .write((filename, Source::from(source)), writer)
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, Range<usize>)> {
        let range = self.span().map_or(0..0, range);
        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_config(byte_offsets())
            .with_message(self.error.message());

        match &self.error.kind {
            ParseErrorKind::EmptyInput => {
                report.with_help("the input holds only blank and comment lines")
            }

            ParseErrorKind::Syntax => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("not a section, map header or assignment")
                        .with_color(Color::Red),
                )
                .with_help(
                    "headers look like `[server.http]`, `[map.name]` or `[map.name | subkey]`",
                ),

            ParseErrorKind::Binding(err) => {
                let report = report.with_label(
                    Label::new((filename, range))
                        .with_message(format!("assigned to `{}` here", err.location()))
                        .with_color(Color::Red),
                );
                match err.reason {
                    BindErrorReason::NoSuchLocation => report
                        .with_help(format!("the destination needs a {} for this key", err.expected)),
                    BindErrorReason::ShapeMismatch { found } => report.with_help(format!(
                        "the destination holds a {found} here; change the field or the input"
                    )),
                }
            }

            ParseErrorKind::UnsupportedConstruct => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("not inside a list")
                        .with_color(Color::Red),
                )
                .with_help("start a list with `key =` above it, or continue a value with `key +=`"),

            ParseErrorKind::Io(_) => report,
        }
    }
}

impl From<skini_parse::ParseError> for ParseError {
    fn from(error: skini_parse::ParseError) -> Self {
        Self { error }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Render a skipped line as an ariadne warning.
pub fn render_diagnostic(diagnostic: &Diagnostic, filename: &str, source: &str) -> String {
    let range = range(diagnostic.line.span);
    let report = Report::build(ReportKind::Warning, (filename, range.clone()))
        .with_config(byte_offsets())
        .with_message("skipped bare value outside a list")
        .with_label(
            Label::new((filename, range))
                .with_message(format!("ignored in {}", diagnostic.context))
                .with_color(Color::Yellow),
        )
        .finish();

    let mut output = Vec::new();
    match report.write((filename, Source::from(source)), &mut output) {
        Ok(()) => String::from_utf8_lossy(&output).into_owned(),
        Err(_) => diagnostic.to_string(),
    }
}

fn range(span: Span) -> Range<usize> {
    span.start as usize..span.end as usize
}

fn byte_offsets() -> Config {
    Config::default().with_index_type(IndexType::Byte)
}
