//! Parser options.

/// Options for a parse run.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Treat a bare value in a map block as an error instead of skipping it
    /// with a diagnostic (default: false). Outside maps it is always an error.
    pub strict: bool,

    /// First characters that mark a comment line (default: `#` and `;`)
    pub comment_prefixes: &'static [char],
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            comment_prefixes: &['#', ';'],
        }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on bare values in map blocks too.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the comment prefixes.
    pub fn comment_prefixes(mut self, prefixes: &'static [char]) -> Self {
        self.comment_prefixes = prefixes;
        self
    }
}
