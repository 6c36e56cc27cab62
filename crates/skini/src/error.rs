//! Error type for the skini facade.

use std::fmt;
use std::io;
use std::path::PathBuf;

use skini_tree::ParseError;

/// Error type for skini operations.
#[derive(Debug)]
pub enum Error {
    /// Parsing failed; `path` is set when the input was a file.
    Parse {
        path: Option<PathBuf>,
        error: ParseError,
    },
    /// A file or directory could not be read.
    Io { path: PathBuf, source: io::Error },
    /// [`seek_key`](crate::seek_key) found no `key = value` line for `key`.
    KeyNotFound { path: PathBuf, key: String },
    /// [`parse_dir`](crate::parse_dir) found no file whose id matched.
    NoMatchingFile { dir: PathBuf, pattern: String },
    /// A schema registered two slots at one location.
    DuplicateSlot { section: String, key: String },
    /// The file name pattern does not compile.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }

    /// The parse error, if parsing failed.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { path: Some(path), error } => {
                write!(f, "{}: {error}", path.display())
            }
            Error::Parse { path: None, error } => write!(f, "{error}"),
            Error::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Error::KeyNotFound { path, key } => {
                write!(f, "no `{key}` key in {}", path.display())
            }
            Error::NoMatchingFile { dir, pattern } => write!(
                f,
                "no file matching `{pattern}` in {} has a matching id",
                dir.display()
            ),
            Error::DuplicateSlot { section, key } => match (section.is_empty(), key.is_empty()) {
                (true, _) => write!(f, "`{key}` registered twice"),
                (_, true) => write!(f, "`{section}` registered twice"),
                _ => write!(f, "`{section}.{key}` registered twice"),
            },
            Error::InvalidPattern { pattern, .. } => {
                write!(f, "invalid file name pattern `{pattern}`")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse { error, .. } => Some(error),
            Error::Io { source, .. } => Some(source),
            Error::InvalidPattern { source, .. } => Some(source),
            Error::KeyNotFound { .. }
            | Error::NoMatchingFile { .. }
            | Error::DuplicateSlot { .. } => None,
        }
    }
}

impl From<skini_parse::ParseError> for Error {
    fn from(error: skini_parse::ParseError) -> Self {
        Error::Parse {
            path: None,
            error: error.into(),
        }
    }
}
