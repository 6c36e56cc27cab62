//! Error types for serde_skini.

use std::fmt;

use skini_tree::ParseError;

/// Error type for serde_skini operations.
#[derive(Debug)]
pub enum Error {
    /// The input could not be parsed.
    Parse(ParseError),
    /// The document does not fit the target type.
    Message {
        /// Dotted path of the offending value, empty at the root.
        path: String,
        message: String,
    },
}

impl Error {
    pub(crate) fn custom(msg: impl fmt::Display) -> Self {
        Error::Message {
            path: String::new(),
            message: msg.to_string(),
        }
    }

    /// Prefix the path of a message error with `key`.
    pub(crate) fn at(self, key: &str) -> Self {
        match self {
            Error::Message { path, message } if path.is_empty() => Error::Message {
                path: key.to_string(),
                message,
            },
            Error::Message { path, message } if path.starts_with('[') => Error::Message {
                path: format!("{key}{path}"),
                message,
            },
            Error::Message { path, message } => Error::Message {
                path: format!("{key}.{path}"),
                message,
            },
            other => other,
        }
    }

    /// The parse error, if parsing failed.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Message { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "{err}"),
            Error::Message { path, message } if path.is_empty() => f.write_str(message),
            Error::Message { path, message } => write!(f, "{path}: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Message { .. } => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

/// Result type for serde_skini operations.
pub type Result<T> = std::result::Result<T, Error>;
