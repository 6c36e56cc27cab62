#![doc = include_str!("../README.md")]

mod span;
pub use span::Span;

mod line;
pub use line::{Line, LineSource};

mod classify;
pub use classify::{
    LineKind, classify, ends_continuation, is_value, looks_like_header, looks_like_key_value,
    looks_like_map_header,
};

mod continuation;

mod context;
pub use context::{Context, State};

mod event;
pub use event::Event;

mod bind;
pub use bind::{BindError, BindErrorReason, Binder, Shape};

mod error;
pub use error::{Diagnostic, ParseError, ParseErrorKind};

mod name;
pub use name::to_field_name;

mod options;
pub use options::ParseOptions;

mod parser;
pub use parser::{Parser, parse_into};
