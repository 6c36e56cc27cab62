//! Serde support for the skini configuration dialect.
//!
//! Parses into a [`skini_tree::Document`], then deserializes from the tree.
//! Section and key names reach serde normalized (`server.http` becomes
//! `ServerHttp`, `logDir` becomes `LogDir`), so destination structs usually
//! carry `#[serde(rename_all = "PascalCase")]`. Map entry keys and sub-map
//! keys arrive as written.
//!
//! Every value is text. Fields hold `String`, `Vec<String>`, maps of
//! strings, or unit enums named by their text; a numeric or boolean field
//! is a type error, not a conversion.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use serde::Deserialize;
//! use serde_skini::from_str;
//!
//! #[derive(Deserialize, Debug)]
//! #[serde(rename_all = "PascalCase")]
//! struct Config {
//!     id: String,
//!     supporting: Vec<String>,
//!     server_http: Server,
//!     texts: BTreeMap<String, String>,
//! }
//!
//! #[derive(Deserialize, Debug)]
//! #[serde(rename_all = "PascalCase")]
//! struct Server {
//!     port: String,
//! }
//!
//! let source = "id = /home\nsupporting =\n  classA\n  classB\n\n[server.http]\nport = 8080\n\n[map.texts]\nhello = Hey there !\n";
//! let config: Config = from_str(source).unwrap();
//! assert_eq!(config.id, "/home");
//! assert_eq!(config.supporting, ["classA", "classB"]);
//! assert_eq!(config.server_http.port, "8080");
//! assert_eq!(config.texts["hello"], "Hey there !");
//! ```

use std::io::BufRead;

use serde::de::{Deserialize, DeserializeOwned};
use skini_tree::Document;

mod de;
mod error;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use skini_parse::ParseOptions;

/// Deserialize a value from a skini string.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let document = Document::parse(s)?;
    from_document(&document)
}

/// Deserialize a value from a reader.
pub fn from_reader<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: BufRead,
{
    from_reader_with_options(reader, &ParseOptions::default())
}

/// Deserialize a value from a reader with custom parse options.
pub fn from_reader_with_options<T, R>(reader: R, options: &ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let (document, _) = Document::from_reader(reader, options)?;
    from_document(&document)
}

/// Deserialize a value borrowing from an already parsed document.
pub fn from_document<'de, T>(document: &'de Document) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::new(document))
}
