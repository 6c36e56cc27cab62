//! Line classification.
//!
//! Strict recognizers decide what a line means; loose probes only decide
//! where a `+=` continuation stops. Strict recognizers are tried in a fixed
//! order because the productions overlap in surface form:
//!
//! 1. map header `[map.name]` / `[map.name | subkey]`
//! 2. section `[dotted.name]`
//! 3. list start `key =` followed by a bare value line
//! 4. key/value `key = value`, continuation start `key += value`
//! 5. bare value (anything else)
//!
//! A bracketed line that is neither a map header nor a section is
//! unrecognized rather than a bare value.

use std::sync::LazyLock;

use regex::Regex;

static MAP_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[\s*map\.(?P<name>[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)(?:\s*\|\s*(?P<subkey>[A-Za-z0-9_.*-]*))?\s*\]$",
    )
    .unwrap()
});

static SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s*(?P<name>[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\s*\]$").unwrap()
});

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>[^=]+?)\s+(?P<op>\+?=)\s*(?P<value>.*)$").unwrap()
});

static LOOSE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[.*\]$").unwrap());

static LOOSE_MAP_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*map\..*\]$").unwrap());

static LOOSE_KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^=]+\s+\+?=").unwrap());

/// The grammar production a single line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `[dotted.name]`
    Section { name: &'a str },
    /// `[map.name]` or `[map.name | subkey]`
    MapHeader {
        name: &'a str,
        subkey: Option<&'a str>,
    },
    /// `key =` followed by a bare value line.
    ListStart { key: &'a str },
    /// `key = value`
    KeyValue { key: &'a str, value: &'a str },
    /// `key += value`, possibly continued on following lines.
    ContinuationStart { key: &'a str, value: &'a str },
    /// A bare value line.
    Value { text: &'a str },
    /// A bracketed line that is not a valid header.
    Unrecognized,
}

impl LineKind<'_> {
    /// Short name of the production, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::Section { .. } => "section",
            LineKind::MapHeader { .. } => "map header",
            LineKind::ListStart { .. } => "list start",
            LineKind::KeyValue { .. } => "key/value",
            LineKind::ContinuationStart { .. } => "continuation",
            LineKind::Value { .. } => "value",
            LineKind::Unrecognized => "unrecognized",
        }
    }
}

/// Classify `line`, using `next` (the following content line, if any) to
/// tell a list start from an empty-valued key.
pub fn classify<'a>(line: &'a str, next: Option<&str>) -> LineKind<'a> {
    match classify_single(line) {
        LineKind::KeyValue { key, value: "" } if next.is_some_and(is_value) => {
            LineKind::ListStart { key }
        }
        kind => kind,
    }
}

/// Whether `line` on its own is a bare value line.
pub fn is_value(line: &str) -> bool {
    matches!(classify_single(line), LineKind::Value { .. })
}

/// Classification without lookahead; never yields [`LineKind::ListStart`].
fn classify_single(line: &str) -> LineKind<'_> {
    if let Some(caps) = MAP_HEADER.captures(line) {
        let name = caps.name("name").map_or("", |m| m.as_str());
        let subkey = caps
            .name("subkey")
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty());
        return LineKind::MapHeader { name, subkey };
    }

    if let Some(caps) = SECTION.captures(line) {
        let name = caps.name("name").map_or("", |m| m.as_str());
        return LineKind::Section { name };
    }

    if let Some(caps) = KEY_VALUE.captures(line) {
        let key = caps.name("key").map_or("", |m| m.as_str().trim());
        let value = caps.name("value").map_or("", |m| m.as_str());
        return match caps.name("op").map(|m| m.as_str()) {
            Some("+=") => LineKind::ContinuationStart { key, value },
            _ => LineKind::KeyValue { key, value },
        };
    }

    if looks_like_header(line) {
        return LineKind::Unrecognized;
    }

    LineKind::Value { text: line }
}

/// Loose probe: any bracketed token.
pub fn looks_like_header(line: &str) -> bool {
    LOOSE_HEADER.is_match(line)
}

/// Loose probe: bracketed and starting with `map.`.
pub fn looks_like_map_header(line: &str) -> bool {
    LOOSE_MAP_HEADER.is_match(line)
}

/// Loose probe: something followed by whitespace and `=` or `+=`.
pub fn looks_like_key_value(line: &str) -> bool {
    LOOSE_KEY_VALUE.is_match(line)
}

/// Whether a continuation join must stop before `line`.
pub fn ends_continuation(line: &str) -> bool {
    looks_like_key_value(line) || looks_like_header(line) || looks_like_map_header(line)
}
