//! Semantic events emitted by the parser.

use std::fmt;

use crate::{BindError, Binder};

/// One logical assignment, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `key = value` in a section or at top level.
    SetScalar {
        /// Physical line the assignment starts on.
        line: usize,
        /// Normalized section name, empty at top level.
        path: String,
        /// Normalized key.
        key: String,
        value: String,
    },
    /// A bare value line inside a list.
    AppendListItem {
        line: usize,
        path: String,
        /// Normalized key of the list.
        key: String,
        value: String,
    },
    /// `key = value` inside a map block.
    SetMapEntry {
        line: usize,
        /// Normalized map name.
        map: String,
        /// Sub-map key, as written.
        submap: Option<String>,
        /// Entry key, as written.
        key: String,
        value: String,
    },
}

impl Event {
    /// Physical line the event came from.
    pub fn line(&self) -> usize {
        match self {
            Event::SetScalar { line, .. }
            | Event::AppendListItem { line, .. }
            | Event::SetMapEntry { line, .. } => *line,
        }
    }

    /// The assigned text.
    pub fn value(&self) -> &str {
        match self {
            Event::SetScalar { value, .. }
            | Event::AppendListItem { value, .. }
            | Event::SetMapEntry { value, .. } => value,
        }
    }

    /// Apply this event to a binder.
    pub fn apply<B: Binder + ?Sized>(&self, binder: &mut B) -> Result<(), BindError> {
        match self {
            Event::SetScalar {
                path, key, value, ..
            } => binder.set_scalar(path, key, value),
            Event::AppendListItem {
                path, key, value, ..
            } => binder.append_list_item(path, key, value),
            Event::SetMapEntry {
                map,
                submap: None,
                key,
                value,
                ..
            } => binder.set_map_entry(map, key, value),
            Event::SetMapEntry {
                map,
                submap: Some(submap),
                key,
                value,
                ..
            } => binder.set_submap_entry(map, submap, key, value),
        }
    }
}

fn qualified(f: &mut fmt::Formatter<'_>, path: &str, key: &str) -> fmt::Result {
    if path.is_empty() {
        f.write_str(key)
    } else {
        write!(f, "{path}.{key}")
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SetScalar {
                path, key, value, ..
            } => {
                f.write_str("scalar ")?;
                qualified(f, path, key)?;
                write!(f, " = {value:?}")
            }
            Event::AppendListItem {
                path, key, value, ..
            } => {
                f.write_str("item ")?;
                qualified(f, path, key)?;
                write!(f, " <- {value:?}")
            }
            Event::SetMapEntry {
                map,
                submap,
                key,
                value,
                ..
            } => {
                write!(f, "map {map}")?;
                if let Some(submap) = submap {
                    write!(f, "|{submap}")?;
                }
                write!(f, "[{key}] = {value:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let scalar = Event::SetScalar {
            line: 1,
            path: String::new(),
            key: "Id".into(),
            value: "/home".into(),
        };
        assert_eq!(scalar.to_string(), r#"scalar Id = "/home""#);

        let item = Event::AppendListItem {
            line: 2,
            path: "ServerHttp".into(),
            key: "Keys".into(),
            value: "keyOne".into(),
        };
        assert_eq!(item.to_string(), r#"item ServerHttp.Keys <- "keyOne""#);

        let entry = Event::SetMapEntry {
            line: 3,
            map: "Press".into(),
            submap: Some("ABC".into()),
            key: "logo".into(),
            value: "smh.png".into(),
        };
        assert_eq!(entry.to_string(), r#"map Press|ABC[logo] = "smh.png""#);
        assert_eq!(entry.line(), 3);
        assert_eq!(entry.value(), "smh.png");
    }
}
