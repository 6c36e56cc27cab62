//! Value types for skini documents.
//!
//! Every value is text at the leaves:
//! - `key = value` is `Value::Text`
//! - `key =` followed by bare lines is `Value::List`
//! - sections, map blocks and sub-maps are `Value::Table`

use skini_parse::Shape;

use crate::split_path;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single text value.
    Text(String),
    /// An ordered list of text values.
    List(Vec<String>),
    /// A table of named values.
    Table(Table),
}

/// Ordered table of entries; keys keep their first insertion position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub entries: Vec<Entry>,
}

/// An entry in a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

impl Value {
    /// Create a text value.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Shape of this value as a binder destination would see it.
    ///
    /// A table holding only text is a map; a table holding tables is a map
    /// of maps.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Text(_) => Shape::Scalar,
            Value::List(_) => Shape::Sequence,
            Value::Table(table)
                if table
                    .entries
                    .iter()
                    .any(|e| matches!(e.value, Value::Table(_))) =>
            {
                Shape::SubMap
            }
            Value::Table(_) => Shape::Map,
        }
    }

    /// Get a value by path relative to this one.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }
        match self {
            Value::Table(table) => table.get_path(path),
            // List items are text; see `Document::get_item`.
            _ => None,
        }
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    /// Get a value by path.
    ///
    /// Segments are separated by `.`; a segment in brackets is taken
    /// verbatim, as in `Redirects[^abc/def$]`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let (segment, rest) = split_path(path);
        let key = segment
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(segment);
        self.get(key)?.get(rest)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    /// Get the value at `key`, inserting `default()` at the end if absent.
    pub fn entry_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        let index = match self.entries.iter().position(|e| e.key == key) {
            Some(index) => index,
            None => {
                self.entries.push(Entry {
                    key: key.to_string(),
                    value: default(),
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].value
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<(&str, Value)>) -> Value {
        Value::Table(Table {
            entries: entries
                .into_iter()
                .map(|(key, value)| Entry {
                    key: key.to_string(),
                    value,
                })
                .collect(),
        })
    }

    #[test]
    fn test_get_nested() {
        let root = table(vec![
            ("Id", Value::text("/home")),
            (
                "ServerHttp",
                table(vec![(
                    "Keys",
                    Value::List(vec!["keyOne".into(), "keyTwo".into()]),
                )]),
            ),
            ("Redirects", table(vec![("^abc/def$", Value::text("efg"))])),
        ]);

        assert_eq!(root.get("Id").and_then(Value::as_str), Some("/home"));
        assert_eq!(
            root.get("ServerHttp.Keys").and_then(Value::as_list),
            Some(&["keyOne".to_string(), "keyTwo".to_string()][..])
        );
        assert_eq!(
            root.get("Redirects[^abc/def$]").and_then(Value::as_str),
            Some("efg")
        );
        assert!(root.get("Missing").is_none());
        assert!(root.get("Id.Deeper").is_none());
    }

    #[test]
    fn test_shape() {
        assert_eq!(Value::text("x").shape(), Shape::Scalar);
        assert_eq!(Value::List(vec![]).shape(), Shape::Sequence);
        assert_eq!(table(vec![("k", Value::text("v"))]).shape(), Shape::Map);
        assert_eq!(
            table(vec![("ABC", table(vec![]))]).shape(),
            Shape::SubMap
        );
    }

    #[test]
    fn test_entry_or_insert_keeps_order() {
        let mut table = Table::new();
        table.entry_or_insert_with("b", || Value::text("1"));
        table.entry_or_insert_with("a", || Value::text("2"));
        *table.entry_or_insert_with("b", || Value::text("ignored")) = Value::text("3");
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(table.get("b").and_then(Value::as_str), Some("3"));
    }
}
