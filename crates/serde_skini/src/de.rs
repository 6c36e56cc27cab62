//! Serde deserializer over a parsed skini document.

use serde::de::{self, IntoDeserializer, Visitor};
use skini_tree::{Document, Table, Value};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
enum Node<'de> {
    Text(&'de str),
    List(&'de [String]),
    Table(&'de Table),
}

/// skini deserializer implementing serde::Deserializer.
///
/// Every leaf is text, so destinations hold `String`s, lists of them, and
/// maps of them.
#[derive(Debug, Clone, Copy)]
pub struct Deserializer<'de> {
    node: Node<'de>,
}

impl<'de> Deserializer<'de> {
    /// Create a deserializer for a whole document.
    pub fn new(document: &'de Document) -> Self {
        Self {
            node: Node::Table(&document.root),
        }
    }

    /// Create a deserializer for a single value.
    pub fn from_value(value: &'de Value) -> Self {
        let node = match value {
            Value::Text(text) => Node::Text(text),
            Value::List(items) => Node::List(items),
            Value::Table(table) => Node::Table(table),
        };
        Self { node }
    }

    fn text(text: &'de str) -> Self {
        Self {
            node: Node::Text(text),
        }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.node {
            Node::Text(text) => visitor.visit_borrowed_str(text),
            Node::List(items) => visitor.visit_seq(SeqAccess {
                items: items.iter(),
                index: 0,
            }),
            Node::Table(table) => visitor.visit_map(MapAccess {
                entries: table.entries.iter(),
                key: None,
                value: None,
            }),
        }
    }

    /// A present key is always `Some`, even when its value is empty.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    /// Only unit variants: the text names the variant.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.node {
            Node::Text(variant) => visitor.visit_enum(variant.into_deserializer()),
            _ => Err(Error::custom(format!("expected text naming a `{name}` variant"))),
        }
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    // Values are never coerced: a number or bool target sees text and
    // rejects it.
    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier
    }
}

/// Sequence access over list items.
struct SeqAccess<'de> {
    items: std::slice::Iter<'de, String>,
    index: usize,
}

impl<'de> de::SeqAccess<'de> for SeqAccess<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        let Some(item) = self.items.next() else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        seed.deserialize(Deserializer::text(item))
            .map(Some)
            .map_err(|err| err.at(&format!("[{index}]")))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Map access over table entries.
struct MapAccess<'de> {
    entries: std::slice::Iter<'de, skini_tree::Entry>,
    key: Option<&'de str>,
    value: Option<&'de Value>,
}

impl<'de> de::MapAccess<'de> for MapAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let Some(entry) = self.entries.next() else {
            return Ok(None);
        };
        self.key = Some(&entry.key);
        self.value = Some(&entry.value);
        seed.deserialize(Deserializer::text(&entry.key)).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::custom("value requested before key"))?;
        let key = self.key.take().unwrap_or_default();
        seed.deserialize(Deserializer::from_value(value))
            .map_err(|err| err.at(key))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}
