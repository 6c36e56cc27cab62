//! Tree builder: a [`Binder`] that accepts every assignment.

use skini_parse::{BindError, Binder, Shape};

use crate::value::{Table, Value};

/// Builder that constructs a tree from parse events.
///
/// Sections and maps share one namespace at the root: `[server.http]` and
/// `[map.server.http]` write into the same `ServerHttp` table.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: Table,
}

impl TreeBuilder {
    /// Create a new tree builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish building and return the root table.
    pub fn finish(self) -> Table {
        self.root
    }

    /// Table for a section or map; the root table when `path` is empty.
    fn table(&mut self, path: &str, expected: Shape) -> Result<&mut Table, BindError> {
        if path.is_empty() {
            return Ok(&mut self.root);
        }
        child_table(&mut self.root, "", path, expected)
    }
}

fn child_table<'a>(
    parent: &'a mut Table,
    parent_path: &str,
    key: &str,
    expected: Shape,
) -> Result<&'a mut Table, BindError> {
    match parent.entry_or_insert_with(key, || Value::Table(Table::new())) {
        Value::Table(table) => Ok(table),
        other => Err(BindError::mismatch(parent_path, key, expected, other.shape())),
    }
}

fn set_text(table: &mut Table, path: &str, key: &str, value: &str) -> Result<(), BindError> {
    match table.entry_or_insert_with(key, || Value::Text(String::new())) {
        Value::Text(text) => {
            value.clone_into(text);
            Ok(())
        }
        other => Err(BindError::mismatch(path, key, Shape::Scalar, other.shape())),
    }
}

impl Binder for TreeBuilder {
    fn set_scalar(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError> {
        let table = self.table(path, Shape::Map)?;
        set_text(table, path, key, value)
    }

    fn append_list_item(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError> {
        let table = self.table(path, Shape::Map)?;
        match table.entry_or_insert_with(key, || Value::List(Vec::new())) {
            Value::List(items) => {
                items.push(value.to_string());
                Ok(())
            }
            other => Err(BindError::mismatch(
                path,
                key,
                Shape::Sequence,
                other.shape(),
            )),
        }
    }

    fn set_map_entry(&mut self, map: &str, key: &str, value: &str) -> Result<(), BindError> {
        let table = self.table(map, Shape::Map)?;
        set_text(table, map, key, value)
    }

    fn set_submap_entry(
        &mut self,
        map: &str,
        submap: &str,
        key: &str,
        value: &str,
    ) -> Result<(), BindError> {
        let table = self.table(map, Shape::SubMap)?;
        let inner = child_table(table, map, submap, Shape::Map)?;
        set_text(inner, map, key, value)
    }
}

#[cfg(test)]
mod tests {
    use skini_parse::BindErrorReason;

    use super::*;

    #[test]
    fn test_builds_sections_lists_and_maps() {
        let mut builder = TreeBuilder::new();
        builder.set_scalar("", "Id", "/home").unwrap();
        builder.append_list_item("", "Supporting", "classA").unwrap();
        builder.append_list_item("", "Supporting", "classB").unwrap();
        builder.set_scalar("ServerHttp", "Port", "8080").unwrap();
        builder.set_map_entry("Texts", "hello", "Hey there !").unwrap();
        builder
            .set_submap_entry("Press", "ABC", "logo", "smh.png")
            .unwrap();
        let root = Value::Table(builder.finish());

        assert_eq!(root.get("Id").and_then(Value::as_str), Some("/home"));
        assert_eq!(
            root.get("Supporting").and_then(Value::as_list).map(<[_]>::len),
            Some(2)
        );
        assert_eq!(
            root.get("ServerHttp.Port").and_then(Value::as_str),
            Some("8080")
        );
        assert_eq!(
            root.get("Texts.hello").and_then(Value::as_str),
            Some("Hey there !")
        );
        assert_eq!(
            root.get("Press.ABC.logo").and_then(Value::as_str),
            Some("smh.png")
        );
    }

    #[test]
    fn test_scalar_overwrites_scalar() {
        let mut builder = TreeBuilder::new();
        builder.set_scalar("", "Mode", "debug").unwrap();
        builder.set_scalar("", "Mode", "release").unwrap();
        let root = builder.finish();
        assert_eq!(root.get("Mode").and_then(Value::as_str), Some("release"));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_shape_mismatch() {
        let mut builder = TreeBuilder::new();
        builder.set_scalar("", "Keys", "one").unwrap();
        let err = builder.append_list_item("", "Keys", "two").unwrap_err();
        assert_eq!(
            err.reason,
            BindErrorReason::ShapeMismatch {
                found: Shape::Scalar
            }
        );
        assert_eq!(err.to_string(), "`Keys` is a scalar, expected a sequence");
    }

    #[test]
    fn test_section_over_scalar_is_mismatch() {
        let mut builder = TreeBuilder::new();
        builder.set_scalar("", "Server", "x").unwrap();
        let err = builder.set_scalar("Server", "Port", "1").unwrap_err();
        assert_eq!(err.key, "Server");
        assert_eq!(err.expected, Shape::Map);
    }
}
