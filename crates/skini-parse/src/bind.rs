//! The contract between the parser and a destination.

use std::fmt;

/// Shape of a destination location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A single text value.
    Scalar,
    /// An ordered sequence of text values.
    Sequence,
    /// A map from text keys to text values.
    Map,
    /// A map from sub-map keys to maps of text values.
    SubMap,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Scalar => "scalar",
            Shape::Sequence => "sequence",
            Shape::Map => "map",
            Shape::SubMap => "map of maps",
        })
    }
}

/// Why a destination rejected an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindErrorReason {
    /// The destination has no such location.
    NoSuchLocation,
    /// The location exists but has another shape.
    ShapeMismatch { found: Shape },
}

/// A destination rejected an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindError {
    /// Normalized section or map name (empty at top level).
    pub path: String,
    /// Key within `path`.
    pub key: String,
    /// Shape the operation needed.
    pub expected: Shape,
    pub reason: BindErrorReason,
}

impl BindError {
    /// No location at `path`/`key`.
    pub fn missing(path: &str, key: &str, expected: Shape) -> Self {
        Self {
            path: path.to_string(),
            key: key.to_string(),
            expected,
            reason: BindErrorReason::NoSuchLocation,
        }
    }

    /// The location at `path`/`key` is a `found`, not an `expected`.
    pub fn mismatch(path: &str, key: &str, expected: Shape, found: Shape) -> Self {
        Self {
            path: path.to_string(),
            key: key.to_string(),
            expected,
            reason: BindErrorReason::ShapeMismatch { found },
        }
    }

    /// `path.key`, or just whichever part is non-empty.
    pub fn location(&self) -> String {
        match (self.path.is_empty(), self.key.is_empty()) {
            (true, _) => self.key.clone(),
            (false, true) => self.path.clone(),
            (false, false) => format!("{}.{}", self.path, self.key),
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            BindErrorReason::NoSuchLocation => {
                write!(f, "destination has no {} `{}`", self.expected, self.location())
            }
            BindErrorReason::ShapeMismatch { found } => write!(
                f,
                "`{}` is a {}, expected a {}",
                self.location(),
                found,
                self.expected
            ),
        }
    }
}

impl std::error::Error for BindError {}

/// A destination that parse events are applied to.
///
/// Paths, keys and map names reaching a binder are already normalized with
/// [`to_field_name`](crate::to_field_name); map entry keys and sub-map keys
/// are passed as written. Values are always text.
pub trait Binder {
    /// Set the scalar `key` in section `path` (empty at top level).
    fn set_scalar(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError>;

    /// Append to the sequence `key` in section `path`, creating it on first use.
    fn append_list_item(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError>;

    /// Insert `key = value` into map `map`.
    fn set_map_entry(&mut self, map: &str, key: &str, value: &str) -> Result<(), BindError>;

    /// Insert `key = value` into the sub-map `submap` of `map`, creating it on first use.
    fn set_submap_entry(
        &mut self,
        map: &str,
        submap: &str,
        key: &str,
        value: &str,
    ) -> Result<(), BindError>;
}

impl<B: Binder + ?Sized> Binder for &mut B {
    fn set_scalar(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError> {
        (**self).set_scalar(path, key, value)
    }

    fn append_list_item(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError> {
        (**self).append_list_item(path, key, value)
    }

    fn set_map_entry(&mut self, map: &str, key: &str, value: &str) -> Result<(), BindError> {
        (**self).set_map_entry(map, key, value)
    }

    fn set_submap_entry(
        &mut self,
        map: &str,
        submap: &str,
        key: &str,
        value: &str,
    ) -> Result<(), BindError> {
        (**self).set_submap_entry(map, submap, key, value)
    }
}
