//! Explicit destination schemas.
//!
//! A [`Schema`] maps normalized section/key names to typed slots of a
//! destination type through plain accessor functions. Binding looks the
//! slot up by name and writes the text through the accessor.

use std::collections::BTreeMap;
use std::fmt;

use skini_parse::{BindError, Binder, Shape, to_field_name};
use tracing::trace;

use crate::Error;

type SubMap = BTreeMap<String, BTreeMap<String, String>>;

/// A typed location in a destination.
pub enum Slot<T> {
    Scalar(fn(&mut T) -> &mut String),
    List(fn(&mut T) -> &mut Vec<String>),
    Map(fn(&mut T) -> &mut BTreeMap<String, String>),
    SubMap(fn(&mut T) -> &mut SubMap),
}

impl<T> Slot<T> {
    pub fn shape(&self) -> Shape {
        match self {
            Slot::Scalar(_) => Shape::Scalar,
            Slot::List(_) => Shape::Sequence,
            Slot::Map(_) => Shape::Map,
            Slot::SubMap(_) => Shape::SubMap,
        }
    }
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.shape())
    }
}

/// Map from `(section, key)` to a slot of `T`.
///
/// Sections and keys are normalized with [`to_field_name`] on registration,
/// so `"server.http"`/`"port"` and `"ServerHttp"`/`"Port"` name the same
/// slot. Maps are registered by name alone.
///
/// # Panics
///
/// The chaining helpers panic when the same location is registered twice;
/// [`Schema::try_with`] reports it as an error instead.
pub struct Schema<T> {
    slots: BTreeMap<(String, String), Slot<T>>,
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.slots.iter()).finish()
    }
}

impl<T> Schema<T> {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scalar `key` in `section` (empty for top level).
    pub fn scalar(mut self, section: &str, key: &str, accessor: fn(&mut T) -> &mut String) -> Self {
        self.register(section, key, Slot::Scalar(accessor));
        self
    }

    /// Register a list `key` in `section` (empty for top level).
    pub fn list(
        mut self,
        section: &str,
        key: &str,
        accessor: fn(&mut T) -> &mut Vec<String>,
    ) -> Self {
        self.register(section, key, Slot::List(accessor));
        self
    }

    /// Register the map filled by `[map.name]` blocks.
    pub fn map(mut self, name: &str, accessor: fn(&mut T) -> &mut BTreeMap<String, String>) -> Self {
        self.register(name, "", Slot::Map(accessor));
        self
    }

    /// Register the map of maps filled by `[map.name | subkey]` blocks.
    pub fn submap(mut self, name: &str, accessor: fn(&mut T) -> &mut SubMap) -> Self {
        self.register(name, "", Slot::SubMap(accessor));
        self
    }

    /// Register `slot` at `section`/`key`, failing if the location is taken.
    ///
    /// Maps and sub-maps use an empty `key`.
    pub fn try_with(mut self, section: &str, key: &str, slot: Slot<T>) -> Result<Self, Error> {
        let location = (to_field_name(section), to_field_name(key));
        if self.slots.contains_key(&location) {
            return Err(Error::DuplicateSlot {
                section: location.0,
                key: location.1,
            });
        }
        self.slots.insert(location, slot);
        Ok(self)
    }

    fn register(&mut self, section: &str, key: &str, slot: Slot<T>) {
        let schema = std::mem::take(self);
        match schema.try_with(section, key, slot) {
            Ok(schema) => *self = schema,
            Err(err) => panic!("{err}"),
        }
    }

    /// Look up a slot by normalized names.
    pub fn get(&self, section: &str, key: &str) -> Option<&Slot<T>> {
        // Callers pass names that are already normalized.
        self.slots.get(&(section.to_string(), key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bind `target` through this schema.
    pub fn bind<'a>(&'a self, target: &'a mut T) -> SchemaBinder<'a, T> {
        SchemaBinder {
            schema: self,
            target,
        }
    }
}

/// A destination type with a known schema.
pub trait Configure: Sized {
    fn schema() -> Schema<Self>;
}

/// [`Binder`] writing into a destination through its [`Schema`].
pub struct SchemaBinder<'a, T> {
    schema: &'a Schema<T>,
    target: &'a mut T,
}

impl<T> SchemaBinder<'_, T> {
    fn slot(&self, path: &str, key: &str, expected: Shape) -> Result<&Slot<T>, BindError> {
        match self.schema.get(path, key) {
            Some(slot) if slot.shape() == expected => Ok(slot),
            Some(slot) => Err(BindError::mismatch(path, key, expected, slot.shape())),
            None => Err(BindError::missing(path, key, expected)),
        }
    }
}

impl<T> Binder for SchemaBinder<'_, T> {
    fn set_scalar(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError> {
        if let Slot::Scalar(field) = self.slot(path, key, Shape::Scalar)? {
            let field = *field;
            trace!(path, key, "set scalar");
            value.clone_into(field(self.target));
        }
        Ok(())
    }

    fn append_list_item(&mut self, path: &str, key: &str, value: &str) -> Result<(), BindError> {
        if let Slot::List(field) = self.slot(path, key, Shape::Sequence)? {
            let field = *field;
            trace!(path, key, "append item");
            field(self.target).push(value.to_string());
        }
        Ok(())
    }

    fn set_map_entry(&mut self, map: &str, key: &str, value: &str) -> Result<(), BindError> {
        if let Slot::Map(field) = self.slot(map, "", Shape::Map)? {
            let field = *field;
            trace!(map, key, "set map entry");
            field(self.target).insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn set_submap_entry(
        &mut self,
        map: &str,
        submap: &str,
        key: &str,
        value: &str,
    ) -> Result<(), BindError> {
        if let Slot::SubMap(field) = self.slot(map, "", Shape::SubMap)? {
            let field = *field;
            trace!(map, submap, key, "set sub-map entry");
            field(self.target)
                .entry(submap.to_string())
                .or_default()
                .insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
