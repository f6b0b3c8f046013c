//! Event to decode-target lookup.
//!
//! The pipeline does not know what fields a payload has. It asks a
//! [`SchemaRegistry`] which [`Schema`] an event decodes into and treats a miss
//! as [`crate::ParseError::UnknownEvent`]. Every provider ships a
//! [`StaticRegistry`] built from a compile-time table; callers can substitute
//! their own registry through [`crate::Webhook::with_registry`].

use crate::Event;
use serde::{de::DeserializeOwned, Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::{
    fmt,
    hash::{Hash, Hasher},
};

type ShapeCheck = fn(&Value) -> Result<(), serde_json::Error>;

/// Descriptor of the shape an event body decodes into.
///
/// An untyped schema accepts any JSON object. A typed schema also requires
/// the object to deserialize as the Rust type it was built with, so a body
/// whose fields have the wrong JSON types fails inside the pipeline rather
/// than when the caller binds it. Schemas compare, hash and serialize by
/// name alone.
#[derive(Clone, Copy)]
pub struct Schema {
    name: &'static str,
    shape: Option<ShapeCheck>,
}

impl Schema {
    pub const fn new(name: &'static str) -> Self {
        Self { name, shape: None }
    }

    /// A schema whose bodies must deserialize as `T`.
    pub const fn typed<T: DeserializeOwned>(name: &'static str) -> Self {
        Self {
            name,
            shape: Some(check_shape::<T>),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_typed(&self) -> bool {
        self.shape.is_some()
    }

    /// Check a decoded JSON value against the schema's shape, if it has one.
    pub fn check(&self, body: &Value) -> Result<(), serde_json::Error> {
        match self.shape {
            Some(check) => check(body),
            None => Ok(()),
        }
    }
}

fn check_shape<T: DeserializeOwned>(body: &Value) -> Result<(), serde_json::Error> {
    <T as Deserialize>::deserialize(body).map(|_| ())
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("typed", &self.is_typed())
            .finish()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Schema {}

impl Hash for Schema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Lookup from event identifier to decode target.
///
/// Implementations must be pure: the same event always resolves to the same
/// schema, and an unrecognised event resolves to `None`.
#[cfg_attr(test, mockall::automock)]
pub trait SchemaRegistry: Send + Sync {
    fn resolve(&self, event: &Event) -> Option<Schema>;
}

/// A registry backed by a static table.
#[derive(Debug, Clone, Copy)]
pub struct StaticRegistry {
    entries: &'static [(Event, Schema)],
}

impl StaticRegistry {
    pub const fn new(entries: &'static [(Event, Schema)]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [(Event, Schema)] {
        self.entries
    }

    /// Known event identifiers, in table order.
    pub fn events(&self) -> impl Iterator<Item = &'static Event> {
        self.entries.iter().map(|(event, _)| event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SchemaRegistry for StaticRegistry {
    fn resolve(&self, event: &Event) -> Option<Schema> {
        self.entries
            .iter()
            .find(|(known, _)| known == event)
            .map(|(_, schema)| *schema)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
