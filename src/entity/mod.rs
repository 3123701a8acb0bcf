//! Entity capability set and concrete entity types
//!
//! Every persistable object in a [`Catalog`](crate::catalog::Catalog) implements
//! [`Entity`]. Concrete types are looked up by their type tag through the
//! [`EntityRegistry`] when a catalog is reloaded.
//!
//! # Architecture
//!
//! - `player`: the character record (`Player` on the wire)
//! - `registry`: tag → factory table used by the loader

pub mod player;
pub mod registry;

use std::any::Any;
use std::fmt;
use std::io::Write;

use crate::save::{SaveError, TokenReader};

pub use player::Player;
pub use registry::{EntityFactory, EntityRegistry, RegistryError};

/// Trait for objects that can be described, saved and loaded
///
/// # Design Pattern: Trait-based Serialization
///
/// Each entity type owns its record layout, while the catalog protocol stays
/// generic: it writes the count, asks each entity to write itself, and on load
/// hands the remaining tokens of a record to a freshly created instance.
///
/// # Record Layout
///
/// `serialize` must write `<type_tag> <field1> ... <fieldN>\n` and nothing else.
/// `load` receives the reader positioned just after the tag and must consume
/// exactly the same fields in the same order.
pub trait Entity: fmt::Debug {
    /// Tag written at the start of every record of this type
    fn type_tag(&self) -> &'static str;

    /// Human-readable one-line summary
    fn describe(&self) -> String;

    /// Writes one complete record, tag first, terminated by a line break
    fn serialize(&self, out: &mut dyn Write) -> Result<(), SaveError>;

    /// Populates this entity from the fields following its type tag
    ///
    /// On error the fields that were not reached keep their previous values.
    fn load(&mut self, fields: &mut TokenReader<'_>) -> Result<(), SaveError>;

    /// Allows callers to recover the concrete type
    fn as_any(&self) -> &dyn Any;
}
