//! Owning, ordered collection of entities
//!
//! The catalog is the only owner of its entities: clearing it (or dropping it)
//! drops every entity it holds. Insertion order is the order entries are
//! described, saved and restored in. Duplicate entries are allowed.

use std::slice;

use crate::entity::Entity;

#[derive(Debug, Default)]
pub struct Catalog {
    entities: Vec<Box<dyn Entity>>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            entities: Vec::new(),
        }
    }

    /// Appends an entity to the end of the catalog
    pub fn add(&mut self, entity: Box<dyn Entity>) {
        self.entities.push(entity);
    }

    /// Read-only view of the entries in insertion order
    pub fn entries(&self) -> &[Box<dyn Entity>] {
        &self.entities
    }

    pub fn iter(&self) -> slice::Iter<'_, Box<dyn Entity>> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Describes every entry, in order
    pub fn describe_all(&self) -> Vec<String> {
        self.entities.iter().map(|entity| entity.describe()).collect()
    }

    /// Drops every entity; a no-op on an empty catalog
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Box<dyn Entity>;
    type IntoIter = slice::Iter<'a, Box<dyn Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
