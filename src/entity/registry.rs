use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::Entity;
use super::player::{PLAYER_TAG, Player};

/// Builds a fresh, default-initialised entity of one concrete type
pub type EntityFactory = fn() -> Box<dyn Entity>;

/// Errors that can occur while registering entity types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A factory is already registered under this tag
    #[error("Entity type '{0}' already registered")]
    DuplicateType(String),
}

/// Central registry of all loadable entity types
///
/// This is the single source of truth for which type tags a save file may
/// contain. The catalog loader only asks the registry for a fresh instance, so
/// supporting a new type means one `register` call and nothing else.
pub struct EntityRegistry {
    factories: HashMap<String, EntityFactory>,
}

impl EntityRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        EntityRegistry {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with every built-in entity type registered
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_types();
        registry
    }

    /// Registers a factory for `tag`
    ///
    /// Returns error if the tag is already taken.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        factory: EntityFactory,
    ) -> Result<(), RegistryError> {
        let tag = tag.into();
        if self.factories.contains_key(&tag) {
            return Err(RegistryError::DuplicateType(tag));
        }

        debug!(tag = %tag, "registered entity type");
        self.factories.insert(tag, factory);
        Ok(())
    }

    /// Allocates a fresh instance for `tag`
    ///
    /// Returns None if no type is registered under this tag.
    pub fn create(&self, tag: &str) -> Option<Box<dyn Entity>> {
        self.factories.get(tag).map(|factory| factory())
    }

    /// Returns true if a type is registered under `tag`
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Returns all registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    fn register_builtin_types(&mut self) {
        // The map starts empty, so built-in tags cannot collide
        self.factories
            .insert(PLAYER_TAG.to_string(), Player::create_default);
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::with_builtin_types()
    }
}
