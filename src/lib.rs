//! In-memory catalog of polymorphic game entities with text persistence
//!
//! - `entity`: the `Entity` trait, concrete types and the type registry
//! - `catalog`: the owning, ordered collection
//! - `save`: save/load protocol and save directory management
//! - `config`: JSON configuration for the binary

pub mod catalog;
pub mod config;
pub mod entity;
pub mod save;

pub use catalog::Catalog;
pub use config::{CatalogConfig, ConfigError};
pub use entity::{Entity, EntityRegistry, Player, RegistryError};
pub use save::{SaveError, SaveManager, SaveType, load_from_file, save_to_file};
